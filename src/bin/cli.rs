//! CaskKV CLI
//!
//! Command-line interface for reading and writing a CaskKV log file.

use std::process::ExitCode;

use caskkv::log::LogRecovery;
use caskkv::{Config, Store, SyncStrategy};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// CaskKV CLI
#[derive(Parser, Debug)]
#[command(name = "caskkv-cli")]
#[command(about = "CLI for the CaskKV log-structured key-value store")]
#[command(version)]
struct Args {
    /// Log file
    #[arg(short, long, default_value = "./caskkv.db")]
    file: String,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key (writes an empty value)
    Del {
        /// The key to delete
        key: String,
    },

    /// List all keys
    Keys,

    /// Scan the log and report its state without modifying it
    Verify,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,caskkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> caskkv::Result<()> {
    let sync_strategy = if args.sync {
        SyncStrategy::EveryWrite
    } else {
        SyncStrategy::Never
    };
    let config = Config::builder()
        .path(&args.file)
        .sync_strategy(sync_strategy)
        .build();

    match args.command {
        Commands::Get { key } => {
            let store = Store::open(config)?;
            let value = store.get(key.as_bytes())?;
            println!("{}", String::from_utf8_lossy(&value));
            store.close()
        }
        Commands::Set { key, value } => {
            let mut store = Store::open(config)?;
            store.set(key.as_bytes(), value.as_bytes())?;
            store.close()
        }
        Commands::Del { key } => {
            let mut store = Store::open(config)?;
            store.delete(key.as_bytes())?;
            store.close()
        }
        Commands::Keys => {
            let store = Store::open(config)?;
            for key in store.keys() {
                println!("{}", String::from_utf8_lossy(key));
            }
            store.close()
        }
        Commands::Verify => {
            let result = LogRecovery::verify(&config.path)?;
            println!("records:   {}", result.records_recovered);
            println!("valid_len: {}", result.valid_len);
            println!("file_len:  {}", result.file_len);
            println!("truncated: {}", result.was_truncated);
            Ok(())
        }
    }
}
