//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to exercise `manufacturer_core` against a real file.
//! - Print results as JSON so output stays machine-checkable.

use clap::{Args, Parser, Subcommand};
use log::info;
use manufacturer_core::{
    core_version, default_log_level, init_logging, ping, FileConnectionProvider, Manufacturer,
    ManufacturerId, ManufacturerRepository, SqliteManufacturerRepository, StoreConfig,
};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "manufacturer-cli", version, about = "Manufacturer store smoke probe")]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Log level (trace|debug|info|warn|error); logging stays off without --log-dir.
    #[arg(long, env = "MANUFACTURER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "MANUFACTURER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct StoreArgs {
    /// SQLite database file.
    #[arg(long = "db", env = "MANUFACTURER_DB", default_value = manufacturer_core::config::DEFAULT_DB_FILE_NAME)]
    db_path: PathBuf,

    #[arg(long, env = "MANUFACTURER_BUSY_TIMEOUT_MS", default_value_t = manufacturer_core::config::DEFAULT_BUSY_TIMEOUT_MS)]
    busy_timeout_ms: u64,
}

impl From<StoreArgs> for StoreConfig {
    fn from(args: StoreArgs) -> Self {
        StoreConfig::new(args.db_path).with_busy_timeout_ms(args.busy_timeout_ms)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage information.
    Ping,
    /// Insert a manufacturer and print it with its assigned id.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
    },
    /// Print one active manufacturer, or null.
    Get { id: ManufacturerId },
    /// Print all active manufacturers.
    List,
    /// Replace name and country of an active manufacturer.
    Update {
        id: ManufacturerId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
    },
    /// Soft-delete a manufacturer.
    Delete { id: ManufacturerId },
    /// Undo a soft delete.
    Restore { id: ManufacturerId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(cli.store.into(), cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", error_chain(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run(config: StoreConfig, command: Command) -> Result<serde_json::Value, Box<dyn Error>> {
    info!(
        "event=cli_start module=cli status=start db_path={}",
        config.db_path.display()
    );
    let repo = SqliteManufacturerRepository::new(FileConnectionProvider::new(config));

    let output = match command {
        Command::Ping => json!({ "ping": ping(), "version": core_version() }),
        Command::Create { name, country } => {
            serde_json::to_value(repo.create(Manufacturer::new(name, country))?)?
        }
        Command::Get { id } => serde_json::to_value(repo.get(id)?)?,
        Command::List => serde_json::to_value(repo.get_all()?)?,
        Command::Update { id, name, country } => {
            serde_json::to_value(repo.update(Manufacturer::with_id(id, name, country))?)?
        }
        Command::Delete { id } => json!({ "id": id, "deleted": repo.delete(id)? }),
        Command::Restore { id } => json!({ "id": id, "restored": repo.restore(id)? }),
    };

    Ok(output)
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
