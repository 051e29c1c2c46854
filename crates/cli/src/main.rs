//! payform CLI - payment request building and response classification.
//!
//! # Usage
//!
//! ```bash
//! # Build the payment request for an exported order
//! payform request order.json
//!
//! # Same, as the provider's flat key/value fields
//! payform request order.json --flat
//!
//! # Build only the basket
//! payform basket order.json
//!
//! # Map the delivery address
//! payform address order.json --kind delivery
//!
//! # Classify a provider callback status
//! payform classify -s NOTAUTHED -d "Card declined" -o 42
//! ```
//!
//! JSON goes to stdout, logs to stderr. See [`config`] for environment
//! variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use payform_gateway::AddressKind;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use config::{CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "payform")]
#[command(author, version, about = "Payment request mapping tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the payment request for an order export
    Request {
        /// Path to the order JSON
        file: PathBuf,

        /// Print flat provider fields instead of the structured request
        #[arg(long)]
        flat: bool,
    },
    /// Build the basket for an order export
    Basket {
        /// Path to the order JSON
        file: PathBuf,
    },
    /// Map the billing or delivery address of an order export
    Address {
        /// Path to the order JSON
        file: PathBuf,

        /// Which address to map
        #[arg(short, long, value_enum, default_value_t = Party::Billing)]
        kind: Party,
    },
    /// Classify a provider callback status
    Classify {
        /// Provider status code (e.g. ABORT, NOTAUTHED)
        #[arg(short, long)]
        status: String,

        /// Provider status detail text
        #[arg(short, long, default_value = "")]
        detail: String,

        /// Order the callback belongs to
        #[arg(short, long)]
        order_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Party {
    Billing,
    Delivery,
}

impl From<Party> for AddressKind {
    fn from(party: Party) -> Self {
        match party {
            Party::Billing => Self::Billing,
            Party::Delivery => Self::Delivery,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is configured from this config, so fall back to defaults
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(config: &CliConfig) {
    // RUST_LOG wins over PAYFORM_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Request { file, flat } => commands::request::run(config, &file, flat).await?,
        Commands::Basket { file } => commands::basket::run(&file).await?,
        Commands::Address { file, kind } => commands::address::run(&file, kind.into()).await?,
        Commands::Classify {
            status,
            detail,
            order_id,
        } => commands::classify::run(&status, &detail, &order_id)?,
    }
    Ok(())
}
