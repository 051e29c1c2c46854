//! CLI error type.

use std::path::PathBuf;

use payform_gateway::BasketError;
use thiserror::Error;

/// Errors that can end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// Input was not a valid order export, or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The basket could not be built.
    #[error("Basket error: {0}")]
    Basket(#[from] BasketError),
}
