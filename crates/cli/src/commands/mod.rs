//! CLI subcommand implementations.

pub mod address;
pub mod basket;
pub mod classify;
pub mod request;

use std::io::Write;
use std::path::Path;

use payform_gateway::Order;
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

/// Read and parse an order export.
async fn load_order(path: &Path) -> Result<Order, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let order: Order = serde_json::from_str(&content)?;

    debug!(
        path = %path.display(),
        order_id = %order.order_id,
        items = order.items.len(),
        "Loaded order"
    );
    Ok(order)
}

/// Pretty-print `value` as JSON on stdout.
fn write_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
