//! Build only the basket for an order.

use std::path::Path;

use payform_gateway::build_basket;
use tracing::info;

use super::{load_order, write_json};
use crate::error::CliError;

/// Print the basket for the order in `path`, or `null` when it has none.
///
/// # Errors
///
/// Returns an error if the order cannot be read or a line item has a
/// non-positive quantity.
pub async fn run(path: &Path) -> Result<(), CliError> {
    let order = load_order(path).await?;
    let basket = build_basket(&order.items)?;

    if basket.is_none() {
        info!(order_id = %order.order_id, "Order has no purchasable items");
    }
    write_json(&basket)
}
