//! Map an order's billing or delivery address.

use std::path::Path;

use payform_gateway::{AddressKind, map_delivery, map_record};
use tracing::info;

use super::{load_order, write_json};
use crate::error::CliError;

/// Print the customer details for one party of the order in `path`.
///
/// Delivery prints `null` when the order has no shipping profile.
///
/// # Errors
///
/// Returns an error if the order cannot be read.
pub async fn run(path: &Path, kind: AddressKind) -> Result<(), CliError> {
    let order = load_order(path).await?;

    match kind {
        AddressKind::Billing => {
            let details = map_record(&order.billing, kind, order.contact_email());
            write_json(&details)
        }
        AddressKind::Delivery => {
            let details = map_delivery(order.shipping.as_ref());
            if details.is_none() {
                info!(order_id = %order.order_id, "Order has no shipping profile");
            }
            write_json(&details)
        }
    }
}
