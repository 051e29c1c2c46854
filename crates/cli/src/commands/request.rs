//! Build the full payment request for an order.

use std::path::Path;

use chrono::Utc;
use payform_gateway::{PaymentRequest, VendorTxCode};

use super::{load_order, write_json};
use crate::config::CliConfig;
use crate::error::CliError;

/// Print the payment request for the order in `path`.
///
/// With `flat`, prints the provider's flat key/value fields instead of the
/// structured request; the basket is not part of the flat form.
///
/// # Errors
///
/// Returns an error if the order cannot be read or its basket cannot be built.
pub async fn run(config: &CliConfig, path: &Path, flat: bool) -> Result<(), CliError> {
    let order = load_order(path).await?;
    let code = VendorTxCode::generate(&config.tx_prefix, &order.order_id, Utc::now());
    let request = PaymentRequest::build(&order, code)?;

    if flat {
        write_json(&request.provider_fields())
    } else {
        write_json(&request)
    }
}
