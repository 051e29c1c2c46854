//! Integration tests for payform.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p payform-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `payment_request` - Order exports through to the assembled request
//! - `response_classification` - Provider status table
//!
//! Fixtures live in `fixtures/` and are compiled in with `include_str!`.

use payform_gateway::Order;

/// Order with billing, shipping, a deleted product and mixed adjustments.
pub const ORDER_FULL: &str = include_str!("../fixtures/order_full.json");

/// Order without a shipping profile whose only item has no product.
pub const ORDER_NO_BASKET: &str = include_str!("../fixtures/order_no_basket.json");

/// Parse a fixture into an [`Order`].
///
/// # Errors
///
/// Returns the JSON error if the fixture is not a valid order export.
pub fn parse_order(json: &str) -> Result<Order, serde_json::Error> {
    serde_json::from_str(json)
}
