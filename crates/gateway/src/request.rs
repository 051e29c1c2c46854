//! Payment request assembly.
//!
//! Combines the mapped billing and delivery details, the basket and the
//! order total into the payload handed to the provider SDK.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use payform_core::{CurrencyCode, Email, OrderId, round_to_pence};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::address::{AddressKind, CustomerDetails, map_delivery, map_record};
use crate::basket::{Basket, build_basket};
use crate::error::Result;
use crate::order::Order;

/// Merchant-side transaction reference, unique per payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VendorTxCode(String);

impl VendorTxCode {
    /// Longest code the provider accepts.
    pub const MAX_LENGTH: usize = 40;

    /// Build `{prefix}{order_id}-{unix_seconds}`.
    ///
    /// If that exceeds [`Self::MAX_LENGTH`], the `{prefix}{order_id}` part is
    /// cut at its end; the timestamp suffix is always kept whole.
    #[must_use]
    pub fn generate(prefix: &str, order_id: &OrderId, at: DateTime<Utc>) -> Self {
        let suffix = format!("-{}", at.timestamp());
        let room = Self::MAX_LENGTH.saturating_sub(suffix.len());
        let mut code: String = prefix
            .chars()
            .chain(order_id.as_str().chars())
            .take(room)
            .collect();
        code.push_str(&suffix);
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorTxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the provider needs to take payment for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub vendor_tx_code: VendorTxCode,
    pub order_id: OrderId,
    /// Order total rounded to two decimal places.
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub description: String,
    pub billing: CustomerDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<CustomerDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket: Option<Basket>,
}

impl PaymentRequest {
    /// Assemble the request for `order`.
    ///
    /// A basket whose total differs from the order total is still sent;
    /// the mismatch is logged because the provider may reject it.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::BasketError`] from basket construction.
    pub fn build(order: &Order, vendor_tx_code: VendorTxCode) -> Result<Self> {
        let billing = map_record(&order.billing, AddressKind::Billing, order.contact_email());
        let delivery = map_delivery(order.shipping.as_ref());
        let basket = build_basket(&order.items)?;
        let amount = order.total.provider_amount();

        if let Some(basket) = &basket {
            let basket_total = round_to_pence(basket.total()?);
            if basket_total != amount {
                warn!(
                    order_id = %order.order_id,
                    %basket_total,
                    %amount,
                    "Basket total does not match order total"
                );
            }
        }

        info!(
            order_id = %order.order_id,
            vendor_tx_code = %vendor_tx_code,
            %amount,
            currency = %order.total.currency_code,
            basket_lines = basket.as_ref().map_or(0, Basket::len),
            has_delivery = delivery.is_some(),
            email = order.contact_email().map(Email::redacted),
            "Built payment request"
        );

        Ok(Self {
            vendor_tx_code,
            order_id: order.order_id.clone(),
            amount,
            currency: order.total.currency_code,
            description: format!("Order {}", order.order_id),
            billing,
            delivery,
            basket,
        })
    }

    /// Flat provider fields for everything except the basket.
    #[must_use]
    pub fn provider_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::from([
            ("VendorTxCode".to_owned(), self.vendor_tx_code.to_string()),
            ("Amount".to_owned(), format!("{:.2}", self.amount)),
            ("Currency".to_owned(), self.currency.code().to_owned()),
            ("Description".to_owned(), self.description.clone()),
        ]);
        fields.extend(self.billing.to_provider_fields(AddressKind::Billing));
        if let Some(delivery) = &self.delivery {
            fields.extend(delivery.to_provider_fields(AddressKind::Delivery));
        }
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use payform_core::{Price, ProductId};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::address::AddressRecord;
    use crate::basket::{Adjustment, AdjustmentType, LineItem, PurchasedProduct};
    use crate::error::BasketError;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn order() -> Order {
        Order {
            order_id: OrderId::new("42"),
            email: Some(Email::parse("jo@example.com").unwrap()),
            total: Price::new(dec!(24.00), CurrencyCode::GBP),
            billing: AddressRecord {
                given_name: "Jo".to_owned(),
                family_name: "Bloggs".to_owned(),
                locality: "Bristol".to_owned(),
                country_code: "GB".to_owned(),
                ..AddressRecord::default()
            },
            shipping: None,
            items: vec![LineItem {
                label: "T-shirt".to_owned(),
                purchased_product: Some(PurchasedProduct {
                    product_id: ProductId::new("7"),
                    sku: "TS-RED/L".to_owned(),
                }),
                quantity: dec!(2),
                unit_price: dec!(12.00),
                adjustments: vec![Adjustment::new(AdjustmentType::Tax, dec!(4.00))],
            }],
        }
    }

    #[test]
    fn test_vendor_tx_code_format() {
        let code = VendorTxCode::generate("shop-", &OrderId::new("42"), at());
        assert_eq!(code.as_str(), format!("shop-42-{}", at().timestamp()));
    }

    #[test]
    fn test_vendor_tx_code_is_capped_keeping_timestamp() {
        let long_id = OrderId::new("9".repeat(60));
        let code = VendorTxCode::generate("prefix-", &long_id, at());

        assert_eq!(code.as_str().len(), VendorTxCode::MAX_LENGTH);
        assert!(code.as_str().starts_with("prefix-999"));
        assert!(code.as_str().ends_with(&format!("-{}", at().timestamp())));
    }

    #[test]
    fn test_build_request() {
        let code = VendorTxCode::generate("", &OrderId::new("42"), at());
        let request = PaymentRequest::build(&order(), code.clone()).unwrap();

        assert_eq!(request.vendor_tx_code, code);
        assert_eq!(request.amount, dec!(24.00));
        assert_eq!(request.currency, CurrencyCode::GBP);
        assert_eq!(request.description, "Order 42");
        assert_eq!(request.billing.firstname.as_deref(), Some("Jo"));
        assert_eq!(
            request.billing.email.as_ref().map(Email::as_str),
            Some("jo@example.com")
        );
        assert_eq!(request.delivery, None);
        assert_eq!(request.basket.as_ref().map(Basket::len), Some(1));
    }

    #[test]
    fn test_build_request_without_purchasable_items() {
        let mut order = order();
        order.items.clear();
        let code = VendorTxCode::generate("", &order.order_id, at());

        let request = PaymentRequest::build(&order, code).unwrap();
        assert_eq!(request.basket, None);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("basket").is_none());
        assert!(json.get("delivery").is_none());
    }

    #[test]
    fn test_build_request_propagates_basket_error() {
        let mut order = order();
        order.items[0].quantity = dec!(0);
        let code = VendorTxCode::generate("", &order.order_id, at());

        assert!(matches!(
            PaymentRequest::build(&order, code),
            Err(BasketError::NonPositiveQuantity { line: 0, .. })
        ));
    }

    #[test]
    fn test_delivery_mapped_from_shipping() {
        let mut order = order();
        order.shipping = Some(AddressRecord {
            locality: "Leeds".to_owned(),
            ..AddressRecord::default()
        });
        let code = VendorTxCode::generate("", &order.order_id, at());

        let request = PaymentRequest::build(&order, code).unwrap();
        let delivery = request.delivery.unwrap();
        assert_eq!(delivery.city.as_deref(), Some("Leeds"));
        assert_eq!(delivery.email, None);
    }

    #[test]
    fn test_provider_fields() {
        let code = VendorTxCode::generate("", &OrderId::new("42"), at());
        let request = PaymentRequest::build(&order(), code).unwrap();
        let fields = request.provider_fields();

        assert_eq!(fields.get("Amount").map(String::as_str), Some("24.00"));
        assert_eq!(fields.get("Currency").map(String::as_str), Some("GBP"));
        assert_eq!(fields.get("BillingSurname").map(String::as_str), Some("Bloggs"));
        assert_eq!(
            fields.get("CustomerEMail").map(String::as_str),
            Some("jo@example.com")
        );
        assert!(!fields.keys().any(|k| k.starts_with("Delivery")));
    }
}
