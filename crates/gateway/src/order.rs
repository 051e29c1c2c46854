//! Order export consumed by the payment request builder.

use payform_core::{Email, OrderId, Price};
use serde::{Deserialize, Serialize};

use crate::address::AddressRecord;
use crate::basket::LineItem;

/// The slice of an order the payment provider needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    /// Order contact email; preferred over the billing profile's.
    #[serde(default, deserialize_with = "payform_core::types::email::deserialize_optional")]
    pub email: Option<Email>,
    pub total: Price,
    pub billing: AddressRecord,
    /// `None` when the order has no shipping profile.
    #[serde(default)]
    pub shipping: Option<AddressRecord>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Order {
    /// Email to send with the billing details.
    #[must_use]
    pub fn contact_email(&self) -> Option<&Email> {
        self.email.as_ref().or(self.billing.email.as_ref())
    }
}
