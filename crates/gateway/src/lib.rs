//! payform Gateway - maps orders onto payment provider requests.
//!
//! Everything in this crate is a pure, synchronous transformation. Nothing
//! here talks to the network or stores state, so every function can be
//! called concurrently on independent inputs.
//!
//! # Modules
//!
//! - [`address`] - Billing/delivery address records to provider customer details
//! - [`basket`] - Line items to a prorated basket
//! - [`response`] - Provider failure statuses to log/user-message outcomes
//! - [`order`] - The order export read by the request builder
//! - [`request`] - The assembled payment request
//! - [`error`] - Basket construction errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod basket;
pub mod error;
pub mod order;
pub mod request;
pub mod response;

pub use address::{
    AddressFields, AddressKind, AddressRecord, CustomerDetails, CustomerField, map_address,
    map_delivery, map_record,
};
pub use basket::{
    Adjustment, AdjustmentType, Basket, BasketItem, LineItem, PurchasedProduct, build_basket,
    sanitize_sku,
};
pub use error::{BasketError, Result};
pub use order::Order;
pub use request::{PaymentRequest, VendorTxCode};
pub use response::{ResponseOutcome, classify, classify_status};
