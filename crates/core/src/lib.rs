//! payform Core - Shared types library.
//!
//! This crate provides common types used across all payform components:
//! - `gateway` - Address, basket and response mapping for the payment provider
//! - `cli` - Command-line shell over the gateway
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no logging, no provider
//! logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and provider statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
