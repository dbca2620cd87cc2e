//! Domain logic of the QR code admin service.
//!
//! No I/O lives here beyond the Tokio timer used by the search debouncer.
//! The record store and the product catalog are reached through the traits
//! in [`store`], implemented by the `qrcodes-db` and `qrcodes-catalog`
//! crates.

pub mod debounce;
pub mod destination;
pub mod display;
pub mod error;
pub mod listing;
pub mod navigation;
pub mod resolver;
pub mod search;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;
