#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the auction browser and the subscription checkout.
///
/// The models in this module are data structures with minimal business logic. Most of
/// them mirror the JSON the backend exchanges, with the (de)serialization quirks of
/// that boundary (numbers sent as strings, dates with or without a time part)
/// absorbed at the type level.
pub mod models;

/// Interface traits for the auction browser and the subscription checkout.
///
/// This module contains the "ports" in the hexagonal architecture pattern. The
/// controllers are written against these traits; the HTTP client, the SQLite
/// credential store and the payment gateway are adapters implementing them.
pub mod ports;
