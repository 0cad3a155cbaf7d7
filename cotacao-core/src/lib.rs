#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the cotacao-core crate.
//! [cotacao_core]: https://docs.rs/cotacao_core/latest/cotacao_core/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the quotation relay.
///
/// This module contains the payload served by the upstream price API, the
/// records persisted by the relay and the line written by the requester,
/// together with the functions that pull a bid out of a raw payload.
///
/// The models are plain data structures. Persistence and transport live in
/// the adapter crates.
pub mod models;

/// Interface traits for the quotation relay.
///
/// This module contains the "ports" in the hexagonal architecture pattern:
/// the relay only talks to its persistence sink through these traits, which
/// lets tests inject a fake sink in place of the SQLite implementation.
pub mod ports;

pub use models::{DecodeError, PAIR, decode_bid, extract_bid};
