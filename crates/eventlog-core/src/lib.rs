//! Event Logger Core — shared event model and storage contract.
//!
//! This crate defines the event record, its partition key, the error
//! taxonomy and the `EventStore` trait that storage backends implement.
//! It contains no file-system code.

pub mod clock;
pub mod error;
pub mod event;
pub mod store;
