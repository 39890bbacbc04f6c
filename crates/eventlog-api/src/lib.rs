//! Event Logger HTTP gateway.
//!
//! Translates HTTP requests into `EventStore` calls and renders the results
//! as plain text.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
