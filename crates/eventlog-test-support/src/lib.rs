//! Shared test doubles and fixtures for the Event Logger.

mod clock;
mod fixtures;
mod store;

pub use clock::FixedClock;
pub use fixtures::sample_event;
pub use store::{FailingEventStore, RecordingEventStore};
