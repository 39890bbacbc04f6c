//! Event Logger Store — file-system implementation of `EventStore`.
//!
//! Layout under the log root:
//!
//! ```text
//! {root}/server_log.log
//! {root}/{service_name}/{server_id}/{date}.log
//! ```

pub mod file_event_store;

pub use file_event_store::FileEventStore;
