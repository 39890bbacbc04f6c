//! Event fixtures.

use eventlog_core::event::Event;

/// A login event for the given partition, stamped `10:00:00` at `INFO`.
#[must_use]
pub fn sample_event(service_name: &str, server_id: &str, date: &str) -> Event {
    Event {
        service_name: service_name.to_owned(),
        server_id: server_id.to_owned(),
        date: date.to_owned(),
        time: "10:00:00".to_owned(),
        level: "INFO".to_owned(),
        event_type: "login".to_owned(),
        description: "user x logged in".to_owned(),
    }
}
