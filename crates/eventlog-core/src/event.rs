//! The event record and the key that partitions it on disk.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name of the server log file inside the log root. Partition directories
/// share the root with it, so no service may use this name.
pub const SERVER_LOG_FILE: &str = "server_log.log";

/// A single structured event emitted by a producing service.
///
/// Events carry no identity of their own: two identical events appended to
/// the same partition are stored as two separate lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Logical producer identity.
    pub service_name: String,
    /// Instance identity within the service.
    pub server_id: String,
    /// Calendar date of the event, expected as `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time of the event.
    pub time: String,
    /// Severity label such as `INFO`, `WARN` or `SEVERE`.
    pub level: String,
    /// Producer-defined category.
    pub event_type: String,
    /// Free-text payload.
    pub description: String,
}

impl Event {
    /// Checks every field and resolves the partition this event belongs to.
    ///
    /// `description` may be empty; every other field is required. No field
    /// may contain a line break.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate(&self) -> Result<PartitionKey, ValidationError> {
        for (field, value) in self.fields() {
            if value.contains(['\n', '\r']) {
                return Err(ValidationError::LineBreak(field));
            }
        }
        require("time", &self.time)?;
        require("level", &self.level)?;
        require("event_type", &self.event_type)?;
        PartitionKey::new(&self.service_name, &self.server_id, &self.date)
    }

    /// Serializes the event as one newline-terminated storage record.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }

    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("service_name", &self.service_name),
            ("server_id", &self.server_id),
            ("date", &self.date),
            ("time", &self.time),
            ("level", &self.level),
            ("event_type", &self.event_type),
            ("description", &self.description),
        ]
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}",
            self.date,
            self.time,
            self.service_name,
            self.server_id,
            self.level,
            self.event_type,
            self.description
        )
    }
}

/// The (service, server, date) triple that selects one partition.
///
/// Every component is guaranteed to be a single safe path segment, so the
/// key can be joined onto the log root without escaping it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    service_name: String,
    server_id: String,
    date: String,
}

impl PartitionKey {
    /// Builds a key from its raw components.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for an empty component and
    /// `ValidationError::UnsafePathComponent` for anything that is not a plain
    /// file name (separators, `.`/`..`, control or non-ASCII characters).
    /// Returns `ValidationError::ReservedServiceName` for `SERVER_LOG_FILE`.
    pub fn new(service_name: &str, server_id: &str, date: &str) -> Result<Self, ValidationError> {
        path_segment("service_name", service_name)?;
        if service_name == SERVER_LOG_FILE {
            return Err(ValidationError::ReservedServiceName(service_name.to_owned()));
        }
        path_segment("server_id", server_id)?;
        path_segment("date", date)?;
        Ok(Self {
            service_name: service_name.to_owned(),
            server_id: server_id.to_owned(),
            date: date.to_owned(),
        })
    }

    /// The service component.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The server component.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// The date component.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Location of the partition file relative to the log root:
    /// `{service_name}/{server_id}/{date}.log`.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.service_name);
        path.push(&self.server_id);
        path.push(format!("{}.log", self.date));
        path
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}.log", self.service_name, self.server_id, self.date)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn path_segment(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !allowed || value == "." || value == ".." {
        return Err(ValidationError::UnsafePathComponent {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}
