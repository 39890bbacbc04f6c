//! File-system implementation of the `EventStore` trait.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use eventlog_core::clock::Clock;
use eventlog_core::error::StoreError;
pub use eventlog_core::event::SERVER_LOG_FILE;
use eventlog_core::event::{Event, PartitionKey};
use eventlog_core::store::{EventStore, LineSequence, ServerLogLevel};

/// Event store backed by one append-only file per partition.
///
/// Appends to the same partition are serialized through a per-partition
/// mutex; appends to different partitions proceed independently. Every
/// operation opens its file, uses it and drops the handle before returning.
///
/// I/O error messages name files relative to the root, so they can be shown
/// to clients without exposing the host layout.
pub struct FileEventStore {
    root: PathBuf,
    server_log_path: PathBuf,
    clock: Arc<dyn Clock>,
    partition_locks: DashMap<PathBuf, Arc<Mutex<()>>>,
    server_log_lock: Mutex<()>,
}

impl FileEventStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the root directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            StoreError::io(
                format!("unable to create log directory {}", root.display()),
                e,
            )
        })?;
        let server_log_path = root.join(SERVER_LOG_FILE);
        Ok(Self {
            root,
            server_log_path,
            clock,
            partition_locks: DashMap::new(),
            server_log_lock: Mutex::new(()),
        })
    }

    /// The directory all logs are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the server log file.
    #[must_use]
    pub fn server_log_path(&self) -> &Path {
        &self.server_log_path
    }

    /// Absolute location of the partition file for `key`.
    #[must_use]
    pub fn partition_path(&self, key: &PartitionKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn partition_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        self.partition_locks
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }
}

impl fmt::Debug for FileEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEventStore")
            .field("root", &self.root)
            .field("partitions", &self.partition_locks.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    #[instrument(skip(self, event), fields(service_name = %event.service_name, server_id = %event.server_id, date = %event.date))]
    async fn append(&self, event: &Event) -> Result<PartitionKey, StoreError> {
        let key = event.validate()?;
        let path = self.partition_path(&key);

        let lock = self.partition_lock(&path);
        let _guard = lock.lock().await;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::io(
                    format!("unable to create directory for log {}", self.relative(dir)),
                    e,
                )
            })?;
        }
        append_line(&path, &self.relative(&path), &event.to_line()).await?;

        debug!(partition = %key, "appended event");
        Ok(key)
    }

    async fn retrieve_sequence(&self, key: &PartitionKey) -> Result<LineSequence, StoreError> {
        let path = self.partition_path(key);
        open_lines(&path, &self.relative(&path))
            .await?
            .ok_or_else(|| StoreError::PartitionNotFound(key.clone()))
    }

    async fn retrieve_server_log(&self) -> Result<LineSequence, StoreError> {
        open_lines(&self.server_log_path, SERVER_LOG_FILE)
            .await?
            .ok_or(StoreError::ServerLogNotFound)
    }

    async fn record(&self, level: ServerLogLevel, message: &str) -> Result<(), StoreError> {
        match level {
            ServerLogLevel::Info => info!(target: "server_log", "{message}"),
            ServerLogLevel::Warn => warn!(target: "server_log", "{message}"),
            ServerLogLevel::Severe => error!(target: "server_log", "{message}"),
        }

        let message = message.replace(['\n', '\r'], " ");
        let line = format!("[{}]-[{level}] {message}\n", self.clock.timestamp());

        let _guard = self.server_log_lock.lock().await;
        append_line(&self.server_log_path, SERVER_LOG_FILE, &line).await
    }
}

/// Appends `line` in a single write, creating the file if it is missing.
/// `name` identifies the file in error messages.
async fn append_line(path: &Path, name: &str, line: &str) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| StoreError::io(format!("unable to open log {name}"), e))?;
    file.write_all(line.as_bytes())
        .await
        .map_err(|e| StoreError::io(format!("unable to write to log {name}"), e))?;
    file.flush()
        .await
        .map_err(|e| StoreError::io(format!("unable to write to log {name}"), e))
}

/// Opens `path` for line reading; `Ok(None)` when no file exists there,
/// including when a parent component is a regular file.
async fn open_lines(path: &Path, name: &str) -> Result<Option<LineSequence>, StoreError> {
    match File::open(path).await {
        Ok(file) => Ok(Some(LineSequence::new(BufReader::new(file)))),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(e) => Err(StoreError::io(format!("unable to open log {name}"), e)),
    }
}
