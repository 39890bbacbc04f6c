//! Server configuration, resolved once at startup.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Port the server listens on unless `PORT` is set.
pub const DEFAULT_PORT: u16 = 45456;

/// Interface the server binds unless `HOST` is set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Directory name, under the working directory, used unless `LOG_DIR` is set.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Settings shared by the store and the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Root directory for partition files and the server log.
    pub log_dir: PathBuf,
}

impl Config {
    /// Reads `HOST`, `PORT` and `LOG_DIR` from the environment, resolving
    /// relative paths against the working directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid port number and
    /// `AppError::Server` if the working directory cannot be determined.
    pub fn from_env() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Self::from_lookup(|name| std::env::var(name).ok(), &cwd)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid port number.
    pub fn from_lookup<F>(lookup: F, cwd: &Path) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let log_dir = cwd.join(lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_owned()));
        Ok(Self {
            host,
            port,
            log_dir,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form a valid
    /// socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
