use std::path::PathBuf;
use std::time::Duration;

/// Error types for the Vitals library.
///
/// These are the failures that end a report run or surface to the caller.
/// Individual collector failures never appear here; they are captured as
/// [`Collected::Unavailable`](crate::Collected::Unavailable) instead.
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`VitalsConfig`](crate::VitalsConfig).
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The rendered report could not be written to disk.
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding of the report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single query against the host.
///
/// The `Display` text of a probe error becomes the `reason` of the
/// unavailable result for the collector that issued the query.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The external command could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but reported failure.
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The external command did not finish in time and was killed.
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The query returned something we could not interpret.
    #[error("could not parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    /// A program the query depends on is not installed.
    #[error("`{0}` was not found in PATH")]
    MissingTool(&'static str),

    /// The query has no implementation on this host.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// The query succeeded but reported an impossible value.
    #[error("{0}")]
    Invalid(String),

    /// IO error while reading a system file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for Vitals operations.
pub type Result<T> = std::result::Result<T, VitalsError>;
