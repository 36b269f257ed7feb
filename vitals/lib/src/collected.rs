//! The result wrapper every collector returns.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::error::ProbeError;

/// Identifies which collector produced a result.
///
/// Used in warning output so the operator can tell which section of the
/// report is blank and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Collector {
    SystemInfo,
    CpuUsage,
    MemoryUsage,
    DiskUsage,
    NetworkConnectivity,
    PendingUpdates,
    AudioDevices,
    NetworkAdapters,
    CriticalServices,
}

/// Outcome of one collector.
///
/// Either the fully populated record or an explicit unavailable marker with
/// the reason. There is no partially populated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Collected<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Collected<T> {
    /// Wraps a probe result, logging a warning when it failed.
    pub fn from_result(collector: Collector, result: Result<T, ProbeError>) -> Self {
        match result {
            Ok(value) => Collected::Available(value),
            Err(err) => Self::failed(collector, err.to_string()),
        }
    }

    /// Marks a collector as failed, logging a warning with the reason.
    pub fn failed(collector: Collector, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(collector = %collector, "{collector} unavailable: {reason}");
        Self::unavailable(reason)
    }

    /// Creates an unavailable result without logging.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Collected::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Collected::Available(_))
    }

    /// Returns the value if the collector succeeded.
    pub fn available(&self) -> Option<&T> {
        match self {
            Collected::Available(value) => Some(value),
            Collected::Unavailable { .. } => None,
        }
    }

    /// Returns the failure reason if the collector failed.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Collected::Available(_) => None,
            Collected::Unavailable { reason } => Some(reason),
        }
    }

}

impl<T> Collected<Vec<T>> {
    /// Entries to render; an unavailable list renders like an empty one.
    pub fn entries(&self) -> &[T] {
        match self {
            Collected::Available(items) => items,
            Collected::Unavailable { .. } => &[],
        }
    }
}
