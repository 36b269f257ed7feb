use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, VitalsError};
use crate::platform::HostOs;

/// Default report file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "SystemHealthReport.html";

/// Hosts probed for reachability when none are configured.
pub const DEFAULT_PROBE_HOSTS: [&str; 2] = ["8.8.8.8", "www.google.com"];

const MIN_COMMAND_TIMEOUT_SECS: u64 = 1;

/// Configuration for a report run.
///
/// Use the builder pattern to customize a run, or load a TOML file with
/// [`VitalsConfig::load`]. Every key in the file is optional.
///
/// ## Examples
///
/// ```
/// use vitals_lib::VitalsConfig;
///
/// let config = VitalsConfig::new()
///     .output("report.html")
///     .probe_hosts(["1.1.1.1"]);
/// assert_eq!(config.probe_hosts, vec!["1.1.1.1".to_string()]);
/// ```
///
/// ```toml
/// output = "health.html"
/// probe_hosts = ["8.8.8.8", "intranet.example.com"]
/// critical_services = ["Spooler", "Dnscache"]
/// cpu_sample_millis = 1000
/// command_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VitalsConfig {
    /// Where the HTML report is written
    pub output: PathBuf,
    /// Hosts that receive one reachability probe each
    pub probe_hosts: Vec<String>,
    /// Service identifiers to check; `None` uses the platform allow-list
    pub critical_services: Option<Vec<String>>,
    /// Length of the CPU utilization sample
    pub cpu_sample_millis: u64,
    /// Upper bound for any external command the probes run
    pub command_timeout_secs: u64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            probe_hosts: DEFAULT_PROBE_HOSTS.iter().map(|h| h.to_string()).collect(),
            critical_services: None,
            cpu_sample_millis: 1000,
            command_timeout_secs: 30,
        }
    }
}

impl VitalsConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file.
    ///
    /// ## Errors
    ///
    /// Returns [`VitalsError::ConfigRead`] if the file can't be read and
    /// [`VitalsError::ConfigParse`] if it isn't valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| VitalsError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| VitalsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the report output path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Replace the hosts probed for reachability.
    pub fn probe_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probe_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the critical service allow-list.
    pub fn critical_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_services = Some(services.into_iter().map(Into::into).collect());
        self
    }

    /// Set the CPU sampling window.
    pub fn cpu_sample(mut self, window: Duration) -> Self {
        self.cpu_sample_millis = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the timeout for external commands.
    ///
    /// Stored in whole seconds; partial seconds round up, so the timeout is
    /// never shorter than requested nor below one second.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.command_timeout_secs = secs.max(MIN_COMMAND_TIMEOUT_SECS);
        self
    }

    pub fn cpu_sample_window(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_millis)
    }

    /// The external command timeout; a zero in the file reads as one second.
    pub fn command_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(MIN_COMMAND_TIMEOUT_SECS))
    }

    /// The service identifiers to check on `os`.
    pub fn services_for(&self, os: HostOs) -> Vec<String> {
        match &self.critical_services {
            Some(services) => services.clone(),
            None => os
                .default_critical_services()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
