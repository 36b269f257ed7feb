//! Workstation health snapshot.
//!
//! Collects hardware identity, utilization, connectivity, pending updates,
//! audio devices, network adapters and critical services from the local
//! machine, then renders the result as one static HTML report.
//!
//! The pipeline is collect → render → write. Each collector goes through the
//! [`SystemProbe`] seam and yields a [`Collected`] value, so a failing query
//! blanks its own section and nothing else.

use std::path::PathBuf;

pub mod classify;
pub mod collected;
pub mod collectors;
pub mod config;
pub mod error;
pub mod platform;
pub mod probe;
pub mod render;
pub mod report;
pub mod writer;

pub use collected::{Collected, Collector};
pub use config::VitalsConfig;
pub use error::{ProbeError, Result, VitalsError};
pub use platform::HostOs;
pub use probe::{HostProbe, SystemProbe};
pub use render::render_html;
pub use report::{HealthReport, ReportContext};
pub use writer::write_report;

/// Collects a report from the local machine.
///
/// ## Examples
///
/// ```no_run
/// use vitals_lib::{collect_with_config, VitalsConfig};
///
/// let config = VitalsConfig::new().probe_hosts(["1.1.1.1"]);
/// let report = collect_with_config(&config);
/// if let Some(memory) = report.memory.available() {
///     println!("memory: {}%", memory.usage_percent);
/// }
/// ```
pub fn collect_with_config(config: &VitalsConfig) -> HealthReport {
    let probe = HostProbe::new(config.command_timeout_duration());
    report::collect(&probe, config, probe.host_os())
}

/// Runs one full collect, render and write cycle against the local machine.
///
/// ## Examples
///
/// ```no_run
/// use vitals_lib::{generate_report, VitalsConfig};
///
/// let path = generate_report(&VitalsConfig::new().output("health.html")).unwrap();
/// println!("Report written to {}", path.display());
/// ```
///
/// ## Errors
///
/// Only a failed write is an error. Collector failures are logged and show
/// up as empty sections.
pub fn generate_report(config: &VitalsConfig) -> Result<PathBuf> {
    let probe = HostProbe::new(config.command_timeout_duration());
    generate_report_with(&probe, config, probe.host_os(), &ReportContext::for_local_host())
}

/// [`generate_report`] with an explicit probe, platform and context.
pub fn generate_report_with(
    probe: &dyn SystemProbe,
    config: &VitalsConfig,
    os: HostOs,
    context: &ReportContext,
) -> Result<PathBuf> {
    let report = report::collect(probe, config, os);
    let unavailable = report.unavailable_count();
    let html = render_html(&report, context);
    let path = write_report(&config.output, &html)?;

    tracing::info!(
        path = %path.display(),
        unavailable,
        "health report written"
    );
    Ok(path)
}
