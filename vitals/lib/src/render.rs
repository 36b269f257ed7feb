//! HTML rendering of a [`HealthReport`].
//!
//! The document is self-contained (inline styles, no scripts). Sections are
//! always emitted in the same order; a section whose collector failed keeps
//! its heading and table header with an empty body. Every collected string
//! passes through [`html_escape::encode_text`] before it reaches the markup.
//!
//! ## Examples
//!
//! ```no_run
//! use vitals_lib::{collect_with_config, render_html, ReportContext, VitalsConfig};
//!
//! let report = collect_with_config(&VitalsConfig::new());
//! let html = render_html(&report, &ReportContext::for_local_host());
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

use std::borrow::Cow;

use crate::collected::Collected;
use crate::collectors::ConnectivityResult;
use crate::report::{HealthReport, ReportContext};

/// Class for values that look healthy.
pub const GOOD: &str = "status-good";
/// Class for values that need attention.
pub const BAD: &str = "status-bad";

const NOT_AVAILABLE: &str = "not available";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLES: &str = r#"<style>
body { font-family: "Segoe UI", Arial, sans-serif; margin: 2em; color: #222; }
h1 { color: #1f4e79; }
h2 { border-bottom: 1px solid #ccc; padding-bottom: 0.2em; margin-top: 1.5em; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1em; }
th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; }
th { background: #f2f2f2; }
.status-good { color: #1e7e34; font-weight: bold; }
.status-bad { color: #c82333; font-weight: bold; }
.timestamp { color: #666; }
</style>"#;

/// Renders the report as one HTML document.
///
/// The output depends only on `report` and `context`; two renders of the
/// same report differ only in the timestamp line.
pub fn render_html(report: &HealthReport, context: &ReportContext) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>System Health Report - {}</title>\n",
        escape(&context.host_name)
    ));
    html.push_str(STYLES);
    html.push_str("\n</head>\n<body>\n");
    html.push_str(&format!(
        "<h1>System Health Report: {}</h1>\n",
        escape(&context.host_name)
    ));
    html.push_str(&format!(
        "<p class=\"timestamp\">Generated: {}</p>\n",
        context.generated_at.format(TIMESTAMP_FORMAT)
    ));

    system_section(&mut html, report);
    performance_section(&mut html, report);
    storage_section(&mut html, report);
    connectivity_section(&mut html, &report.connectivity);
    updates_section(&mut html, report);
    audio_section(&mut html, report);
    adapters_section(&mut html, report);
    services_section(&mut html, report);

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

fn class_for(good: bool) -> &'static str {
    if good { GOOD } else { BAD }
}

/// Emits a table; `rows` are complete `<tr>` elements.
fn table(html: &mut String, headers: &[&str], rows: impl IntoIterator<Item = String>) {
    html.push_str("<table>\n<thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str(&row);
        html.push('\n');
    }
    html.push_str("</tbody>\n</table>\n");
}

fn row(cells: &[String]) -> String {
    let mut tr = String::from("<tr>");
    for cell in cells {
        tr.push_str(cell);
    }
    tr.push_str("</tr>");
    tr
}

fn cell(text: &str) -> String {
    format!("<td>{}</td>", escape(text))
}

fn status_cell(text: &str, good: bool) -> String {
    format!("<td class=\"{}\">{}</td>", class_for(good), escape(text))
}

// ============================================================================
// Sections
// ============================================================================

fn system_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>System Information</h2>\n");
    let rows = report.system.available().map(|info| {
        vec![
            row(&[cell("Operating System"), cell(&info.os_name)]),
            row(&[cell("Version"), cell(&info.os_version)]),
            row(&[cell("Processor"), cell(&info.processor)]),
            row(&[cell("Computer Name"), cell(&info.computer_name)]),
        ]
    });
    table(html, &["Property", "Value"], rows.unwrap_or_default());
}

fn performance_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>System Performance</h2>\n");

    let cpu = match report.cpu.available() {
        Some(cpu) => format!("{}%", cpu.percent),
        None => NOT_AVAILABLE.to_string(),
    };
    html.push_str(&format!("<p>CPU Usage: {cpu}</p>\n"));

    let memory = match report.memory.available() {
        Some(memory) => format!(
            "{}% ({} GB used of {} GB, {} GB free)",
            memory.usage_percent, memory.used_gb, memory.total_gb, memory.free_gb
        ),
        None => NOT_AVAILABLE.to_string(),
    };
    html.push_str(&format!("<p>Memory Usage: {memory}</p>\n"));
}

fn storage_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>Storage</h2>\n");
    let rows = report.disks.entries().iter().map(|disk| {
        row(&[
            cell(&disk.drive),
            cell(&format!("{}%", disk.usage_percent)),
            cell(&format!("{} GB", disk.total_gb)),
            cell(&format!("{} GB", disk.free_gb)),
        ])
    });
    table(html, &["Drive", "Usage", "Total", "Free"], rows);
}

fn connectivity_section(html: &mut String, results: &[ConnectivityResult]) {
    html.push_str("<h2>Network Connectivity</h2>\n");
    let rows = results.iter().map(|result| {
        let status = match &result.reachable {
            Collected::Available(true) => status_cell("Connected", true),
            Collected::Available(false) => status_cell("Not Connected", false),
            Collected::Unavailable { .. } => status_cell("Probe Failed", false),
        };
        row(&[cell(&result.host), status])
    });
    table(html, &["Host", "Status"], rows);
}

fn updates_section(html: &mut String, report: &HealthReport) {
    html.push_str(&format!("<h2>{}</h2>\n", report.platform.updates_heading()));
    let (text, good) = match report.pending_updates.available() {
        Some(count) => (count.0.to_string(), count.is_up_to_date()),
        None => ("Unavailable".to_string(), false),
    };
    html.push_str(&format!(
        "<p>Pending updates: <span class=\"{}\">{}</span></p>\n",
        class_for(good),
        text
    ));
}

fn audio_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>Audio Devices</h2>\n");
    let rows = report.audio.entries().iter().map(|device| {
        row(&[
            cell(&device.name),
            cell(&device.description),
            status_cell(&device.status, device.is_ok()),
            cell(&device.status_message),
        ])
    });
    table(html, &["Name", "Description", "Status", "Details"], rows);
}

fn adapters_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>Network Adapters</h2>\n");
    let rows = report.adapters.entries().iter().map(|adapter| {
        let addresses = adapter
            .ipv4_addresses
            .iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        row(&[
            cell(&adapter.name),
            cell(&adapter.description),
            status_cell(&adapter.status, true),
            cell(&format!("{} Mbps", adapter.link_speed_mbps)),
            cell(&addresses),
            cell(&adapter.mac_address),
        ])
    });
    table(
        html,
        &["Name", "Description", "Status", "Speed", "IPv4 Address", "MAC Address"],
        rows,
    );
}

fn services_section(html: &mut String, report: &HealthReport) {
    html.push_str("<h2>Critical Services</h2>\n");
    let rows = report.services.entries().iter().map(|service| {
        row(&[
            cell(&service.display_name),
            status_cell(&service.state.to_string(), service.is_running()),
            cell(&service.start_type.to_string()),
        ])
    });
    table(html, &["Service", "Status", "Startup Type"], rows);
}
