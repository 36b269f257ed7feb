use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use vitals_lib::{
    Collected, HostOs, ReportContext, VitalsConfig, VitalsError, generate_report_with,
    render_html, report,
};

mod fixtures;

fn context(second: u32) -> ReportContext {
    let at = NaiveDate::from_ymd_opt(2025, 1, 6)
        .unwrap()
        .and_hms_opt(8, 0, second)
        .unwrap();
    ReportContext::new("FRONTDESK-01", at)
}

fn offline_config() -> VitalsConfig {
    VitalsConfig::new().probe_hosts(["8.8.8.8", "www.google.com"])
}

#[test]
fn test_memory_renders_75_percent() {
    let probe = fixtures::healthy_workstation();
    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    let html = render_html(&report, &context(0));
    assert!(html.contains("Memory Usage: 75%"));
}

#[test]
fn test_unreachable_targets_render_not_connected() {
    let mut probe = fixtures::healthy_workstation();
    probe.reachable.insert("8.8.8.8".to_string(), false);
    probe.reachable.insert("www.google.com".to_string(), false);

    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    let html = render_html(&report, &context(0));
    assert_eq!(
        html.matches(r#"<td class="status-bad">Not Connected</td>"#).count(),
        2
    );
}

#[test]
fn test_zero_updates_render_good() {
    let probe = fixtures::healthy_workstation();
    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    let html = render_html(&report, &context(0));
    assert!(html.contains(r#"<span class="status-good">0</span>"#));
}

#[test]
fn test_missing_services_are_skipped() {
    let probe = fixtures::healthy_workstation();
    let report = report::collect(&probe, &offline_config(), HostOs::Windows);

    let names: Vec<&str> = report
        .services
        .entries()
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Print Spooler", "Background Intelligent Transfer Service"]
    );
}

#[test]
fn test_only_up_adapters_are_listed() {
    let probe = fixtures::healthy_workstation();
    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    let adapters = report.adapters.entries();
    assert_eq!(adapters.len(), 1);
    assert_eq!(adapters[0].name, "Ethernet");
    assert_eq!(adapters[0].link_speed_mbps, 1.0);
}

#[test]
fn test_update_failure_does_not_abort_run() {
    let mut probe = fixtures::healthy_workstation();
    probe.updates = None;

    let report = report::collect(&probe, &offline_config(), HostOs::Linux);
    assert!(!report.pending_updates.is_available());
    assert!(report.memory.is_available());
    assert!(report.audio.is_available());
}

#[test]
fn test_each_host_gets_its_own_result() {
    let mut probe = fixtures::healthy_workstation();
    probe.reachable.insert("www.google.com".to_string(), true);

    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    assert!(!report.connectivity[0].reachable.is_available());
    assert_eq!(report.connectivity[1].reachable, Collected::Available(true));
}

#[test]
fn test_rerun_differs_only_in_timestamp() {
    let probe = fixtures::healthy_workstation();
    let config = offline_config();

    let first = render_html(&report::collect(&probe, &config, HostOs::Windows), &context(1));
    let second = render_html(&report::collect(&probe, &config, HostOs::Windows), &context(2));

    let differing = first
        .lines()
        .zip(second.lines())
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(first.lines().count(), second.lines().count());
    assert_eq!(differing, 1);
}

#[test]
fn test_generate_report_writes_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("SystemHealthReport.html");
    let config = offline_config().output(&output);

    let path = generate_report_with(
        &fixtures::healthy_workstation(),
        &config,
        HostOs::Windows,
        &context(0),
    )
    .unwrap();

    assert_eq!(path, output);
    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("FRONTDESK-01"));
    assert!(html.contains("<h2>Critical Services</h2>"));
}

#[test]
fn test_generate_report_reports_write_failure() {
    let dir = TempDir::new().unwrap();
    let config = offline_config().output(dir.path().join("missing").join("out.html"));

    let err = generate_report_with(
        &fixtures::StubProbe::default(),
        &config,
        HostOs::Windows,
        &context(0),
    )
    .unwrap_err();
    assert!(matches!(err, VitalsError::ReportWrite { .. }));
}

#[test]
fn test_json_export_marks_unavailable_sections() {
    let mut probe = fixtures::healthy_workstation();
    probe.sound = None;

    let report = report::collect(&probe, &offline_config(), HostOs::Windows);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["audio"]["status"], "unavailable");
    assert_eq!(json["pending_updates"]["data"], 0);
}
