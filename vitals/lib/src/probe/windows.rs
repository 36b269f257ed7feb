//! Windows queries, issued through PowerShell and read back as JSON.
//!
//! `ConvertTo-Json` emits a bare object when a pipeline yields one item and
//! an array otherwise, so every parser here accepts both shapes.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::net::Ipv4Addr;
use std::time::Duration;

use super::command;
use super::{RawAdapter, RawService, RawSoundDevice, ServiceRunState, ServiceStartType};
use crate::error::ProbeError;

const POWERSHELL_CANDIDATES: [&str; 2] = ["powershell", "pwsh"];

const PENDING_UPDATES_SCRIPT: &str = "$session = New-Object -ComObject Microsoft.Update.Session; \
     $result = $session.CreateUpdateSearcher().Search('IsInstalled=0'); \
     $result.Updates.Count";

const SOUND_DEVICES_SCRIPT: &str = "Get-CimInstance -ClassName Win32_SoundDevice | \
     Select-Object Name,Description,Availability,ConfigManagerErrorCode | \
     ConvertTo-Json -Compress";

const ADAPTERS_SCRIPT: &str = "$ips = Get-NetIPAddress -AddressFamily IPv4 -ErrorAction SilentlyContinue; \
     Get-NetAdapter | ForEach-Object { $index = $_.ifIndex; [pscustomobject]@{ \
     Name = $_.Name; InterfaceDescription = $_.InterfaceDescription; Status = [string]$_.Status; \
     LinkSpeed = $_.LinkSpeed; MacAddress = $_.MacAddress; \
     IPv4 = @($ips | Where-Object InterfaceIndex -eq $index | ForEach-Object { $_.IPAddress }) } } | \
     ConvertTo-Json -Compress";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CimSoundDevice {
    name: Option<String>,
    description: Option<String>,
    availability: Option<u32>,
    config_manager_error_code: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NetAdapter {
    name: String,
    #[serde(default)]
    interface_description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    link_speed: Option<String>,
    #[serde(default)]
    mac_address: Option<String>,
    #[serde(rename = "IPv4", default)]
    ipv4: Option<OneOrMany<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WinService {
    name: String,
    display_name: Option<String>,
    status: Option<String>,
    start_type: Option<String>,
}

/// Locates Windows PowerShell, falling back to PowerShell 7.
fn powershell_program() -> Result<&'static str, ProbeError> {
    POWERSHELL_CANDIDATES
        .into_iter()
        .find(|candidate| which::which(candidate).is_ok())
        .ok_or(ProbeError::MissingTool("powershell"))
}

fn powershell_args(script: &str) -> [&str; 4] {
    ["-NoProfile", "-NonInteractive", "-Command", script]
}

/// Runs a PowerShell script and returns its stdout.
fn powershell(script: &str, timeout: Duration) -> Result<String, ProbeError> {
    command::run_checked(powershell_program()?, &powershell_args(script), timeout)
}

/// Parses `ConvertTo-Json` output; empty output is an empty list.
fn parse_json_list<T: DeserializeOwned>(
    what: &'static str,
    text: &str,
) -> Result<Vec<T>, ProbeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<OneOrMany<T>>(text)
        .map(Vec::from)
        .map_err(|e| ProbeError::Parse {
            what,
            message: e.to_string(),
        })
}

/// Quotes a value as a PowerShell single-quoted string literal.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub(crate) fn pending_updates(timeout: Duration) -> Result<u64, ProbeError> {
    let stdout = powershell(PENDING_UPDATES_SCRIPT, timeout)?;
    parse_update_count(&stdout)
}

fn parse_update_count(text: &str) -> Result<u64, ProbeError> {
    let text = text.trim();
    text.parse::<u64>().map_err(|_| ProbeError::Parse {
        what: "update count",
        message: format!("expected an integer, got {text:?}"),
    })
}

pub(crate) fn sound_devices(timeout: Duration) -> Result<Vec<RawSoundDevice>, ProbeError> {
    let stdout = powershell(SOUND_DEVICES_SCRIPT, timeout)?;
    parse_sound_devices(&stdout)
}

fn parse_sound_devices(text: &str) -> Result<Vec<RawSoundDevice>, ProbeError> {
    let devices: Vec<CimSoundDevice> = parse_json_list("Win32_SoundDevice", text)?;
    Ok(devices
        .into_iter()
        .map(|d| RawSoundDevice {
            name: d.name.unwrap_or_default(),
            description: d.description.unwrap_or_default(),
            status_code: d.availability,
            config_error_code: d.config_manager_error_code,
        })
        .collect())
}

pub(crate) fn adapters(timeout: Duration) -> Result<Vec<RawAdapter>, ProbeError> {
    let stdout = powershell(ADAPTERS_SCRIPT, timeout)?;
    parse_adapters(&stdout)
}

fn parse_adapters(text: &str) -> Result<Vec<RawAdapter>, ProbeError> {
    let adapters: Vec<NetAdapter> = parse_json_list("Get-NetAdapter", text)?;
    Ok(adapters
        .into_iter()
        .map(|a| RawAdapter {
            name: a.name,
            description: a.interface_description.unwrap_or_default(),
            status: a.status.unwrap_or_default(),
            link_speed: a.link_speed.unwrap_or_default(),
            ipv4_addresses: a
                .ipv4
                .map(Vec::from)
                .unwrap_or_default()
                .iter()
                .filter_map(|ip| ip.parse::<Ipv4Addr>().ok())
                .collect(),
            mac_address: a.mac_address.filter(|m| !m.is_empty()),
        })
        .collect())
}

pub(crate) fn service(id: &str, timeout: Duration) -> Result<Option<RawService>, ProbeError> {
    let script = format!(
        "Get-Service -Name {} -ErrorAction SilentlyContinue | \
         Select-Object Name,DisplayName,@{{n='Status';e={{[string]$_.Status}}}},@{{n='StartType';e={{[string]$_.StartType}}}} | \
         ConvertTo-Json -Compress",
        quote(id)
    );
    let program = powershell_program()?;
    let args = powershell_args(&script);
    let output = command::run(program, &args, timeout)?;
    service_lookup(output.success(), &output.stdout)
        .unwrap_or_else(|| Err(command::failed(program, &args, &output)))
}

/// Interprets the exit status and stdout of a `Get-Service` lookup.
///
/// An unknown name leaves `$?` false, so `-Command` exits 1 with nothing on
/// stdout; that is a missing service. `None` means the script failed for
/// some other reason.
fn service_lookup(
    success: bool,
    stdout: &str,
) -> Option<Result<Option<RawService>, ProbeError>> {
    if success || stdout.trim().is_empty() {
        Some(parse_service(stdout))
    } else {
        None
    }
}

fn parse_service(text: &str) -> Result<Option<RawService>, ProbeError> {
    let services: Vec<WinService> = parse_json_list("Get-Service", text)?;
    Ok(services.into_iter().next().map(|s| RawService {
        display_name: s.display_name.unwrap_or_else(|| s.name.clone()),
        id: s.name,
        state: s
            .status
            .as_deref()
            .map(ServiceRunState::from_windows)
            .unwrap_or(ServiceRunState::Unknown),
        start_type: s
            .start_type
            .as_deref()
            .map(ServiceStartType::from_windows)
            .unwrap_or(ServiceStartType::Unknown),
    }))
}
