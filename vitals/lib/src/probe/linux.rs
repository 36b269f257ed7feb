//! Linux queries: package managers, ALSA, sysfs and systemd.
//!
//! The adapter enumeration also serves other Unix hosts, where the sysfs
//! lookups simply find nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::command;
use super::{RawAdapter, RawService, RawSoundDevice, ServiceRunState, ServiceStartType};
use crate::error::ProbeError;

const ASOUND_CARDS: &str = "/proc/asound/cards";
const SYS_CLASS_NET: &str = "/sys/class/net";

/// ALSA exposes no health codes; a listed card is bound to its driver.
const ALSA_CARD_STATUS: u32 = 3;
const ALSA_CARD_CONFIG_ERROR: u32 = 0;

// =============================================================================
// Pending updates
// =============================================================================

pub(crate) fn pending_updates(timeout: Duration) -> Result<u64, ProbeError> {
    if which::which("apt-get").is_ok() {
        let stdout = command::run_checked("apt-get", &["-s", "-q", "upgrade"], timeout)?;
        return Ok(count_apt_upgrades(&stdout));
    }

    if which::which("dnf").is_ok() {
        let args = ["-q", "check-update"];
        let output = command::run("dnf", &args, timeout)?;
        // dnf exits 100 when updates are available and 0 when there are none.
        return match output.code() {
            Some(0) => Ok(0),
            Some(100) => Ok(count_dnf_updates(&output.stdout)),
            _ => Err(command::failed("dnf", &args, &output)),
        };
    }

    Err(ProbeError::MissingTool("apt-get or dnf"))
}

/// Counts `Inst` lines in `apt-get -s upgrade` output.
fn count_apt_upgrades(stdout: &str) -> u64 {
    stdout.lines().filter(|line| line.starts_with("Inst ")).count() as u64
}

/// Counts package lines in `dnf check-update` output.
///
/// Lines look like `bash.x86_64  5.2.26-3.fc40  updates`. Everything after
/// the "Obsoleting Packages" marker repeats packages already counted.
fn count_dnf_updates(stdout: &str) -> u64 {
    stdout
        .lines()
        .take_while(|line| !line.starts_with("Obsoleting"))
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter(|line| line.split_whitespace().count() == 3)
        .count() as u64
}

// =============================================================================
// Sound devices
// =============================================================================

pub(crate) fn sound_devices() -> Result<Vec<RawSoundDevice>, ProbeError> {
    let content = fs::read_to_string(ASOUND_CARDS)?;
    Ok(parse_asound_cards(&content))
}

/// Parses `/proc/asound/cards`.
///
/// Each card takes two lines:
/// ```text
///  0 [PCH            ]: HDA-Intel - HDA Intel PCH
///                       HDA Intel PCH at 0xf7f10000 irq 32
/// ```
fn parse_asound_cards(content: &str) -> Vec<RawSoundDevice> {
    let mut devices: Vec<RawSoundDevice> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let is_header = trimmed.starts_with(|c: char| c.is_ascii_digit()) && trimmed.contains("]:");
        if is_header {
            let rest = &trimmed[trimmed.find("]:").map(|i| i + 2).unwrap_or(0)..];
            let (driver, name) = match rest.split_once(" - ") {
                Some((driver, name)) => (driver.trim(), name.trim()),
                None => ("", rest.trim()),
            };
            devices.push(RawSoundDevice {
                name: name.to_string(),
                description: driver.to_string(),
                status_code: Some(ALSA_CARD_STATUS),
                config_error_code: Some(ALSA_CARD_CONFIG_ERROR),
            });
        } else if let Some(last) = devices.last_mut() {
            // Continuation line carries the long card name.
            last.description = trimmed.to_string();
        }
    }

    devices
}

// =============================================================================
// Network adapters
// =============================================================================

pub(crate) fn adapters() -> Result<Vec<RawAdapter>, ProbeError> {
    let addrs = getifaddrs::getifaddrs()?;

    let mut adapters: BTreeMap<String, RawAdapter> = BTreeMap::new();
    let mut loopback: Vec<String> = Vec::new();

    for ifaddr in addrs {
        let name = ifaddr.name.clone();
        if ifaddr.flags.contains(getifaddrs::InterfaceFlags::LOOPBACK) {
            loopback.push(name);
            continue;
        }

        let entry = adapters.entry(name.clone()).or_insert_with(|| RawAdapter {
            name: name.clone(),
            ..Default::default()
        });

        let up = ifaddr.flags.contains(getifaddrs::InterfaceFlags::UP)
            && ifaddr.flags.contains(getifaddrs::InterfaceFlags::RUNNING);
        entry.status = if up { "Up" } else { "Down" }.to_string();

        match ifaddr.address {
            getifaddrs::Address::V4(v4) => {
                if !entry.ipv4_addresses.contains(&v4.address) {
                    entry.ipv4_addresses.push(v4.address);
                }
            }
            getifaddrs::Address::V6(_) => {}
            getifaddrs::Address::Mac(mac) => {
                if entry.mac_address.is_none() && mac != [0u8; 6] {
                    entry.mac_address = Some(format_mac_address(&mac));
                }
            }
        }
    }

    for name in loopback {
        adapters.remove(&name);
    }

    let sys_net = Path::new(SYS_CLASS_NET);
    Ok(adapters
        .into_values()
        .map(|mut adapter| {
            let dir = sys_net.join(&adapter.name);
            adapter.link_speed = read_link_speed(&dir);
            adapter.description = read_driver(&dir).unwrap_or_else(|| adapter.name.clone());
            adapter
        })
        .collect())
}

/// Formats a MAC address as a colon-separated hex string.
fn format_mac_address(mac: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// Reads `speed` (Mbps) from an interface's sysfs directory.
///
/// Virtual and disconnected interfaces report -1 or refuse the read; both
/// yield an empty string.
fn read_link_speed(dir: &Path) -> String {
    fs::read_to_string(dir.join("speed"))
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&mbps| mbps > 0)
        .map(|mbps| format!("{mbps} Mbps"))
        .unwrap_or_default()
}

fn read_driver(dir: &Path) -> Option<String> {
    fs::read_link(dir.join("device").join("driver"))
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
}

// =============================================================================
// Services
// =============================================================================

pub(crate) fn service(id: &str, timeout: Duration) -> Result<Option<RawService>, ProbeError> {
    if which::which("systemctl").is_err() {
        return Err(ProbeError::MissingTool("systemctl"));
    }

    let unit = if id.ends_with(".service") {
        id.to_string()
    } else {
        format!("{id}.service")
    };
    let stdout = command::run_checked(
        "systemctl",
        &[
            "show",
            &unit,
            "--no-pager",
            "--property=Id,Description,LoadState,ActiveState,SubState,UnitFileState",
        ],
        timeout,
    )?;
    Ok(parse_systemctl_show(id, &stdout))
}

/// Parses `systemctl show` key/value output. A unit whose `LoadState` is
/// `not-found` does not exist on this host.
fn parse_systemctl_show(id: &str, stdout: &str) -> Option<RawService> {
    let props: BTreeMap<&str, &str> = stdout
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect();

    match props.get("LoadState").copied() {
        None | Some("not-found") => return None,
        Some(_) => {}
    }

    let active = props.get("ActiveState").copied().unwrap_or_default();
    let sub = props.get("SubState").copied().unwrap_or_default();
    let display_name = props
        .get("Description")
        .copied()
        .filter(|d| !d.is_empty())
        .unwrap_or(id);

    Some(RawService {
        id: id.to_string(),
        display_name: display_name.to_string(),
        state: ServiceRunState::from_systemd(active, sub),
        start_type: ServiceStartType::from_systemd(
            props.get("UnitFileState").copied().unwrap_or_default(),
        ),
    })
}
