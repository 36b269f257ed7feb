//! Collectors: one query each, normalized into a typed record.
//!
//! Every collector takes a [`SystemProbe`](crate::probe::SystemProbe) and
//! returns [`Collected`](crate::Collected). A failed query becomes an
//! unavailable result and a logged warning; nothing here aborts a run.

pub mod adapters;
pub mod audio;
pub mod connectivity;
pub mod cpu;
pub mod disk;
pub mod services;
pub mod system;
pub mod updates;

pub use adapters::{NetworkAdapter, parse_link_speed};
pub use audio::AudioDevice;
pub use connectivity::ConnectivityResult;
pub use cpu::CpuUsage;
pub use disk::DiskUsageEntry;
pub use services::ServiceStatus;
pub use system::{MemoryUsage, SystemInfo};
pub use updates::PendingUpdateCount;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts bytes to gigabytes (1024³), rounded to two decimals.
pub(crate) fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}
