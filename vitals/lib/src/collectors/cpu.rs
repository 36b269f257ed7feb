use serde::Serialize;
use std::time::Duration;

use super::round2;
use crate::collected::{Collected, Collector};
use crate::probe::SystemProbe;

/// Processor utilization over the sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuUsage {
    pub percent: f64,
}

/// Samples processor utilization over `window` (1 second by default).
pub fn collect(probe: &dyn SystemProbe, window: Duration) -> Collected<CpuUsage> {
    let sample = probe.sample_cpu(window).map(|percent| CpuUsage {
        percent: round2(percent.clamp(0.0, 100.0)),
    });
    Collected::from_result(Collector::CpuUsage, sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeProbe;

    #[test]
    fn test_sample_is_rounded() {
        let probe = FakeProbe {
            cpu: Some(12.3456),
            ..Default::default()
        };
        let usage = collect(&probe, Duration::from_secs(1));
        assert_eq!(usage, Collected::Available(CpuUsage { percent: 12.35 }));
    }

    #[test]
    fn test_counter_overshoot_is_clamped() {
        let probe = FakeProbe {
            cpu: Some(100.4),
            ..Default::default()
        };
        let usage = collect(&probe, Duration::from_secs(1));
        assert_eq!(usage.available().unwrap().percent, 100.0);
    }

    #[test]
    fn test_failed_sample_is_unavailable() {
        let usage = collect(&FakeProbe::default(), Duration::from_secs(1));
        assert!(!usage.is_available());
    }
}
