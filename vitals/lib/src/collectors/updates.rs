use serde::Serialize;

use crate::collected::{Collected, Collector};
use crate::probe::SystemProbe;

/// Number of updates available but not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PendingUpdateCount(pub u64);

impl PendingUpdateCount {
    pub fn is_up_to_date(self) -> bool {
        self.0 == 0
    }
}

pub fn collect(probe: &dyn SystemProbe) -> Collected<PendingUpdateCount> {
    Collected::from_result(
        Collector::PendingUpdates,
        probe.pending_updates().map(PendingUpdateCount),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeProbe;

    #[test]
    fn test_count_is_passed_through() {
        let probe = FakeProbe {
            updates: Some(4),
            ..Default::default()
        };
        let count = collect(&probe);
        assert_eq!(count, Collected::Available(PendingUpdateCount(4)));
        assert!(!count.available().unwrap().is_up_to_date());
    }

    #[test]
    fn test_zero_is_up_to_date() {
        assert!(PendingUpdateCount(0).is_up_to_date());
    }

    #[test]
    fn test_search_failure_does_not_abort() {
        let count = collect(&FakeProbe::default());
        assert!(!count.is_available());
    }
}
