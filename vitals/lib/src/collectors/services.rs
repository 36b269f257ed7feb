use serde::Serialize;

use crate::collected::{Collected, Collector};
use crate::error::ProbeError;
use crate::probe::{RawService, ServiceRunState, ServiceStartType, SystemProbe};

/// State of one allow-listed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub id: String,
    pub display_name: String,
    pub state: ServiceRunState,
    pub start_type: ServiceStartType,
}

impl ServiceStatus {
    pub fn is_running(&self) -> bool {
        self.state == ServiceRunState::Running
    }
}

impl From<RawService> for ServiceStatus {
    fn from(service: RawService) -> Self {
        Self {
            id: service.id,
            display_name: service.display_name,
            state: service.state,
            start_type: service.start_type,
        }
    }
}

/// Looks up each allow-listed service, in allow-list order.
///
/// Identifiers the host doesn't know are skipped. A lookup that fails
/// outright makes the whole section unavailable.
pub fn collect(probe: &dyn SystemProbe, allow_list: &[String]) -> Collected<Vec<ServiceStatus>> {
    Collected::from_result(Collector::CriticalServices, lookup_all(probe, allow_list))
}

fn lookup_all(
    probe: &dyn SystemProbe,
    allow_list: &[String],
) -> Result<Vec<ServiceStatus>, ProbeError> {
    let mut found = Vec::with_capacity(allow_list.len());
    for id in allow_list {
        match probe.service(id)? {
            Some(service) => found.push(ServiceStatus::from(service)),
            None => tracing::debug!(service = %id, "service not present on this host"),
        }
    }
    Ok(found)
}
