use crate::models::vitals::entry::ResourceTiming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// One fetched sub-resource, as reported in an audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub name: String,
    pub duration: f64,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<ResourceTiming> for ResourceEntry {
    fn from(timing: ResourceTiming) -> Self {
        ResourceEntry {
            name: timing.name,
            duration: timing.duration,
            size: timing.transfer_size.unwrap_or(0),
            kind: timing.initiator_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeTotals {
    pub count: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub total_resources: usize,
    pub total_transfer_bytes: u64,
    pub by_type: BTreeMap<String, TypeTotals>,
}

impl ResourceSummary {
    pub fn total_transfer_kb(&self) -> f64 {
        self.total_transfer_bytes as f64 / 1024.0
    }
}
