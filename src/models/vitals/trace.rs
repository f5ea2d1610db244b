use crate::models::vitals::entry::{EntryType, NavigationTiming, PerformanceEntry, ResourceTiming};
use serde::{Deserialize, Serialize};

// Entries the browser delivered together, `at_ms` after the audit started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBatch {
    #[serde(default)]
    pub at_ms: u64,
    pub entries: Vec<PerformanceEntry>,
}

/// A captured performance timeline for one page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTrace {
    pub url: String,
    /// `None` means the capturing browser supported every entry type.
    #[serde(default)]
    pub supported_entry_types: Option<Vec<EntryType>>,
    #[serde(default)]
    pub navigation: Option<NavigationTiming>,
    #[serde(default)]
    pub batches: Vec<EntryBatch>,
    #[serde(default)]
    pub resources: Vec<ResourceTiming>,
}

impl PerformanceTrace {
    pub fn supports(&self, entry_type: EntryType) -> bool {
        self.supported_entry_types
            .as_ref()
            .map_or(true, |types| types.contains(&entry_type))
    }
}

// Frames a live page sends over the websocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveMessage {
    Navigation(NavigationTiming),
    Entries { entries: Vec<PerformanceEntry> },
    Resources { resources: Vec<ResourceTiming> },
}
