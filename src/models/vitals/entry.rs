use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Browser performance timeline entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    Paint,
    LargestContentfulPaint,
    FirstInput,
    LayoutShift,
    Resource,
}

impl EntryType {
    /// Entry types delivered as observer streams during the settle window.
    pub const OBSERVED: [EntryType; 4] = [
        EntryType::Paint,
        EntryType::LargestContentfulPaint,
        EntryType::FirstInput,
        EntryType::LayoutShift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Paint => "paint",
            EntryType::LargestContentfulPaint => "largest-contentful-paint",
            EntryType::FirstInput => "first-input",
            EntryType::LayoutShift => "layout-shift",
            EntryType::Resource => "resource",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paint" => Ok(EntryType::Paint),
            "largest-contentful-paint" => Ok(EntryType::LargestContentfulPaint),
            "first-input" => Ok(EntryType::FirstInput),
            "layout-shift" => Ok(EntryType::LayoutShift),
            "resource" => Ok(EntryType::Resource),
            other => Err(AuditError::UnknownEntryType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintEntry {
    #[serde(default)]
    pub name: String,
    pub start_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestContentfulPaintEntry {
    pub start_time: f64,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstInputEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub processing_start: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShiftEntry {
    pub value: f64,
    #[serde(default)]
    pub had_recent_input: bool,
}

// Resource timing record as the browser reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTiming {
    pub name: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub transfer_size: Option<u64>,
    #[serde(default)]
    pub initiator_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entryType", rename_all = "kebab-case")]
pub enum PerformanceEntry {
    Paint(PaintEntry),
    LargestContentfulPaint(LargestContentfulPaintEntry),
    FirstInput(FirstInputEntry),
    LayoutShift(LayoutShiftEntry),
    Resource(ResourceTiming),
}

impl PerformanceEntry {
    pub fn entry_type(&self) -> EntryType {
        match self {
            PerformanceEntry::Paint(_) => EntryType::Paint,
            PerformanceEntry::LargestContentfulPaint(_) => EntryType::LargestContentfulPaint,
            PerformanceEntry::FirstInput(_) => EntryType::FirstInput,
            PerformanceEntry::LayoutShift(_) => EntryType::LayoutShift,
            PerformanceEntry::Resource(_) => EntryType::Resource,
        }
    }
}

/// One-shot navigation milestones, in ms relative to the time origin.
/// A milestone of 0 has not been reached yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    #[serde(default)]
    pub navigation_start: f64,
    #[serde(default)]
    pub response_start: f64,
    #[serde(default)]
    pub dom_content_loaded_event_end: f64,
    #[serde(default)]
    pub load_event_end: f64,
}
