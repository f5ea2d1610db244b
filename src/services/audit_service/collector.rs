use crate::models::{
    EntryType, MetricName, Metrics, NavigationTiming, PerformanceEntry, SessionState,
};
use log::{debug, warn};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Running cumulative layout shift for one session.
/// Shifts that follow recent user input are not counted.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayoutShiftAccumulator {
    total: f64,
    counted: usize,
    excluded: usize,
}

impl LayoutShiftAccumulator {
    pub fn add(&mut self, value: f64, had_recent_input: bool) {
        if had_recent_input {
            self.excluded += 1;
        } else {
            self.total += value;
            self.counted += 1;
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn counted(&self) -> usize {
        self.counted
    }

    pub fn excluded(&self) -> usize {
        self.excluded
    }
}

// One metric from two navigation milestones; an unreached end mark yields nothing
fn milestone(end: f64, start: f64) -> Option<f64> {
    (end > 0.0).then(|| end - start)
}

// A zero timestamp means the browser never recorded it
fn is_recorded(timestamp: f64) -> bool {
    timestamp != 0.0 && !timestamp.is_nan()
}

/// Metric state for a single audit. Created fresh for every audit run.
#[derive(Debug)]
pub struct AuditSession {
    id: Uuid,
    url: String,
    state: SessionState,
    metrics: Metrics,
    layout_shift: LayoutShiftAccumulator,
    fired: BTreeSet<EntryType>,
}

impl AuditSession {
    pub fn new(url: impl Into<String>) -> Self {
        AuditSession {
            id: Uuid::new_v4(),
            url: url.into(),
            state: SessionState::Collecting,
            metrics: Metrics::new(),
            layout_shift: LayoutShiftAccumulator::default(),
            fired: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn layout_shift(&self) -> &LayoutShiftAccumulator {
        &self.layout_shift
    }

    /// Number of distinct entry types that delivered at least one batch.
    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    pub fn record_navigation(&mut self, timing: &NavigationTiming) {
        let start = timing.navigation_start;
        let milestones = [
            (MetricName::DomContentLoaded, timing.dom_content_loaded_event_end),
            (MetricName::LoadComplete, timing.load_event_end),
            (MetricName::FirstPaint, timing.response_start),
        ];
        for (name, end) in milestones {
            match milestone(end, start) {
                Some(value) => self.metrics.set(name, value),
                None => debug!("{} not reached yet for {}", name, self.url),
            }
        }
    }

    /// Applies one observer callback's entry list.
    pub fn observe(&mut self, entry_type: EntryType, batch: Vec<PerformanceEntry>) {
        if self.state == SessionState::Reported {
            debug!("session {} already reported, ignoring {} batch", self.id, entry_type);
            return;
        }
        if batch.is_empty() {
            return;
        }
        self.fired.insert(entry_type);

        match entry_type {
            EntryType::Paint => {
                if let Some(PerformanceEntry::Paint(first)) = batch.first() {
                    self.metrics
                        .set(MetricName::FirstContentfulPaint, first.start_time);
                }
            }
            EntryType::LargestContentfulPaint => {
                let latest = batch.iter().rev().find_map(|entry| match entry {
                    PerformanceEntry::LargestContentfulPaint(lcp) => Some(lcp.start_time),
                    _ => None,
                });
                if let Some(start_time) = latest {
                    self.metrics.set(MetricName::LargestContentfulPaint, start_time);
                }
            }
            EntryType::FirstInput => {
                for entry in &batch {
                    if let PerformanceEntry::FirstInput(input) = entry {
                        if let (Some(processing_start), Some(start_time)) = (
                            input.processing_start.filter(|t| is_recorded(*t)),
                            input.start_time.filter(|t| is_recorded(*t)),
                        ) {
                            self.metrics
                                .set(MetricName::FirstInputDelay, processing_start - start_time);
                        }
                    }
                }
            }
            EntryType::LayoutShift => {
                for entry in &batch {
                    if let PerformanceEntry::LayoutShift(shift) = entry {
                        self.layout_shift.add(shift.value, shift.had_recent_input);
                    }
                }
                self.metrics
                    .set(MetricName::CumulativeLayoutShift, self.layout_shift.total());
            }
            EntryType::Resource => {
                warn!("resource entries are read in bulk, ignoring observed batch");
            }
        }
    }

    /// Snapshot of the metrics collected so far.
    pub fn collect_metrics(&self) -> Metrics {
        self.metrics.clone()
    }

    pub fn mark_reported(&mut self) {
        self.state = SessionState::Reported;
    }
}
