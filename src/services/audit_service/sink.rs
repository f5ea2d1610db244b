use crate::models::AuditReport;
use crate::services::audit_service::render::{render_overlay, render_text};
use log::{debug, info};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Where a finished audit is displayed. Display never fails.
pub trait ReportSink: Send + Sync {
    fn display(&self, report: &AuditReport);
}

// Writes the text summary to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn display(&self, report: &AuditReport) {
        info!("\n{}", render_text(report));
    }
}

pub const DEFAULT_OVERLAY_CAPACITY: usize = 256;

#[derive(Debug)]
struct Panels {
    by_id: HashMap<Uuid, String>,
    // insertion order, oldest first
    order: VecDeque<Uuid>,
    capacity: usize,
}

/// Rendered overlay panels, keyed by audit id, until dismissed.
///
/// Holds at most `capacity` panels; showing a new one past that evicts the
/// oldest still on the board.
#[derive(Debug, Clone)]
pub struct OverlayBoard {
    panels: Arc<RwLock<Panels>>,
}

impl Default for OverlayBoard {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OVERLAY_CAPACITY)
    }
}

impl OverlayBoard {
    pub fn with_capacity(capacity: usize) -> Self {
        OverlayBoard {
            panels: Arc::new(RwLock::new(Panels {
                by_id: HashMap::new(),
                order: VecDeque::new(),
                capacity: capacity.max(1),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Panels> {
        self.panels
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Panels> {
        self.panels
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity
    }

    pub fn get(&self, id: &Uuid) -> Option<String> {
        self.read().by_id.get(id).cloned()
    }

    /// Returns whether a panel was showing.
    pub fn dismiss(&self, id: &Uuid) -> bool {
        let mut panels = self.write();
        if panels.by_id.remove(id).is_none() {
            return false;
        }
        panels.order.retain(|shown| shown != id);
        true
    }

    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportSink for OverlayBoard {
    fn display(&self, report: &AuditReport) {
        let html = render_overlay(report);
        let mut panels = self.write();
        if panels.by_id.insert(report.id, html).is_none() {
            panels.order.push_back(report.id);
        }
        while panels.order.len() > panels.capacity {
            if let Some(oldest) = panels.order.pop_front() {
                panels.by_id.remove(&oldest);
                debug!("overlay board full, evicted {}", oldest);
            }
        }
    }
}

pub fn display_results(report: &AuditReport, sinks: &[Arc<dyn ReportSink>]) {
    for sink in sinks {
        sink.display(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metrics, Rating, ResourceSummary};
    use chrono::Utc;

    fn report() -> AuditReport {
        AuditReport {
            id: Uuid::new_v4(),
            url: "https://example.com/".to_string(),
            timestamp: Utc::now(),
            metrics: Metrics::new(),
            resources: vec![],
            resource_summary: ResourceSummary::default(),
            score: 100,
            rating: Rating::Excellent,
            deductions: vec![],
        }
    }

    #[test]
    fn overlay_shows_until_dismissed() {
        let board = OverlayBoard::default();
        let report = report();
        let sinks: Vec<Arc<dyn ReportSink>> = vec![Arc::new(board.clone()), Arc::new(LogSink)];
        display_results(&report, &sinks);

        let html = board.get(&report.id).unwrap();
        assert!(html.contains("OVERALL SCORE: 100/100"));

        assert!(board.dismiss(&report.id));
        assert!(board.get(&report.id).is_none());
        assert!(!board.dismiss(&report.id));
        assert!(board.is_empty());
    }

    #[test]
    fn board_evicts_oldest_past_capacity() {
        let board = OverlayBoard::with_capacity(3);
        let reports: Vec<AuditReport> = (0..10).map(|_| report()).collect();
        for report in &reports {
            board.display(report);
            assert!(board.len() <= 3);
        }

        assert_eq!(board.len(), 3);
        for old in &reports[..7] {
            assert!(board.get(&old.id).is_none());
        }
        for recent in &reports[7..] {
            assert!(board.get(&recent.id).is_some());
        }
    }

    #[test]
    fn dismissed_panels_free_their_slot() {
        let board = OverlayBoard::with_capacity(2);
        let (first, second, third) = (report(), report(), report());
        board.display(&first);
        board.display(&second);
        assert!(board.dismiss(&first.id));

        board.display(&third);
        assert_eq!(board.len(), 2);
        assert!(board.get(&second.id).is_some());
        assert!(board.get(&third.id).is_some());
    }

    #[test]
    fn zero_capacity_still_shows_the_latest() {
        let board = OverlayBoard::with_capacity(0);
        let (first, second) = (report(), report());
        board.display(&first);
        board.display(&second);

        assert_eq!(board.capacity(), 1);
        assert!(board.get(&first.id).is_none());
        assert!(board.get(&second.id).is_some());
    }
}
