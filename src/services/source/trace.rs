use crate::error::AuditError;
use crate::models::{
    EntryType, NavigationTiming, PerformanceEntry, PerformanceTrace, ResourceTiming,
};
use crate::services::source::{EntryReceiver, PerformanceSource};
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Replays a captured trace. Each batch is delivered `at_ms` after the
/// observer for its entry type was attached.
#[derive(Debug, Clone)]
pub struct TraceSource {
    trace: Arc<PerformanceTrace>,
}

impl TraceSource {
    pub fn new(trace: PerformanceTrace) -> Self {
        TraceSource {
            trace: Arc::new(trace),
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, AuditError> {
        let trace = serde_json::from_slice::<PerformanceTrace>(bytes)?;
        Ok(Self::new(trace))
    }

    fn batches_for(&self, entry_type: EntryType) -> Vec<(u64, Vec<PerformanceEntry>)> {
        let mut batches: Vec<(u64, Vec<PerformanceEntry>)> = self
            .trace
            .batches
            .iter()
            .filter_map(|batch| {
                let entries: Vec<PerformanceEntry> = batch
                    .entries
                    .iter()
                    .filter(|entry| entry.entry_type() == entry_type)
                    .cloned()
                    .collect();
                (!entries.is_empty()).then_some((batch.at_ms, entries))
            })
            .collect();
        batches.sort_by_key(|(at_ms, _)| *at_ms);
        batches
    }
}

impl PerformanceSource for TraceSource {
    fn location(&self) -> String {
        self.trace.url.clone()
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        self.trace.navigation.clone()
    }

    fn observe(&self, entry_type: EntryType) -> Result<EntryReceiver, AuditError> {
        if !self.trace.supports(entry_type) {
            return Err(AuditError::UnsupportedEntryType(entry_type));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let batches = self.batches_for(entry_type);
        let origin = Instant::now();

        tokio::spawn(async move {
            for (at_ms, entries) in batches {
                let Some(due) = origin.checked_add(Duration::from_millis(at_ms)) else {
                    break;
                };
                tokio::select! {
                    _ = tokio::time::sleep_until(due) => {}
                    _ = tx.closed() => break,
                }
                if tx.send(entries).is_err() {
                    break;
                }
            }
            debug!("replay for {} finished", entry_type);
        });

        Ok(rx)
    }

    fn resource_entries(&self) -> Vec<ResourceTiming> {
        self.trace.resources.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryBatch, LayoutShiftEntry, PaintEntry};

    fn paint(start_time: f64) -> PerformanceEntry {
        PerformanceEntry::Paint(PaintEntry {
            name: "first-contentful-paint".to_string(),
            start_time,
        })
    }

    fn shift(value: f64) -> PerformanceEntry {
        PerformanceEntry::LayoutShift(LayoutShiftEntry {
            value,
            had_recent_input: false,
        })
    }

    fn trace() -> PerformanceTrace {
        PerformanceTrace {
            url: "https://example.com/".to_string(),
            supported_entry_types: Some(vec![EntryType::Paint, EntryType::LayoutShift]),
            navigation: None,
            batches: vec![
                EntryBatch {
                    at_ms: 400,
                    entries: vec![shift(0.02), paint(900.0)],
                },
                EntryBatch {
                    at_ms: 100,
                    entries: vec![shift(0.01)],
                },
            ],
            resources: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn replays_batches_filtered_and_in_order() {
        let source = TraceSource::new(trace());
        let mut rx = source.observe(EntryType::LayoutShift).unwrap();

        assert_eq!(rx.recv().await, Some(vec![shift(0.01)]));
        assert_eq!(rx.recv().await, Some(vec![shift(0.02)]));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn batches_wait_for_their_offset() {
        let source = TraceSource::new(trace());
        let mut rx = source.observe(EntryType::Paint).unwrap();

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some(vec![paint(900.0)]));
    }

    #[tokio::test(start_paused = true)]
    async fn replay_tasks_exit_once_the_audit_reports() {
        use crate::services::{Auditor, SettlePolicy};

        let far_future = PerformanceTrace {
            url: "https://example.com/".to_string(),
            supported_entry_types: None,
            navigation: None,
            batches: vec![EntryBatch {
                at_ms: 1_000_000_000_000,
                entries: vec![shift(0.5), paint(4000.0)],
            }],
            resources: vec![],
        };
        let metrics = tokio::runtime::Handle::current().metrics();
        let before = metrics.num_alive_tasks();

        let auditor = Auditor::new(Arc::new(TraceSource::new(far_future)))
            .with_policy(SettlePolicy::fixed(Duration::from_millis(100)));
        for _ in 0..20 {
            let report = auditor.run_audit().await;
            assert!(report.metrics.is_empty());
        }

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(metrics.num_alive_tasks(), before);
    }

    #[tokio::test]
    async fn unsupported_types_fail_to_observe() {
        let source = TraceSource::new(trace());
        let err = source.observe(EntryType::FirstInput).unwrap_err();
        assert!(matches!(
            err,
            AuditError::UnsupportedEntryType(EntryType::FirstInput)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            TraceSource::from_json(b"{\"batches\": 3}"),
            Err(AuditError::InvalidTrace(_))
        ));
    }
}
