use crate::error::AuditError;
use crate::models::{
    EntryType, LiveMessage, NavigationTiming, PerformanceEntry, ResourceTiming,
};
use crate::services::source::{EntryReceiver, PerformanceSource};
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedSender};

/// Source fed by a page that pushes its timeline entries as they happen.
///
/// Entries of a type nobody observes are dropped, except resource timings,
/// which are buffered for the bulk read at audit time.
pub struct LiveSource {
    url: String,
    supported: Option<HashSet<EntryType>>,
    navigation: Mutex<Option<NavigationTiming>>,
    resources: Mutex<Vec<ResourceTiming>>,
    observers: Mutex<HashMap<EntryType, Vec<UnboundedSender<Vec<PerformanceEntry>>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl LiveSource {
    pub fn new(url: impl Into<String>) -> Self {
        LiveSource {
            url: url.into(),
            supported: None,
            navigation: Mutex::new(None),
            resources: Mutex::new(Vec::new()),
            observers: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_supported(mut self, types: impl IntoIterator<Item = EntryType>) -> Self {
        self.supported = Some(types.into_iter().collect());
        self
    }

    pub fn apply(&self, message: LiveMessage) {
        match message {
            LiveMessage::Navigation(timing) => self.set_navigation(timing),
            LiveMessage::Entries { entries } => self.push_entries(entries),
            LiveMessage::Resources { resources } => lock(&self.resources).extend(resources),
        }
    }

    pub fn set_navigation(&self, timing: NavigationTiming) {
        *lock(&self.navigation) = Some(timing);
    }

    /// Groups entries by type and delivers each group as one batch.
    pub fn push_entries(&self, entries: Vec<PerformanceEntry>) {
        let mut grouped: BTreeMap<EntryType, Vec<PerformanceEntry>> = BTreeMap::new();
        for entry in entries {
            if let PerformanceEntry::Resource(timing) = &entry {
                lock(&self.resources).push(timing.clone());
            }
            grouped.entry(entry.entry_type()).or_default().push(entry);
        }

        let mut observers = lock(&self.observers);
        for (entry_type, batch) in grouped {
            let Some(senders) = observers.get_mut(&entry_type) else {
                debug!("no observer for {}, dropping {} entries", entry_type, batch.len());
                continue;
            };
            senders.retain(|tx| tx.send(batch.clone()).is_ok());
        }
    }
}

impl PerformanceSource for LiveSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        lock(&self.navigation).clone()
    }

    fn observe(&self, entry_type: EntryType) -> Result<EntryReceiver, AuditError> {
        if let Some(supported) = &self.supported {
            if !supported.contains(&entry_type) {
                return Err(AuditError::UnsupportedEntryType(entry_type));
            }
        }
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.observers).entry(entry_type).or_default().push(tx);
        Ok(rx)
    }

    fn resource_entries(&self) -> Vec<ResourceTiming> {
        lock(&self.resources).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LargestContentfulPaintEntry, PaintEntry};

    fn lcp(start_time: f64) -> PerformanceEntry {
        PerformanceEntry::LargestContentfulPaint(LargestContentfulPaintEntry {
            start_time,
            size: None,
        })
    }

    #[test]
    fn fans_out_entries_by_type() {
        let source = LiveSource::new("https://example.com/");
        let mut lcp_rx = source.observe(EntryType::LargestContentfulPaint).unwrap();
        let mut paint_rx = source.observe(EntryType::Paint).unwrap();

        source.push_entries(vec![lcp(1000.0), lcp(1800.0)]);

        assert_eq!(lcp_rx.try_recv().unwrap(), vec![lcp(1000.0), lcp(1800.0)]);
        assert!(paint_rx.try_recv().is_err());
    }

    #[test]
    fn entries_pushed_before_observing_are_missed() {
        let source = LiveSource::new("https://example.com/");
        source.push_entries(vec![PerformanceEntry::Paint(PaintEntry {
            name: "first-paint".to_string(),
            start_time: 300.0,
        })]);

        let mut rx = source.observe(EntryType::Paint).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn buffers_resource_timings() {
        let source = LiveSource::new("https://example.com/");
        let timing = ResourceTiming {
            name: "https://example.com/app.js".to_string(),
            duration: 42.0,
            transfer_size: Some(2048),
            initiator_type: "script".to_string(),
        };
        source.push_entries(vec![PerformanceEntry::Resource(timing.clone())]);
        source.apply(LiveMessage::Resources {
            resources: vec![timing.clone()],
        });

        assert_eq!(source.resource_entries(), vec![timing.clone(), timing]);
    }

    #[test]
    fn unsupported_types_are_rejected() {
        let source = LiveSource::new("https://example.com/").with_supported([EntryType::Paint]);
        assert!(source.observe(EntryType::Paint).is_ok());
        assert!(matches!(
            source.observe(EntryType::LayoutShift),
            Err(AuditError::UnsupportedEntryType(EntryType::LayoutShift))
        ));
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let source = LiveSource::new("https://example.com/");
        drop(source.observe(EntryType::LargestContentfulPaint).unwrap());
        source.push_entries(vec![lcp(900.0)]);

        let observers = lock(&source.observers);
        assert!(observers[&EntryType::LargestContentfulPaint].is_empty());
    }
}
