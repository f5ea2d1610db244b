use crate::models::{AuditReport, EntryType, PerformanceEntry, Rating};
use crate::services::audit_service::collector::AuditSession;
use crate::services::audit_service::resources::{analyze_resources, summarize_resources};
use crate::services::audit_service::score::{deductions, score_from};
use crate::services::audit_service::sink::{display_results, LogSink, ReportSink};
use crate::services::source::PerformanceSource;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{StreamExt, StreamMap};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// How long an audit waits for observers before reading its metrics.
///
/// `delay` is always a hard deadline. With `expected_entry_types` set, the
/// audit completes as soon as that many distinct entry types have reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlePolicy {
    pub delay: Duration,
    pub expected_entry_types: Option<usize>,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        SettlePolicy {
            delay: DEFAULT_SETTLE_DELAY,
            expected_entry_types: None,
        }
    }
}

impl SettlePolicy {
    pub fn fixed(delay: Duration) -> Self {
        SettlePolicy {
            delay,
            expected_entry_types: None,
        }
    }

    pub fn is_settled(&self, fired: usize) -> bool {
        matches!(self.expected_entry_types, Some(expected) if fired >= expected)
    }
}

type ObserverStreams = StreamMap<EntryType, UnboundedReceiverStream<Vec<PerformanceEntry>>>;

pub struct Auditor {
    source: Arc<dyn PerformanceSource>,
    policy: SettlePolicy,
    sinks: Vec<Arc<dyn ReportSink>>,
}

impl Auditor {
    pub fn new(source: Arc<dyn PerformanceSource>) -> Self {
        Auditor {
            source,
            policy: SettlePolicy::default(),
            sinks: vec![Arc::new(LogSink)],
        }
    }

    pub fn with_policy(mut self, policy: SettlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Opens a session and attaches one observer per entry type.
    /// Types the source cannot observe are logged and skipped.
    pub fn start(&self) -> PendingAudit {
        let session = AuditSession::new(self.source.location());
        info!(
            "🔍 Starting performance audit {} for {}",
            session.id(),
            session.url()
        );

        let mut streams = StreamMap::new();
        for entry_type in EntryType::OBSERVED {
            match self.source.observe(entry_type) {
                Ok(rx) => {
                    streams.insert(entry_type, UnboundedReceiverStream::new(rx));
                }
                Err(e) => warn!("{} observer failed: {}", entry_type, e),
            }
        }

        PendingAudit {
            source: Arc::clone(&self.source),
            policy: self.policy.clone(),
            sinks: self.sinks.clone(),
            session,
            streams,
        }
    }

    pub async fn run_audit(&self) -> AuditReport {
        self.start().finish().await
    }
}

/// An audit in the collecting state.
pub struct PendingAudit {
    source: Arc<dyn PerformanceSource>,
    policy: SettlePolicy,
    sinks: Vec<Arc<dyn ReportSink>>,
    session: AuditSession,
    streams: ObserverStreams,
}

impl PendingAudit {
    pub fn session(&self) -> &AuditSession {
        &self.session
    }

    pub fn observer_count(&self) -> usize {
        self.streams.len()
    }

    /// Waits out the settle window, then builds and displays the report.
    /// Entries arriving afterwards are not consumed.
    pub async fn finish(self) -> AuditReport {
        let PendingAudit {
            source,
            policy,
            sinks,
            mut session,
            mut streams,
        } = self;

        let deadline = tokio::time::sleep(policy.delay);
        tokio::pin!(deadline);

        while !policy.is_settled(session.fired_count()) {
            tokio::select! {
                _ = &mut deadline => break,
                Some((entry_type, batch)) = streams.next() => session.observe(entry_type, batch),
            }
        }

        let report = build_report(source.as_ref(), &mut session);
        display_results(&report, &sinks);
        report
    }
}

fn build_report(source: &dyn PerformanceSource, session: &mut AuditSession) -> AuditReport {
    if let Some(timing) = source.navigation_timing() {
        session.record_navigation(&timing);
    }
    let metrics = session.collect_metrics();
    let resources = analyze_resources(source.resource_entries());
    let resource_summary = summarize_resources(&resources);
    let deductions = deductions(&metrics);
    let score = score_from(&deductions);
    session.mark_reported();

    info!(
        "📊 Audit {} reported: {}/100 ({} metrics, {} resources)",
        session.id(),
        score,
        metrics.len(),
        resources.len()
    );

    AuditReport {
        id: session.id(),
        url: session.url().to_string(),
        timestamp: Utc::now(),
        metrics,
        resources,
        resource_summary,
        score,
        rating: Rating::from_score(score),
        deductions,
    }
}
