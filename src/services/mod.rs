pub mod audit_service;
pub mod source;

pub use audit_service::{
    analyze_resources, calculate_score, display_results, render_overlay, render_text,
    AuditSession, Auditor, LogSink, OverlayBoard, PendingAudit, ReportSink, SettlePolicy,
    DEFAULT_OVERLAY_CAPACITY,
};
pub use source::{LiveSource, PerformanceSource, TraceSource};
