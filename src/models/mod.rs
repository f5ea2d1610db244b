// src/models/mod.rs

pub mod api;
pub mod app;
pub mod audit;
pub mod vitals;

pub use api::{ParamsLiveAudit, ParamsRunAudit};
pub use app::AppState;
pub use audit::{AuditResponse, AuditStatus, SessionState};
pub use vitals::{
    AuditReport, Deduction, EntryBatch, EntryType, FirstInputEntry, LargestContentfulPaintEntry,
    LayoutShiftEntry, LiveMessage, MetricName, MetricUnit, Metrics, NavigationTiming, PaintEntry,
    PerformanceEntry, PerformanceTrace, Rating, ResourceEntry, ResourceSummary, ResourceTiming,
    TypeTotals,
};
