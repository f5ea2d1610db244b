// src/services/audit_service/mod.rs

pub mod collector;
pub mod render;
pub mod resources;
pub mod runner;
pub mod score;
pub mod sink;

pub use collector::{AuditSession, LayoutShiftAccumulator};
pub use render::{render_overlay, render_text};
pub use resources::{analyze_resources, summarize_resources};
pub use runner::{Auditor, PendingAudit, SettlePolicy, DEFAULT_SETTLE_DELAY};
pub use score::{calculate_score, deductions, SCORING_RULES};
pub use sink::{display_results, LogSink, OverlayBoard, ReportSink, DEFAULT_OVERLAY_CAPACITY};
