pub mod entry;
pub mod metric;
pub mod report;
pub mod resource;
pub mod trace;

pub use entry::{
    EntryType, FirstInputEntry, LargestContentfulPaintEntry, LayoutShiftEntry, NavigationTiming,
    PaintEntry, PerformanceEntry, ResourceTiming,
};
pub use metric::{MetricName, MetricUnit, Metrics};
pub use report::{AuditReport, Deduction, Rating};
pub use resource::{ResourceEntry, ResourceSummary, TypeTotals};
pub use trace::{EntryBatch, LiveMessage, PerformanceTrace};
