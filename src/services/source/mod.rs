// src/services/source/mod.rs

pub mod live;
pub mod trace;

pub use live::LiveSource;
pub use trace::TraceSource;

use crate::error::AuditError;
use crate::models::{EntryType, NavigationTiming, PerformanceEntry, ResourceTiming};
use tokio::sync::mpsc::UnboundedReceiver;

/// Entry lists delivered asynchronously for one observed entry type.
pub type EntryReceiver = UnboundedReceiver<Vec<PerformanceEntry>>;

/// The page-side performance APIs an audit reads from.
///
/// `observe` may fail per entry type; a failure must not affect the other
/// types. Batches for different entry types arrive in no particular order.
pub trait PerformanceSource: Send + Sync {
    /// URL of the audited page.
    fn location(&self) -> String;

    fn navigation_timing(&self) -> Option<NavigationTiming>;

    fn observe(&self, entry_type: EntryType) -> Result<EntryReceiver, AuditError>;

    /// Bulk read of every resource timing entry available right now.
    fn resource_entries(&self) -> Vec<ResourceTiming>;
}
