pub mod status;

pub use status::{AuditResponse, AuditStatus, SessionState};
