use crate::models::vitals::AuditReport;
use serde::{Deserialize, Serialize};
use std::fmt;

// Audit response status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Completed,
    Error,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            AuditStatus::Completed => "completed",
            AuditStatus::Error => "error",
        };
        write!(f, "{}", status_str)
    }
}

// Lifecycle of one audit session; `Reported` is terminal
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Collecting,
    Reported,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            SessionState::Collecting => "collecting",
            SessionState::Reported => "reported",
        };
        write!(f, "{}", state_str)
    }
}

// Response for the audit handlers
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuditResponse {
    pub status: AuditStatus,
    pub message: String,
    pub timestamp: String,
    pub report: Option<AuditReport>,
    pub overlay_url: Option<String>,
}
