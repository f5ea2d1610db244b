//! Point-in-time web performance audits.
//!
//! Performance timeline entries come from a [`services::PerformanceSource`]
//! (a replayed trace or a live page), are folded into metrics by an
//! [`services::AuditSession`], scored, and rendered as a text summary and a
//! dismissible overlay panel.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{AuditError, ConfigError};
pub use models::AppState;
