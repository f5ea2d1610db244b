// src/error.rs

use crate::models::EntryType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("entry type `{0}` is not supported by this source")]
    UnsupportedEntryType(EntryType),

    #[error("unknown entry type `{0}`")]
    UnknownEntryType(String),

    #[error("invalid performance trace: {0}")]
    InvalidTrace(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),
}
