// src/config.rs

use crate::error::ConfigError;
use crate::services::{SettlePolicy, DEFAULT_OVERLAY_CAPACITY};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:3043";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub settle: SettlePolicy,
    pub report_dir: Option<PathBuf>,
    /// Most overlay panels kept before the oldest is evicted.
    pub overlay_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: SocketAddr::from(([0, 0, 0, 0], 3043)),
            settle: SettlePolicy::default(),
            report_dir: None,
            overlay_capacity: DEFAULT_OVERLAY_CAPACITY,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads `VITALSCOPE_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("VITALSCOPE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = SocketAddr::from_str(&bind_raw)
            .map_err(|_| ConfigError::InvalidBindAddress(bind_raw.clone()))?;

        let mut settle = SettlePolicy::default();
        if let Some(ms) = parse_var::<u64, _>(&lookup, "VITALSCOPE_SETTLE_MS")? {
            settle.delay = Duration::from_millis(ms);
        }
        settle.expected_entry_types =
            parse_var::<usize, _>(&lookup, "VITALSCOPE_EXPECTED_ENTRY_TYPES")?;

        let report_dir = lookup("VITALSCOPE_REPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let overlay_capacity = parse_var::<usize, _>(&lookup, "VITALSCOPE_OVERLAY_CAPACITY")?
            .unwrap_or(DEFAULT_OVERLAY_CAPACITY);

        Ok(Config {
            bind,
            settle,
            report_dir,
            overlay_capacity,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
