pub mod file_utils;
pub mod log_utils;

pub use file_utils::{archive_report, sanitize_filename, save_report};
pub use log_utils::append_audit_log;
