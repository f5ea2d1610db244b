use chrono::Utc;
use std::io;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

pub const AUDIT_LOG_FILE: &str = "audit.log";

pub async fn append_audit_log(dir: &Path, text: &str) -> io::Result<()> {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.fZ");
    let log_entry = format!("{}::{}\n", timestamp, text);

    // Open the file in append mode, creating it if it doesn't exist
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(dir.join(AUDIT_LOG_FILE))
        .await?;

    file.write_all(log_entry.as_bytes()).await?;
    Ok(())
}
