use crate::models::AuditReport;
use crate::utils::append_audit_log;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

pub fn sanitize_filename(url: &str) -> String {
    url.replace(|c: char| !c.is_alphanumeric() && c != '.', "_")
}

pub fn report_path(dir: &Path, report: &AuditReport) -> PathBuf {
    dir.join(format!("{}_{}.json", sanitize_filename(&report.url), report.id))
}

pub async fn save_report(dir: &Path, report: &AuditReport) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let path = report_path(dir, report);
    let body = serde_json::to_vec_pretty(report).context("Failed to serialize report")?;
    fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path)
}

/// Saves the report and records it in the audit trail. Failures are logged only.
pub async fn archive_report(dir: &Path, report: &AuditReport) {
    match save_report(dir, report).await {
        Ok(path) => {
            info!("✅ Report saved at: {}", path.display());
            let line = format!("{} score={} id={}", report.url, report.score, report.id);
            if let Err(e) = append_audit_log(dir, &line).await {
                warn!("❌ Error writing audit trail: {}", e);
            }
        }
        Err(e) => warn!("❌ Error saving report: {:#}", e),
    }
}
