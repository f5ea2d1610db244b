use crate::models::{AuditReport, MetricName, Metrics};

const OVERLAY_STYLE: &str = "position: fixed; top: 20px; right: 20px; background: white; \
border: 2px solid #3b82f6; border-radius: 12px; padding: 20px; max-width: 400px; \
max-height: 80vh; overflow-y: auto; z-index: 10000; font-family: monospace; \
font-size: 12px; box-shadow: 0 10px 25px rgba(0,0,0,0.2);";

const CLOSE_STYLE: &str = "position: absolute; top: 10px; right: 10px; background: #ef4444; \
color: white; border: none; border-radius: 50%; width: 24px; height: 24px; cursor: pointer; \
font-size: 16px; line-height: 1;";

fn seconds(value: f64) -> String {
    format!("{:.2}s", value / 1000.0)
}

fn display_metric(metrics: &Metrics, name: MetricName) -> String {
    // 0 and NaN mean "not measured" on the page side
    let value = match metrics.get(name) {
        Some(value) if value != 0.0 && !value.is_nan() => value,
        _ => return "N/A".to_string(),
    };
    match name {
        MetricName::FirstInputDelay => format!("{:.0}ms", value),
        MetricName::CumulativeLayoutShift => format!("{:.3}", value),
        _ => seconds(value),
    }
}

fn metric_lines(metrics: &Metrics, rows: &[(&str, MetricName)]) -> String {
    rows.iter()
        .map(|(label, name)| format!("• {}: {}\n", label, display_metric(metrics, *name)))
        .collect()
}

fn deduction_section(report: &AuditReport) -> String {
    if report.deductions.is_empty() {
        return String::new();
    }
    let lines: String = report
        .deductions
        .iter()
        .map(|d| format!("• {} above {}: -{}\n", d.metric, d.threshold, d.points))
        .collect();
    format!("\n📉 DEDUCTIONS:\n{}", lines)
}

/// Human-readable summary of an audit.
pub fn render_text(report: &AuditReport) -> String {
    let metrics = &report.metrics;
    let core_vitals = metric_lines(
        metrics,
        &[
            ("First Contentful Paint", MetricName::FirstContentfulPaint),
            ("Largest Contentful Paint", MetricName::LargestContentfulPaint),
            ("First Input Delay", MetricName::FirstInputDelay),
            ("Cumulative Layout Shift", MetricName::CumulativeLayoutShift),
        ],
    );
    let additional = metric_lines(
        metrics,
        &[
            ("First Paint", MetricName::FirstPaint),
            ("DOM Content Loaded", MetricName::DomContentLoaded),
            ("Page Load Complete", MetricName::LoadComplete),
        ],
    );
    let recommendations: String = report
        .rating
        .recommendations()
        .iter()
        .map(|rec| format!("  • {}\n", rec))
        .collect();

    format!(
        "🚀 PERFORMANCE AUDIT RESULTS 🚀\n\n\
📊 OVERALL SCORE: {score}/100\n\n\
⏱️ CORE WEB VITALS:\n{core_vitals}\n\
📈 ADDITIONAL METRICS:\n{additional}\n\
📦 RESOURCE ANALYSIS:\n\
• Total Resources: {total_resources}\n\
• Total Transfer Size: {transfer_kb:.2} KB\n\
{deductions}\n\
🔧 RECOMMENDATIONS:\n{summary}\n{recommendations}\n\
📅 Generated: {generated}\n\
🌐 URL: {url}",
        score = report.score,
        core_vitals = core_vitals,
        additional = additional,
        total_resources = report.resource_summary.total_resources,
        transfer_kb = report.resource_summary.total_transfer_kb(),
        deductions = deduction_section(report),
        summary = report.rating.summary(),
        recommendations = recommendations,
        generated = report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        url = report.url,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Dismissible overlay panel for the report.
pub fn render_overlay(report: &AuditReport) -> String {
    let body = escape_html(&render_text(report)).replace('\n', "<br>");
    format!(
        "<div id=\"vitalscope-{id}\" class=\"vitalscope-overlay\" style=\"{style}\">{body}\
<button type=\"button\" aria-label=\"Dismiss\" style=\"{close}\" \
onclick=\"this.parentElement.remove()\">×</button></div>",
        id = report.id,
        style = OVERLAY_STYLE,
        body = body,
        close = CLOSE_STYLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deduction, Rating, ResourceEntry};
    use crate::services::audit_service::resources::summarize_resources;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn report(metrics: Metrics, score: u8, deductions: Vec<Deduction>) -> AuditReport {
        let resources = vec![ResourceEntry {
            name: "https://example.com/app.js".to_string(),
            duration: 80.0,
            size: 3072,
            kind: "script".to_string(),
        }];
        AuditReport {
            id: Uuid::nil(),
            url: "https://example.com/?q=<b>".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            resource_summary: summarize_resources(&resources),
            resources,
            metrics,
            score,
            rating: Rating::from_score(score),
            deductions,
        }
    }

    #[test]
    fn text_formats_each_unit() {
        let metrics: Metrics = [
            (MetricName::FirstContentfulPaint, 2200.0),
            (MetricName::FirstInputDelay, 48.6),
            (MetricName::CumulativeLayoutShift, 0.05),
            (MetricName::DomContentLoaded, 812.0),
        ]
        .into_iter()
        .collect();
        let text = render_text(&report(metrics, 80, vec![]));

        assert!(text.contains("📊 OVERALL SCORE: 80/100"));
        assert!(text.contains("• First Contentful Paint: 2.20s"));
        assert!(text.contains("• Largest Contentful Paint: N/A"));
        assert!(text.contains("• First Input Delay: 49ms"));
        assert!(text.contains("• Cumulative Layout Shift: 0.050"));
        assert!(text.contains("• DOM Content Loaded: 0.81s"));
        assert!(text.contains("• Page Load Complete: N/A"));
        assert!(text.contains("• Total Resources: 1"));
        assert!(text.contains("• Total Transfer Size: 3.00 KB"));
        assert!(text.contains("⚠️ Good performance with room for improvement."));
        assert!(text.contains("📅 Generated: 2026-03-01 12:30:00 UTC"));
    }

    #[test]
    fn poor_scores_list_recommendations_and_deductions() {
        let deductions = vec![Deduction {
            metric: MetricName::LargestContentfulPaint,
            value: 5200.0,
            threshold: 4000.0,
            points: 25,
        }];
        let text = render_text(&report(Metrics::new(), 60, deductions));

        assert!(text.contains("❌ Performance needs optimization. Consider:"));
        assert!(text.contains("  • Using a CDN for static assets"));
        assert!(text.contains("• largestContentfulPaint above 4000: -25"));
    }

    #[test]
    fn unmeasured_zero_and_nan_show_as_not_available() {
        let metrics: Metrics = [
            (MetricName::FirstInputDelay, 0.0),
            (MetricName::CumulativeLayoutShift, 0.0),
            (MetricName::LoadComplete, f64::NAN),
            (MetricName::DomContentLoaded, 640.0),
        ]
        .into_iter()
        .collect();
        let text = render_text(&report(metrics, 100, vec![]));

        assert!(text.contains("• First Input Delay: N/A"));
        assert!(text.contains("• Cumulative Layout Shift: N/A"));
        assert!(text.contains("• Page Load Complete: N/A"));
        assert!(text.contains("• DOM Content Loaded: 0.64s"));
    }

    #[test]
    fn sections_keep_their_order_and_spacing() {
        let deductions = vec![Deduction {
            metric: MetricName::FirstInputDelay,
            value: 150.0,
            threshold: 100.0,
            points: 10,
        }];
        let text = render_text(&report(Metrics::new(), 90, deductions));

        assert!(text.starts_with("🚀 PERFORMANCE AUDIT RESULTS 🚀\n\n📊 OVERALL SCORE: 90/100\n\n"));
        assert!(text.contains("• Page Load Complete: N/A\n\n📦 RESOURCE ANALYSIS:\n"));
        assert!(text.contains("3.00 KB\n\n📉 DEDUCTIONS:\n• firstInputDelay above 100: -10\n\n🔧"));
        assert!(text.ends_with("UTC\n🌐 URL: https://example.com/?q=<b>"));
        assert_eq!(text.matches("\n\n\n").count(), 0);
    }

    #[test]
    fn overlay_escapes_and_breaks_lines() {
        let html = render_overlay(&report(Metrics::new(), 100, vec![]));

        assert!(html.starts_with("<div id=\"vitalscope-00000000-0000-0000-0000-000000000000\""));
        assert!(html.contains("q=&lt;b&gt;"));
        assert!(!html.contains("q=<b>"));
        assert!(html.contains("<br>"));
        assert!(html.contains("this.parentElement.remove()"));
    }
}
