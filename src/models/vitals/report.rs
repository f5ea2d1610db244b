use crate::models::vitals::metric::{MetricName, Metrics};
use crate::models::vitals::resource::{ResourceEntry, ResourceSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RECOMMENDATIONS: [&str; 4] = [
    "Optimizing images and assets",
    "Reducing JavaScript bundle size",
    "Implementing lazy loading",
    "Using a CDN for static assets",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsOptimization,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Rating::Excellent,
            70..=89 => Rating::Good,
            _ => Rating::NeedsOptimization,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Rating::Excellent => "✅ Excellent performance! Keep up the good work.",
            Rating::Good => "⚠️ Good performance with room for improvement.",
            Rating::NeedsOptimization => "❌ Performance needs optimization. Consider:",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Rating::NeedsOptimization => &RECOMMENDATIONS,
            _ => &[],
        }
    }
}

// A single penalty applied while scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub metric: MetricName,
    pub value: f64,
    pub threshold: f64,
    pub points: u8,
}

/// Point-in-time snapshot produced by one audit. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub id: Uuid,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub metrics: Metrics,
    pub resources: Vec<ResourceEntry>,
    pub resource_summary: ResourceSummary,
    pub score: u8,
    pub rating: Rating,
    pub deductions: Vec<Deduction>,
}
