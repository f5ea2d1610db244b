use crate::models::{Deduction, MetricName, Metrics};

pub const MAX_SCORE: u8 = 100;

// Tiers are ordered from the highest threshold down; only the first exceeded tier applies
pub struct ScoringRule {
    pub metric: MetricName,
    pub tiers: [(f64, u8); 2],
}

pub const SCORING_RULES: [ScoringRule; 4] = [
    ScoringRule {
        metric: MetricName::FirstContentfulPaint,
        tiers: [(2000.0, 20), (1500.0, 10)],
    },
    ScoringRule {
        metric: MetricName::LargestContentfulPaint,
        tiers: [(4000.0, 25), (2500.0, 15)],
    },
    ScoringRule {
        metric: MetricName::FirstInputDelay,
        tiers: [(300.0, 25), (100.0, 10)],
    },
    ScoringRule {
        metric: MetricName::CumulativeLayoutShift,
        tiers: [(0.25, 25), (0.1, 10)],
    },
];

impl ScoringRule {
    fn deduction(&self, value: f64) -> Option<Deduction> {
        self.tiers
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map(|&(threshold, points)| Deduction {
                metric: self.metric,
                value,
                threshold,
                points,
            })
    }
}

/// Every penalty the metrics incur. Absent metrics incur none.
pub fn deductions(metrics: &Metrics) -> Vec<Deduction> {
    SCORING_RULES
        .iter()
        .filter_map(|rule| {
            metrics
                .get(rule.metric)
                .and_then(|value| rule.deduction(value))
        })
        .collect()
}

pub fn score_from(deductions: &[Deduction]) -> u8 {
    let penalty: u32 = deductions.iter().map(|d| u32::from(d.points)).sum();
    u32::from(MAX_SCORE).saturating_sub(penalty) as u8
}

pub fn calculate_score(metrics: &Metrics) -> u8 {
    score_from(&deductions(metrics))
}
