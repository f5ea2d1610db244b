use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Named measurement collected during an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricName {
    #[serde(rename = "firstContentfulPaint")]
    FirstContentfulPaint,
    #[serde(rename = "largestContentfulPaint")]
    LargestContentfulPaint,
    #[serde(rename = "firstInputDelay")]
    FirstInputDelay,
    #[serde(rename = "cumulativeLayoutShift")]
    CumulativeLayoutShift,
    #[serde(rename = "DOMContentLoaded")]
    DomContentLoaded,
    #[serde(rename = "loadComplete")]
    LoadComplete,
    #[serde(rename = "firstPaint")]
    FirstPaint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Milliseconds,
    Unitless,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::FirstContentfulPaint => "firstContentfulPaint",
            MetricName::LargestContentfulPaint => "largestContentfulPaint",
            MetricName::FirstInputDelay => "firstInputDelay",
            MetricName::CumulativeLayoutShift => "cumulativeLayoutShift",
            MetricName::DomContentLoaded => "DOMContentLoaded",
            MetricName::LoadComplete => "loadComplete",
            MetricName::FirstPaint => "firstPaint",
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            MetricName::CumulativeLayoutShift => MetricUnit::Unitless,
            _ => MetricUnit::Milliseconds,
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metric values present at a point in time. Absent metrics are simply not in the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<MetricName, f64>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: MetricName) -> Option<f64> {
        self.0.get(&name).copied()
    }

    /// Last write wins.
    pub fn set(&mut self, name: MetricName, value: f64) {
        self.0.insert(name, value);
    }

    pub fn contains(&self, name: MetricName) -> bool {
        self.0.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }
}

impl FromIterator<(MetricName, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (MetricName, f64)>>(iter: I) -> Self {
        Metrics(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_serialize_with_wire_names() {
        let metrics: Metrics = [
            (MetricName::DomContentLoaded, 812.0),
            (MetricName::CumulativeLayoutShift, 0.05),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["DOMContentLoaded"], 812.0);
        assert_eq!(json["cumulativeLayoutShift"], 0.05);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut metrics = Metrics::new();
        metrics.set(MetricName::LargestContentfulPaint, 1200.0);
        metrics.set(MetricName::LargestContentfulPaint, 2400.0);
        assert_eq!(metrics.get(MetricName::LargestContentfulPaint), Some(2400.0));
        assert_eq!(metrics.len(), 1);
    }

    #[test]
    fn only_cls_is_unitless() {
        assert_eq!(MetricName::CumulativeLayoutShift.unit(), MetricUnit::Unitless);
        assert_eq!(MetricName::FirstInputDelay.unit(), MetricUnit::Milliseconds);
    }
}
