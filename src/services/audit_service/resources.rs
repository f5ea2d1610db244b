use crate::models::{ResourceEntry, ResourceSummary, ResourceTiming};

pub fn analyze_resources(timings: Vec<ResourceTiming>) -> Vec<ResourceEntry> {
    timings.into_iter().map(ResourceEntry::from).collect()
}

pub fn summarize_resources(resources: &[ResourceEntry]) -> ResourceSummary {
    let mut summary = ResourceSummary {
        total_resources: resources.len(),
        ..ResourceSummary::default()
    };

    for resource in resources {
        summary.total_transfer_bytes += resource.size;
        let totals = summary.by_type.entry(resource.kind.clone()).or_default();
        totals.count += 1;
        totals.bytes += resource.size;
    }

    summary
}
