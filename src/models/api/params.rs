use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ParamsRunAudit {
    pub settle_ms: Option<u64>,
    pub expected_entry_types: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ParamsLiveAudit {
    pub url: String,
    pub settle_ms: Option<u64>,
    pub expected_entry_types: Option<usize>,
}
