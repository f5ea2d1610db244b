pub mod params;

pub use params::{ParamsLiveAudit, ParamsRunAudit};
