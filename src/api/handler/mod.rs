pub mod audit;

pub use audit::{
    completed_response, dismiss_overlay_handler, finalize_report, get_overlay_handler,
    missing_url_response, overlay_url, run_audit_handler, settle_policy,
};
