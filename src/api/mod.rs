// src/api/mod.rs

pub mod error;
pub mod handler;
pub mod ws;

pub use error::ApiError;
pub use handler::{dismiss_overlay_handler, get_overlay_handler, run_audit_handler};
pub use ws::{handle_socket, websocket_handler};

use crate::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/audit", post(run_audit_handler))
        .route(
            "/audit/{id}/overlay",
            get(get_overlay_handler).delete(dismiss_overlay_handler),
        )
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
