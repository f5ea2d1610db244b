use crate::config::Config;
use crate::services::OverlayBoard;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub overlays: OverlayBoard,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            overlays: OverlayBoard::with_capacity(config.overlay_capacity),
            config,
        }
    }
}
