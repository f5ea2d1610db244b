use anyhow::Context;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;
use vitalscope::{api, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is loaded here, so RUST_LOG from it applies to tracing
    let config = Config::from_env().context("Invalid configuration")?;
    tracing_subscriber::fmt::init();

    if let Some(dir) = &config.report_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
        info!("Saving reports to {}", dir.display());
    }

    let bind = config.bind;
    let shared_state = Arc::new(AppState::new(config));
    let app = api::router(shared_state);

    info!("🚀 Server running on http://{}", bind);
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
