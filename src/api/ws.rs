use crate::api::handler::{
    completed_response, finalize_report, missing_url_response, settle_policy,
};
use crate::models::{AppState, LiveMessage, ParamsLiveAudit};
use crate::services::{Auditor, LiveSource};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;

pub async fn websocket_handler(
    Query(params): Query<ParamsLiveAudit>,
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    if params.url.trim().is_empty() {
        warn!("Refusing live audit without a page url");
        return missing_url_response("Live audit is missing the page url").into_response();
    }

    info!("Live audit requested for {}", params.url);
    ws.on_upgrade(move |socket| handle_socket(socket, state, params))
}

/// Runs one audit fed by the page on the other end of the socket, then
/// replies with the report and closes.
pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>, params: ParamsLiveAudit) {
    let (mut sender, mut receiver) = socket.split();

    let source = Arc::new(LiveSource::new(params.url));
    let policy = settle_policy(&state.config, params.settle_ms, params.expected_entry_types);
    let auditor = Auditor::new(source.clone())
        .with_policy(policy)
        .with_sink(Arc::new(state.overlays.clone()));

    // Observers are attached before the first frame is read
    let audit = auditor.start().finish();
    tokio::pin!(audit);

    let mut open = true;
    let report = loop {
        tokio::select! {
            report = &mut audit => break report,
            msg = receiver.next(), if open => match msg {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<LiveMessage>(text.as_str()) {
                        Ok(message) => source.apply(message),
                        Err(e) => warn!("Ignoring malformed live frame: {}", e),
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                    debug!("Live socket closed before the audit settled");
                    open = false;
                }
                Some(Ok(_)) => (),
            },
        }
    };

    finalize_report(&state, &report).await;

    if !open {
        return;
    }

    match serde_json::to_string(&completed_response(report)) {
        Ok(body) => {
            if let Err(e) = sender.send(Message::Text(body.into())).await {
                warn!("Error sending audit report: {}", e);
            }
        }
        Err(e) => warn!("Error serializing audit report: {}", e),
    }
    let _ = sender.send(Message::Close(None)).await;
}
