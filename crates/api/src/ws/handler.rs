use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::dashboard::Dashboard;
use crate::error::AppResult;
use crate::query::LiveFeedParams;
use crate::state::AppState;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// Every completed tick is pushed as a JSON text message. `?crop_id=`
/// restricts the feed to one crop; an unknown id is rejected with 404
/// before the upgrade.
pub async fn live_feed_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<LiveFeedParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(crop_id) = &params.crop_id {
        state.dashboard.monitor(crop_id)?;
    }
    let dashboard = Arc::clone(&state.dashboard);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, dashboard, params.crop_id)))
}

/// Manage a single connection after upgrade.
///
/// A sender task forwards broadcast updates to the sink while the current
/// task drains inbound frames until the client goes away.
async fn handle_socket(socket: WebSocket, dashboard: Arc<Dashboard>, crop_filter: Option<String>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, crop_filter = ?crop_filter, "Live feed connected");

    let mut rx = dashboard.subscribe();
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        loop {
            let update = match rx.recv().await {
                Ok(update) => update,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %sender_conn_id, skipped, "Live feed lagging");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if crop_filter.as_deref().is_some_and(|id| id != update.crop_id) {
                continue;
            }

            let json = match serde_json::to_string(&update) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize tick update");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Live feed sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Live feed receive error");
                break;
            }
        }
    }

    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Live feed disconnected");
}
