//! WebSocket endpoint pushing per-user notifications.
//!
//! Each connection registers a bounded channel with the [`NotificationHub`]; a send task
//! forwards queued notifications as JSON text frames. Incoming frames are ignored apart
//! from close.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{
        error::AppError, middleware::auth::AuthGuard, service::notification::NotificationHub,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

/// Upgrade to a WebSocket receiving the logged-in user's notifications.
#[utoipa::path(
    get,
    path = "/api/ws",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 101, description = "Switching to WebSocket"),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn ws_handler(
    State(state): State<AppState>,
    session: Session,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let hub = state.notifications.clone();

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, hub, user.id)))
}

async fn handle_socket(socket: WebSocket, hub: NotificationHub, user_id: i32) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (connection_id, mut rx) = hub.register(user_id).await;

    tracing::debug!(
        user_id,
        connection_id = %connection_id,
        "WebSocket connection established"
    );

    let send_task = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            match serde_json::to_string(&notification) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("Failed to serialize notification: {}", e),
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    hub.unregister(user_id, connection_id).await;
    send_task.abort();

    tracing::debug!(
        user_id,
        connection_id = %connection_id,
        "WebSocket connection terminated"
    );
}
