//! Per-user WebSocket notification fan-out.
//!
//! Every authenticated WebSocket connection registers a bounded channel under its
//! user id. Services push [`NotificationDto`] events to users; delivery is best-effort:
//! a full or closed channel drops the event for that connection and logs a warning.
//! Nothing is ordered across users.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::model::notification::NotificationDto;

/// Buffer size of each connection's outgoing channel.
pub const CONNECTION_CHANNEL_BUFFER: usize = 64;

type Connections = HashMap<i32, HashMap<Uuid, mpsc::Sender<NotificationDto>>>;

/// Registry of open notification connections keyed by user id.
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct NotificationHub {
    connections: Arc<RwLock<Connections>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection for `user_id` and returns its id and receiving end.
    pub async fn register(&self, user_id: i32) -> (Uuid, mpsc::Receiver<NotificationDto>) {
        let connection_id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(CONNECTION_CHANNEL_BUFFER);

        self.connections
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(connection_id, tx);

        tracing::debug!(user_id, connection_id = %connection_id, "Notification connection registered");

        (connection_id, rx)
    }

    /// Removes a connection, dropping the user entry once it has none left.
    pub async fn unregister(&self, user_id: i32, connection_id: Uuid) {
        let mut connections = self.connections.write().await;

        if let Some(user_connections) = connections.get_mut(&user_id) {
            if user_connections.remove(&connection_id).is_some() {
                tracing::debug!(user_id, connection_id = %connection_id, "Notification connection unregistered");
            }
            if user_connections.is_empty() {
                connections.remove(&user_id);
            }
        }
    }

    /// Number of open connections for a user.
    pub async fn connection_count(&self, user_id: i32) -> usize {
        self.connections
            .read()
            .await
            .get(&user_id)
            .map_or(0, |c| c.len())
    }

    /// Sends an event to every connection of one user.
    ///
    /// Returns the number of connections the event was queued on.
    pub async fn send_to_user(&self, user_id: i32, notification: &NotificationDto) -> usize {
        let connections = self.connections.read().await;

        let Some(user_connections) = connections.get(&user_id) else {
            return 0;
        };

        let mut delivered = 0;
        for (connection_id, sender) in user_connections {
            match sender.try_send(notification.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    user_id,
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to deliver notification"
                ),
            }
        }

        delivered
    }

    /// Sends an event to several users. Duplicate ids receive it once.
    pub async fn send_to_users(&self, user_ids: &[i32], notification: &NotificationDto) -> usize {
        let mut seen = Vec::with_capacity(user_ids.len());
        let mut delivered = 0;

        for &user_id in user_ids {
            if seen.contains(&user_id) {
                continue;
            }
            seen.push(user_id);
            delivered += self.send_to_user(user_id, notification).await;
        }

        delivered
    }
}
