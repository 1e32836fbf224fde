use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message as WsMessage;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Connected listeners of the single chat room, keyed by connection id.
#[derive(Debug, Clone, Default)]
pub struct ChatRegistry {
    connections: Arc<RwLock<HashMap<Uuid, mpsc::UnboundedSender<WsMessage>>>>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_connection(
        &self,
        connection_id: Uuid,
        sender: mpsc::UnboundedSender<WsMessage>,
    ) {
        self.connections.write().await.insert(connection_id, sender);

        tracing::info!(%connection_id, "Chat connection added");
    }

    pub async fn remove_connection(&self, connection_id: Uuid) {
        if self
            .connections
            .write()
            .await
            .remove(&connection_id)
            .is_some()
        {
            tracing::info!(%connection_id, "Chat connection removed");
        }
    }

    /// Send a message to every listener, the sender included.
    ///
    /// Returns the number of listeners the message was queued for.
    pub async fn broadcast(&self, message: WsMessage) -> usize {
        let connections = self.connections.read().await;

        let mut sent_count = 0;
        let mut failed_count = 0;
        for (connection_id, sender) in connections.iter() {
            if sender.send(message.clone()).is_ok() {
                sent_count += 1;
            } else {
                failed_count += 1;
                tracing::warn!(%connection_id, "Failed to queue chat message");
            }
        }

        tracing::debug!(sent = sent_count, failed = failed_count, "Chat broadcast");

        sent_count
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_every_listener() {
        let registry = ChatRegistry::new();
        let (first_tx, mut first_rx) = mpsc::unbounded_channel();
        let (second_tx, mut second_rx) = mpsc::unbounded_channel();

        registry.add_connection(Uuid::new_v4(), first_tx).await;
        registry.add_connection(Uuid::new_v4(), second_tx).await;

        let sent = registry
            .broadcast(WsMessage::Text("hello".to_string()))
            .await;

        assert_eq!(sent, 2);
        assert_eq!(
            first_rx.recv().await,
            Some(WsMessage::Text("hello".to_string()))
        );
        assert_eq!(
            second_rx.recv().await,
            Some(WsMessage::Text("hello".to_string()))
        );
    }

    #[tokio::test]
    async fn test_removed_connection_is_skipped() {
        let registry = ChatRegistry::new();
        let connection_id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();

        registry.add_connection(connection_id, tx).await;
        registry.remove_connection(connection_id).await;

        assert_eq!(registry.connection_count().await, 0);
        assert_eq!(
            registry.broadcast(WsMessage::Text("hi".to_string())).await,
            0
        );
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_closed_listener_counts_as_failure() {
        let registry = ChatRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        registry.add_connection(Uuid::new_v4(), tx).await;

        assert_eq!(
            registry.broadcast(WsMessage::Text("hi".to_string())).await,
            0
        );
    }
}
