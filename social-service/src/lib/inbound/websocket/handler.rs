use axum::extract::ws::Message as WebSocketMessage;
use axum::extract::ws::WebSocket;
use axum::extract::State;
use axum::extract::WebSocketUpgrade;
use axum::response::Response;
use futures::SinkExt;
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::ClientMessage;
use super::messages::ServerMessage;
use super::registry::ChatRegistry;
use crate::inbound::http::router::AppState;

#[derive(Debug, Error)]
enum ChatFrameError {
    #[error("Failed to parse message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Binary messages not supported")]
    Binary,

    #[error("Connection closed")]
    Closed,
}

/// WebSocket upgrade handler for the chat room.
pub async fn chat_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.chat_registry))
}

async fn handle_socket(socket: WebSocket, registry: ChatRegistry) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WebSocketMessage>();

    registry.add_connection(connection_id, tx.clone()).await;

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let recv_registry = registry.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Err(e) = process_client_message(msg, &recv_registry, &tx).await {
                tracing::warn!(%connection_id, error = %e, "Chat frame rejected");
                send_frame(&tx, &ServerMessage::Error {
                    message: e.to_string(),
                });
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    registry.remove_connection(connection_id).await;
}

async fn process_client_message(
    msg: WebSocketMessage,
    registry: &ChatRegistry,
    tx: &mpsc::UnboundedSender<WebSocketMessage>,
) -> Result<(), ChatFrameError> {
    match msg {
        WebSocketMessage::Text(text) => match serde_json::from_str::<ClientMessage>(&text)? {
            ClientMessage::Message { sender, message } => {
                let frame = serde_json::to_string(&ServerMessage::Message { sender, message })?;
                registry.broadcast(WebSocketMessage::Text(frame)).await;
                Ok(())
            }
            ClientMessage::Ping => {
                let frame = serde_json::to_string(&ServerMessage::Pong)?;
                tx.send(WebSocketMessage::Text(frame))
                    .map_err(|_| ChatFrameError::Closed)
            }
        },
        // axum answers protocol pings itself
        WebSocketMessage::Ping(_) | WebSocketMessage::Pong(_) | WebSocketMessage::Close(_) => {
            Ok(())
        }
        WebSocketMessage::Binary(_) => Err(ChatFrameError::Binary),
    }
}

fn send_frame(tx: &mpsc::UnboundedSender<WebSocketMessage>, frame: &ServerMessage) {
    if let Ok(json) = serde_json::to_string(frame) {
        let _ = tx.send(WebSocketMessage::Text(json));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_message_is_relayed_to_all_listeners() {
        let registry = ChatRegistry::new();
        let (own_tx, mut own_rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        registry.add_connection(Uuid::new_v4(), own_tx.clone()).await;
        registry.add_connection(Uuid::new_v4(), other_tx).await;

        let frame = r#"{"type":"message","sender":"alice1","message":"hi all"}"#;
        process_client_message(WebSocketMessage::Text(frame.to_string()), &registry, &own_tx)
            .await
            .unwrap();

        let expected = WebSocketMessage::Text(
            r#"{"type":"message","sender":"alice1","message":"hi all"}"#.to_string(),
        );
        assert_eq!(own_rx.recv().await, Some(expected.clone()));
        assert_eq!(other_rx.recv().await, Some(expected));
    }

    #[tokio::test]
    async fn test_ping_is_answered_only_to_sender() {
        let registry = ChatRegistry::new();
        let (own_tx, mut own_rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        registry.add_connection(Uuid::new_v4(), other_tx).await;

        process_client_message(
            WebSocketMessage::Text(r#"{"type":"ping"}"#.to_string()),
            &registry,
            &own_tx,
        )
        .await
        .unwrap();

        assert_eq!(
            own_rx.recv().await,
            Some(WebSocketMessage::Text(r#"{"type":"pong"}"#.to_string()))
        );
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_frame_is_rejected() {
        let registry = ChatRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let result = process_client_message(
            WebSocketMessage::Text(r#"{"type":"shout"}"#.to_string()),
            &registry,
            &tx,
        )
        .await;
        assert!(matches!(result, Err(ChatFrameError::Parse(_))));

        let result =
            process_client_message(WebSocketMessage::Binary(vec![1, 2]), &registry, &tx).await;
        assert!(matches!(result, Err(ChatFrameError::Binary)));
    }
}
