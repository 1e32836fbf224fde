//! Chat frames exchanged over the websocket as JSON.
use serde::Deserialize;
use serde::Serialize;

/// Frames accepted from a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Chat line to relay to the room.
    Message { sender: String, message: String },
    /// Keep-alive.
    Ping,
}

/// Frames sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Chat line relayed from a client.
    Message { sender: String, message: String },
    Pong,
    /// Frame could not be handled; only sent back to its author.
    Error { message: String },
}
