//! Chat data types
//!
//! Messages are stored under `{rooms_path}/{room}/messages/{key}` without
//! their key; the key is attached when reading them back.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A message as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMessage {
    pub author: String,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// A message with its database key
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChatMessage {
    /// Key generated by the database on push
    #[cfg_attr(feature = "openapi", schema(example = "-NxY3kq8Zt1"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Ana"))]
    pub author: String,
    #[cfg_attr(feature = "openapi", schema(example = "¿Tenéis café de Chiapas?"))]
    pub text: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn from_stored(id: impl Into<String>, stored: StoredMessage) -> Self {
        Self {
            id: id.into(),
            author: stored.author,
            text: stored.text,
            timestamp: stored.timestamp,
        }
    }
}

/// Request body for posting a message
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SendMessageRequest {
    pub author: String,
    pub text: String,
}

/// Messages of one room, oldest first
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessagesResponse {
    pub room: String,
    pub messages: Vec<ChatMessage>,
}
