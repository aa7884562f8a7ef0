//! Chat rooms on top of a [`RealtimeStore`].

use chrono::Utc;
use futures_util::stream::BoxStream;
use serde_json::Value;
use std::sync::Arc;
use storefront_common::services::{RealtimeEvent, RealtimeStore};
use storefront_common::StorefrontError;
use storefront_config::ChatConfig;
use tracing::{info, warn};

use crate::error::ChatError;
use crate::models::{ChatMessage, StoredMessage};

pub const DEFAULT_ROOMS_PATH: &str = "chats";
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 1000;

pub struct ChatService {
    store: Arc<dyn RealtimeStore>,
    rooms_path: String,
    max_message_length: usize,
}

impl ChatService {
    pub fn new(store: Arc<dyn RealtimeStore>, rooms_path: impl Into<String>, max_message_length: usize) -> Self {
        Self {
            store,
            rooms_path: rooms_path.into(),
            max_message_length,
        }
    }

    pub fn from_config(store: Arc<dyn RealtimeStore>, config: &ChatConfig) -> Self {
        Self::new(
            store,
            config
                .rooms_path
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOMS_PATH.to_string()),
            config
                .max_message_length
                .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH),
        )
    }

    /// Room names become path segments, so only `[A-Za-z0-9_-]` is allowed.
    fn messages_path(&self, room: &str) -> Result<String, ChatError> {
        let valid = !room.is_empty()
            && room.len() <= 64
            && room
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ChatError::InvalidRoom(room.to_string()));
        }
        Ok(format!("{}/{}/messages", self.rooms_path.trim_matches('/'), room))
    }

    pub async fn send_message(&self, room: &str, author: &str, text: &str) -> Result<ChatMessage, ChatError> {
        let path = self.messages_path(room)?;
        let author = author.trim();
        let text = text.trim();
        if author.is_empty() {
            return Err(ChatError::InvalidMessage("author is required".to_string()));
        }
        if text.is_empty() {
            return Err(ChatError::InvalidMessage("text is empty".to_string()));
        }
        if text.chars().count() > self.max_message_length {
            return Err(ChatError::InvalidMessage(format!(
                "text exceeds {} characters",
                self.max_message_length
            )));
        }

        let stored = StoredMessage {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        let value = serde_json::to_value(&stored)
            .map_err(|e| StorefrontError::ParseError(e.to_string()))?;
        let id = self
            .store
            .push(&path, value)
            .await
            .inspect_err(|e| warn!("[Chat] Push to {} failed: {}", path, e))?;
        info!("[Chat] {} posted {} in '{}'", stored.author, id, room);
        Ok(ChatMessage::from_stored(id, stored))
    }

    /// Messages sorted by timestamp, then key. Malformed entries are skipped.
    pub async fn list_messages(&self, room: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let path = self.messages_path(room)?;
        let value = self
            .store
            .get(&path)
            .await
            .inspect_err(|e| warn!("[Chat] Read of {} failed: {}", path, e))?;

        let mut messages = match value {
            Value::Object(entries) => entries
                .into_iter()
                .filter_map(|(id, entry)| match serde_json::from_value::<StoredMessage>(entry) {
                    Ok(stored) => Some(ChatMessage::from_stored(id, stored)),
                    Err(e) => {
                        warn!("[Chat] Skipping malformed message {}: {}", id, e);
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    pub async fn delete_message(&self, room: &str, id: &str) -> Result<(), ChatError> {
        let path = format!("{}/{}", self.messages_path(room)?, id);
        if id.is_empty() || id.contains('/') {
            return Err(ChatError::NotFound(id.to_string()));
        }
        if self.store.get(&path).await?.is_null() {
            return Err(ChatError::NotFound(id.to_string()));
        }
        self.store
            .delete(&path)
            .await
            .inspect_err(|e| warn!("[Chat] Delete of {} failed: {}", path, e))?;
        info!("[Chat] Deleted {} from '{}'", id, room);
        Ok(())
    }

    /// Change events for the room's messages.
    pub fn subscribe(
        &self,
        room: &str,
    ) -> Result<BoxStream<'static, Result<RealtimeEvent, StorefrontError>>, ChatError> {
        let path = self.messages_path(room)?;
        Ok(self.store.subscribe(&path))
    }
}
