//! HTTP handlers for chat rooms
//!
//! Messages are read and written through [`ChatService`]. The events
//! endpoint relays the database's change stream to the browser as
//! server-sent events.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures_util::stream::{Stream, StreamExt};
use std::sync::Arc;
use storefront_common::services::RealtimeEventKind;
use storefront_common::StorefrontError;
use storefront_config::AppConfig;

use crate::error::ChatError;
use crate::models::{ChatMessage, MessagesResponse, SendMessageRequest};
use crate::service::ChatService;

/// Shared state for chat handlers
pub struct ChatState {
    pub config: Arc<AppConfig>,
    pub service: ChatService,
}

impl ChatState {
    fn ensure_enabled(&self) -> Result<(), ChatError> {
        if self.config.use_chat {
            Ok(())
        } else {
            Err(ChatError::Disabled)
        }
    }
}

pub async fn list_messages_handler(
    State(state): State<Arc<ChatState>>,
    Path(room): Path<String>,
) -> Result<Json<MessagesResponse>, ChatError> {
    state.ensure_enabled()?;
    let messages = state.service.list_messages(&room).await?;
    Ok(Json(MessagesResponse { room, messages }))
}

pub async fn send_message_handler(
    State(state): State<Arc<ChatState>>,
    Path(room): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ChatError> {
    state.ensure_enabled()?;
    let message = state
        .service
        .send_message(&room, &payload.author, &payload.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn delete_message_handler(
    State(state): State<Arc<ChatState>>,
    Path((room, id)): Path<(String, String)>,
) -> Result<StatusCode, ChatError> {
    state.ensure_enabled()?;
    state.service.delete_message(&room, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Streams `put`/`patch` events for the room until the database closes the stream.
pub async fn room_events_handler(
    State(state): State<Arc<ChatState>>,
    Path(room): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, StorefrontError>>>, ChatError> {
    state.ensure_enabled()?;
    let events = state.service.subscribe(&room)?.map(|item| {
        let event = item?;
        let kind = match event.kind {
            RealtimeEventKind::Put => "put",
            RealtimeEventKind::Patch => "patch",
        };
        Event::default()
            .event(kind)
            .json_data(&event)
            .map_err(|e| StorefrontError::ParseError(e.to_string()))
    });
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
