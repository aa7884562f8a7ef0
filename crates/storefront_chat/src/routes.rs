// --- File: crates/storefront_chat/src/routes.rs ---

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use storefront_common::services::RealtimeStore;
use storefront_config::AppConfig;
use tracing::{error, warn};

use crate::client::RealtimeDatabaseClient;
use crate::handlers::{
    delete_message_handler, list_messages_handler, room_events_handler, send_message_handler,
    ChatState,
};
use crate::service::{ChatService, DEFAULT_MAX_MESSAGE_LENGTH, DEFAULT_ROOMS_PATH};

/// Creates a router containing all chat routes (paths relative to /api).
/// Returns an empty router when the chat section is missing.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let Some(chat_config) = config.chat.as_ref() else {
        warn!("[Chat] Chat configuration missing, chat routes not mounted");
        return Router::new();
    };
    match RealtimeDatabaseClient::from_config(chat_config) {
        Ok(client) => routes_with_store(config.clone(), Arc::new(client)),
        Err(e) => {
            error!("[Chat] Failed to build realtime database client: {}", e);
            Router::new()
        }
    }
}

/// Router over any realtime store; `config.chat` supplies rooms path and limits.
pub fn routes_with_store(config: Arc<AppConfig>, store: Arc<dyn RealtimeStore>) -> Router {
    let service = match config.chat.as_ref() {
        Some(chat_config) => ChatService::from_config(store, chat_config),
        None => ChatService::new(
            store,
            DEFAULT_ROOMS_PATH,
            DEFAULT_MAX_MESSAGE_LENGTH,
        ),
    };
    let state = Arc::new(ChatState { config, service });

    Router::new()
        .route(
            "/chat/rooms/{room}/messages",
            get(list_messages_handler).post(send_message_handler),
        )
        .route(
            "/chat/rooms/{room}/messages/{id}",
            delete(delete_message_handler),
        )
        .route("/chat/rooms/{room}/events", get(room_events_handler))
        .with_state(state)
}
