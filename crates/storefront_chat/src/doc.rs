//! OpenAPI documentation for the chat endpoints

#![allow(dead_code)]
use utoipa::OpenApi;

use crate::models::{ChatMessage, MessagesResponse, SendMessageRequest};

#[utoipa::path(
    get,
    path = "/chat/rooms/{room}/messages",
    params(("room" = String, Path, description = "Room name ([A-Za-z0-9_-])")),
    responses(
        (status = 200, description = "Messages, oldest first", body = MessagesResponse),
        (status = 400, description = "Invalid room name"),
        (status = 502, description = "Realtime database error")
    ),
    tag = "Chat"
)]
fn doc_list_messages_handler() {}

#[utoipa::path(
    post,
    path = "/chat/rooms/{room}/messages",
    params(("room" = String, Path, description = "Room name ([A-Za-z0-9_-])")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ChatMessage),
        (status = 400, description = "Empty or too long message"),
        (status = 502, description = "Realtime database error")
    ),
    tag = "Chat"
)]
fn doc_send_message_handler() {}

#[utoipa::path(
    delete,
    path = "/chat/rooms/{room}/messages/{id}",
    params(
        ("room" = String, Path, description = "Room name"),
        ("id" = String, Path, description = "Message key")
    ),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 404, description = "Unknown message"),
        (status = 502, description = "Realtime database error")
    ),
    tag = "Chat"
)]
fn doc_delete_message_handler() {}

#[utoipa::path(
    get,
    path = "/chat/rooms/{room}/events",
    params(("room" = String, Path, description = "Room name")),
    responses((status = 200, description = "Server-sent `put`/`patch` events", content_type = "text/event-stream")),
    tag = "Chat"
)]
fn doc_room_events_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_messages_handler,
        doc_send_message_handler,
        doc_delete_message_handler,
        doc_room_events_handler
    ),
    components(schemas(ChatMessage, MessagesResponse, SendMessageRequest)),
    tags((name = "Chat", description = "Realtime chat rooms")),
    servers((url = "/api", description = "Storefront API server"))
)]
pub struct ChatApiDoc;
