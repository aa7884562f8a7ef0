//! Realtime database client module
//!
//! This module provides a client for the REST interface of a realtime
//! key-value database. Every location is addressed as `{base_url}/{path}.json`
//! and, when a token is configured, authenticated with an `auth` query
//! parameter.
//!
//! Besides the plain reads and writes, a location can be streamed as
//! server-sent events. The database sends `put` events (the data at a path
//! was replaced) and `patch` events (children were merged), plus
//! `keep-alive`, `cancel` and `auth_revoked` control events.

use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use storefront_common::services::{BoxFuture, RealtimeEvent, RealtimeEventKind, RealtimeStore};
use storefront_common::{
    create_streaming_client, external_service_error, StorefrontError, HTTP_CLIENT,
};
use storefront_config::ChatConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Connect timeout for event streams; the stream itself has no deadline.
pub const STREAM_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when talking to the realtime database
#[derive(Error, Debug)]
pub enum RealtimeError {
    /// Error during the HTTP request
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the database
    #[error("Database returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A response or event body that could not be decoded
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The server closed the subscription (e.g. security rules changed)
    #[error("Subscription cancelled: {0}")]
    Cancelled(String),

    /// The auth token expired while streaming
    #[error("Auth token revoked")]
    AuthRevoked,
}

impl From<RealtimeError> for StorefrontError {
    fn from(err: RealtimeError) -> Self {
        match err {
            RealtimeError::AuthRevoked => StorefrontError::AuthError(err.to_string()),
            other => external_service_error("Realtime database", other),
        }
    }
}

/// Body of `POST` responses: the generated child key.
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Payload of `put` and `patch` events.
#[derive(Debug, Deserialize)]
struct EventPayload {
    path: String,
    data: Value,
}

/// Client for the realtime database REST interface
pub struct RealtimeDatabaseClient {
    /// Client for request/response calls (bounded by a total timeout)
    client: Client,
    /// Client for event streams (connect timeout only)
    stream_client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RealtimeDatabaseClient {
    pub fn new(
        client: Client,
        stream_client: Client,
        base_url: impl Into<String>,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            client,
            stream_client,
            base_url: base_url.into(),
            auth_token,
        }
    }

    /// Builds a client from the chat configuration, sharing the global HTTP client.
    ///
    /// # Errors
    ///
    /// Fails only if the streaming client cannot be built (TLS backend init).
    pub fn from_config(config: &ChatConfig) -> Result<Self, RealtimeError> {
        Ok(Self::new(
            HTTP_CLIENT.clone(),
            create_streaming_client(STREAM_CONNECT_TIMEOUT_SECS)?,
            config.database_url.clone(),
            config.auth_token().map(str::to_string),
        ))
    }

    /// `{base_url}/{path}.json`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, RealtimeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RealtimeError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Replaces the value at `path` (`PUT`).
    pub async fn write(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        let request = self.authorized(self.client.put(self.url(path)).json(value));
        Self::check(request.send().await?).await?;
        debug!("[Realtime] PUT {}", path);
        Ok(())
    }

    /// Appends `value` under `path` (`POST`) and returns the generated key.
    pub async fn push(&self, path: &str, value: &Value) -> Result<String, RealtimeError> {
        let request = self.authorized(self.client.post(self.url(path)).json(value));
        let response = Self::check(request.send().await?).await?;
        let body: PushResponse = response
            .json()
            .await
            .map_err(|e| RealtimeError::InvalidPayload(e.to_string()))?;
        debug!("[Realtime] POST {} -> {}", path, body.name);
        Ok(body.name)
    }

    /// Merges the fields of `value` into the object at `path` (`PATCH`).
    pub async fn update(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        let request = self.authorized(self.client.patch(self.url(path)).json(value));
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// Removes the value at `path`. Removing a missing path succeeds.
    pub async fn delete(&self, path: &str) -> Result<(), RealtimeError> {
        let request = self.authorized(self.client.delete(self.url(path)));
        Self::check(request.send().await?).await?;
        debug!("[Realtime] DELETE {}", path);
        Ok(())
    }

    /// Reads the value at `path`; `Value::Null` when nothing is stored there.
    pub async fn get(&self, path: &str) -> Result<Value, RealtimeError> {
        let request = self.authorized(self.client.get(self.url(path)));
        let response = Self::check(request.send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| RealtimeError::InvalidPayload(e.to_string()))
    }

    /// Streams changes below `path`. The first event is a `put` with the
    /// current contents. The stream ends when the server closes it.
    pub fn subscribe(&self, path: &str) -> BoxStream<'static, Result<RealtimeEvent, RealtimeError>> {
        let request = self
            .authorized(self.stream_client.get(self.url(path)))
            .header(header::ACCEPT, "text/event-stream");

        stream::once(async move {
            match request.send().await {
                Ok(response) => Self::check(response).await,
                Err(e) => Err(RealtimeError::from(e)),
            }
        })
        .map(|result| match result {
            Ok(response) => decode_event_stream(response.bytes_stream()).boxed(),
            Err(e) => stream::iter([Err(e)]).boxed(),
        })
        .flatten()
        .boxed()
    }
}

/// Turns a raw byte stream into realtime events.
pub fn decode_event_stream<S, B>(bytes: S) -> impl Stream<Item = Result<RealtimeEvent, RealtimeError>>
where
    S: Stream<Item = Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    bytes
        .scan(SseDecoder::default(), |decoder, chunk| {
            let items = match chunk {
                Ok(chunk) => decoder.feed(chunk.as_ref()),
                Err(e) => vec![Err(RealtimeError::from(e))],
            };
            futures_util::future::ready(Some(stream::iter(items)))
        })
        .flatten()
}

/// Incremental server-sent events decoder.
///
/// Frames are separated by a blank line; a frame may arrive split over
/// several chunks, so unterminated input is buffered.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<RealtimeEvent, RealtimeError>> {
        self.buffer.extend(chunk.iter().filter(|&&b| b != b'\r'));
        let mut events = Vec::new();
        while let Some(end) = self.buffer.windows(2).position(|w| w == b"\n\n") {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            let frame = String::from_utf8_lossy(&frame[..end]);
            if let Some(event) = decode_frame(&frame) {
                events.push(event);
            }
        }
        events
    }
}

fn decode_frame(frame: &str) -> Option<Result<RealtimeEvent, RealtimeError>> {
    let mut event = None;
    let mut data = String::new();
    for line in frame.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            event = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(value.trim_start());
        }
    }

    let kind = match event.as_deref()? {
        "put" => RealtimeEventKind::Put,
        "patch" => RealtimeEventKind::Patch,
        "keep-alive" => return None,
        "cancel" => return Some(Err(RealtimeError::Cancelled(data))),
        "auth_revoked" => return Some(Err(RealtimeError::AuthRevoked)),
        other => {
            warn!("[Realtime] Ignoring unknown event '{}'", other);
            return None;
        }
    };

    Some(
        serde_json::from_str::<EventPayload>(&data)
            .map(|payload| RealtimeEvent {
                kind,
                path: payload.path,
                data: payload.data,
            })
            .map_err(|e| RealtimeError::InvalidPayload(e.to_string())),
    )
}

impl RealtimeStore for RealtimeDatabaseClient {
    fn write(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError> {
        let path = path.to_string();
        Box::pin(async move { Ok(RealtimeDatabaseClient::write(self, &path, &value).await?) })
    }

    fn push(&self, path: &str, value: Value) -> BoxFuture<'_, String, StorefrontError> {
        let path = path.to_string();
        Box::pin(async move { Ok(RealtimeDatabaseClient::push(self, &path, &value).await?) })
    }

    fn update(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError> {
        let path = path.to_string();
        Box::pin(async move { Ok(RealtimeDatabaseClient::update(self, &path, &value).await?) })
    }

    fn delete(&self, path: &str) -> BoxFuture<'_, (), StorefrontError> {
        let path = path.to_string();
        Box::pin(async move { Ok(RealtimeDatabaseClient::delete(self, &path).await?) })
    }

    fn get(&self, path: &str) -> BoxFuture<'_, Value, StorefrontError> {
        let path = path.to_string();
        Box::pin(async move { Ok(RealtimeDatabaseClient::get(self, &path).await?) })
    }

    fn subscribe(&self, path: &str) -> BoxStream<'static, Result<RealtimeEvent, StorefrontError>> {
        RealtimeDatabaseClient::subscribe(self, path)
            .map(|item| item.map_err(StorefrontError::from))
            .boxed()
    }
}
