// --- File: crates/storefront_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

// Include the client module
pub mod client;

/// Builds the JSON error envelope used by every storefront endpoint:
/// `{ "error": { "message": ..., "code": ..., "fields": ... } }`.
/// `fields` is only present for field-scoped validation failures.
pub fn error_response(status_code: u16, message: &str, fields: Option<Value>) -> Response {
    let status_code = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut error = json!({
        "message": message,
        "code": status_code.as_u16(),
    });
    if let (Some(fields), Some(obj)) = (fields, error.as_object_mut()) {
        obj.insert("fields".to_string(), fields);
    }

    (status_code, Json(json!({ "error": error }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = error_response(404, "Cart abc not found", None);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 404);
        assert_eq!(body["error"]["message"], "Cart abc not found");
        assert!(body["error"].get("fields").is_none());
    }

    #[test]
    fn test_unknown_status_falls_back_to_500() {
        let response = error_response(1000, "odd", None);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_envelope_with_fields() {
        let response = error_response(422, "Validation failed", Some(json!({"name": "too short"})));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["fields"]["name"], "too short");
    }
}
