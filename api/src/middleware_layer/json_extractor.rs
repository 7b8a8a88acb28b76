//! Normalises axum's plain-text JSON rejections into the response envelope.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

// Rejection bodies are short; anything bigger is not ours to rewrite.
const MAX_REJECTION_BODY: usize = 64 * 1024;

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_REJECTION_BODY)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    for key in ["user_name", "UserName", "topic", "Topic"] {
        if msg.contains(key) {
            return Some(key.to_string());
        }
    }
    None
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(v) = HeaderValue::from_str(&id) {
        parts.headers.insert(REQUEST_ID_HEADER, v);
    }
    id
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("missing field") {
        Some("Send both fields, e.g. {\"user_name\": \"Bob\", \"topic\": \"Valves\"}.".into())
    } else if msg.contains("Content-Type") {
        Some("Set header Content-Type: application/json.".into())
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).".into())
    } else {
        None
    }
}

/// Envelope code for the rejection statuses produced by `Json<T>`.
fn rejection_code(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("BAD_REQUEST"),
        StatusCode::UNPROCESSABLE_ENTITY => Some("UNPROCESSABLE_ENTITY"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => Some("UNSUPPORTED_MEDIA_TYPE"),
        _ => None,
    }
}

/// Rewrites 400/415/422 responses whose body is not already an envelope.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    // Everything but extractor rejections passes through.
    let Some(code) = rejection_code(status) else {
        return res;
    };

    let (mut parts, bytes) = take_body(res).await;
    let req_id = ensure_request_id(&mut parts);

    // Handler errors are already enveloped.
    let already_json = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if already_json {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    debug!(%req_id, %status, "mapping json rejection");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: hint_for(&original),
    };

    let envelope = ApiResponse::<()>::error(
        code,
        original.trim(),
        vec![detail],
    );

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_field_from_serde_message() {
        assert_eq!(
            guess_path_from_serde_msg("missing field `topic` at line 1 column 20"),
            Some("topic".into())
        );
        assert_eq!(guess_path_from_serde_msg("EOF while parsing"), None);
    }

    #[test]
    fn rejection_statuses_have_codes() {
        assert_eq!(
            rejection_code(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            Some("UNSUPPORTED_MEDIA_TYPE")
        );
        assert_eq!(rejection_code(StatusCode::BAD_REQUEST), Some("BAD_REQUEST"));
        assert_eq!(rejection_code(StatusCode::NOT_FOUND), None);
        assert_eq!(rejection_code(StatusCode::TOO_MANY_REQUESTS), None);
    }

    #[test]
    fn hints_missing_fields() {
        assert!(hint_for("missing field `user_name`").is_some());
        assert!(hint_for("trailing characters").is_none());
    }

    #[test]
    fn keeps_existing_request_id() {
        let (mut parts, _) = Response::builder()
            .header(REQUEST_ID_HEADER, "abc")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(ensure_request_id(&mut parts), "abc");
    }

    #[test]
    fn stamps_request_id_when_absent() {
        let (mut parts, _) = Response::builder().body(()).unwrap().into_parts();
        let id = ensure_request_id(&mut parts);
        assert!(id.starts_with("req-"));
        assert_eq!(parts.headers.get(REQUEST_ID_HEADER).unwrap(), id.as_str());
    }
}
