//! Axum route handlers for the translation endpoint.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use polyglot_application::TranslateError;
use serde_json::Value;
use tracing::{error, info, warn};

use super::AppState;
use super::models::{ErrorResponse, TranslateResponse};

/// Build an `{error}` response with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Status for a failed translation. Upstream statuses pass through unchanged.
pub fn status_for(error: &TranslateError) -> StatusCode {
    match error {
        TranslateError::Validation(_) => StatusCode::BAD_REQUEST,
        TranslateError::Upstream { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        TranslateError::Protocol(_) => StatusCode::BAD_GATEWAY,
        TranslateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /api/translate`
///
/// Accepts `{credential, sourceLanguage, targetLanguage, sourceCode}` and
/// replies `{translation, result}` on success. A reply that does not follow
/// the response protocol is still a 200, carrying the raw text and a
/// `protocolError` diagnostic instead of `result`.
///
/// # Errors
///
/// - 400: malformed JSON or a missing/empty field
/// - 413: body over `max_body_bytes`
/// - upstream status: the completion service failed
/// - 504: the request deadline expired
/// - 500: anything unexpected
pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    let input: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}"));
        }
    };

    let work = AssertUnwindSafe(state.use_case.execute_value(&input)).catch_unwind();
    let outcome = match tokio::time::timeout(state.request_timeout, work).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                timeout_secs = state.request_timeout.as_secs(),
                "Translation request timed out"
            );
            return error_response(StatusCode::GATEWAY_TIMEOUT, "Translation timed out");
        }
    };

    let result = outcome.unwrap_or_else(|payload| {
        let error = TranslateError::Internal(panic_message(payload.as_ref()));
        error!(error = %error, "Translation task panicked");
        Err(error)
    });

    match result {
        Ok(parsed) => {
            info!(status = 200, "Translation served");
            (StatusCode::OK, Json(TranslateResponse::parsed(parsed))).into_response()
        }
        Err(TranslateError::Protocol(failure)) => {
            warn!(violation = %failure.violation, "Serving raw reply with protocol error");
            let body = TranslateResponse::protocol_failure(failure);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            info!(status = status.as_u16(), kind = e.kind(), "Translation failed");
            error_response(status, e.user_message())
        }
    }
}

/// Text of a caught panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// `OPTIONS /api/translate`: CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on a known route
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Unknown path
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Attach the permissive CORS headers to every response
pub async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_domain::DomainError;

    #[test]
    fn test_status_for_each_error_kind() {
        assert_eq!(
            status_for(&TranslateError::Validation(DomainError::MissingField("credential"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&TranslateError::Upstream {
                status: 429,
                message: "rate limited".to_string()
            }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(&TranslateError::Upstream {
                status: 504,
                message: "timeout".to_string()
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&TranslateError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_panic_message_reads_string_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("gateway exploded");
        assert_eq!(panic_message(payload.as_ref()), "gateway exploded");

        let payload: Box<dyn Any + Send> = Box::new(format!("bad index {}", 3));
        assert_eq!(panic_message(payload.as_ref()), "bad index 3");

        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "panic with non-string payload");
    }

    #[test]
    fn test_out_of_range_upstream_status_becomes_bad_gateway() {
        let error = TranslateError::Upstream {
            status: 1000,
            message: "odd".to_string(),
        };
        assert_eq!(status_for(&error), StatusCode::BAD_GATEWAY);
    }
}
