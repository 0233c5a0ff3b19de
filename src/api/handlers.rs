use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde_json::Value;
use thiserror::Error;

use crate::AppState;

use super::models::{
    ErrorResponse, InboundQuestion, MALFORMED_BODY_MESSAGE, NOT_FOUND_MESSAGE,
    UPSTREAM_FAILURE_MESSAGE,
};

pub async fn relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let question = question_from_body(&headers, &body).map_err(|e| {
        debug!("rejecting inbound body: {e}");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(MALFORMED_BODY_MESSAGE)),
        )
    })?;

    match state.upstream.relay(question).await {
        Ok(answer) => Ok(Json(answer)),
        Err(e) => {
            error!("relay to upstream failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(UPSTREAM_FAILURE_MESSAGE)),
            ))
        }
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(NOT_FOUND_MESSAGE)),
    )
        .into_response()
}

#[derive(Debug, Error)]
pub(crate) enum InboundBodyError {
    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("top-level JSON value must be an object or array")]
    NotContainer,
}

/// Pulls `question` out of the inbound body.
///
/// Bodies without an `application/json` content type, empty bodies and
/// arrays yield `null`. Malformed JSON and bare primitives are rejected.
pub(crate) fn question_from_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, InboundBodyError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let parsed: Value = serde_json::from_slice(body)?;
    let inbound = match parsed {
        Value::Object(_) => serde_json::from_value(parsed)?,
        Value::Array(_) => InboundQuestion::default(),
        _ => return Err(InboundBodyError::NotContainer),
    };
    Ok(inbound.question)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    value.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case("application/json")
}
