use axum::{
    Json,
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use cspcollect_core::Submission;

use crate::WebState;
use crate::extract::request_metadata;

/// Largest request body the collector will read. Larger submissions are
/// treated as malformed instead of failing the request.
pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;

pub(crate) const ACK_ACCEPTED: &str = "Report accepted.";
pub(crate) const ACK_DISCARDED: &str = "Not a CSP violation report.";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Accept one violation-report submission. The caller always receives
/// HTTP 200 with one of two fixed bodies; whether persistence succeeded
/// is deliberately not observable from the outside.
pub async fn submit(State(state): State<WebState>, request: Request) -> Response {
    let metadata = request_metadata(&request);
    let hint = request.uri().query().map(str::to_owned);

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "request body rejected");
            return ack(ACK_DISCARDED);
        }
    };

    match state.collector.ingest(&body, hint.as_deref(), metadata) {
        Submission::Stored(path) => {
            tracing::debug!(path = %path.display(), "violation report stored");
            ack(ACK_ACCEPTED)
        }
        Submission::StoreFailed(err) => {
            tracing::error!(error = %err, "failed to persist violation report");
            ack(ACK_ACCEPTED)
        }
        Submission::Discarded => {
            tracing::debug!("request body is not a violation report");
            ack(ACK_DISCARDED)
        }
    }
}

pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

fn ack(body: &'static str) -> Response {
    (StatusCode::OK, body).into_response()
}
