use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::header;

use cspcollect_core::CollectionMetadata;

/// Capture collection-time context from the request. Every field falls
/// back to an empty string; a missing peer address or agent header is a
/// normal condition, not a failure.
pub(crate) fn request_metadata(request: &Request) -> CollectionMetadata {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    CollectionMetadata::capture(remote_addr, user_agent)
}
