use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, header},
    response::Response,
};

use cspcollect_core::Collector;

use crate::{WebState, app_router};

pub(super) struct TestHarness {
    _temp: tempfile::TempDir,
    pub(super) state: WebState,
    pub(super) router: Router,
}

impl TestHarness {
    pub(super) fn setup() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let collector = Collector::open(temp.path().join("reports")).expect("collector");
        let state = WebState::new(collector);
        let router = app_router(state.clone());
        Self {
            _temp: temp,
            state,
            router,
        }
    }

    /// Stored record files, sorted by name; temp artifacts are excluded.
    pub(super) fn stored_files(&self) -> Vec<PathBuf> {
        let root = self.state.collector.store().root();
        let mut files: Vec<_> = std::fs::read_dir(root)
            .expect("read store dir")
            .map(|entry| entry.expect("dir entry").path())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| !name.to_string_lossy().starts_with('.'))
            })
            .collect();
        files.sort();
        files
    }
}

pub(super) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// A submit request as browsers send it: POST with a peer address and an
/// agent string. Peer and agent can be stripped by the caller afterwards.
pub(super) fn submit_request(path: &str, body: impl Into<Body>) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::USER_AGENT, "TestAgent/1.0")
        .header(header::CONTENT_TYPE, "application/csp-report")
        .body(body.into())
        .expect("submit request");
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 5], 443))));
    request
}
