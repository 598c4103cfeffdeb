//! End-to-end uploads through reqwest against a mock `/remove-bg` service.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use cutout::native::ReqwestTransport;
use cutout::{
    ApiConfig, Controller, DirectorySink, InMemoryFile, MemoryStore, Outcome, Phase, StateStore,
    Event, UiState, GENERIC_ERROR_MESSAGE,
};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

/// What the mock service saw in the multipart body.
#[derive(Clone, Debug, Default)]
struct Received {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    len: usize,
}

#[derive(Clone)]
struct Mock {
    reply: fn(&Received) -> Response,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn remove_bg(State(mock): State<Mock>, mut multipart: Multipart) -> Response {
    let mut received = Received::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        received.field = field.name().unwrap_or("").to_string();
        received.file_name = field.file_name().map(str::to_string);
        received.content_type = field.content_type().map(str::to_string);
        received.len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
    }
    let response = (mock.reply)(&received);
    mock.received.lock().unwrap().push(received);
    response
}

/// Start the mock on an ephemeral port and return its base URL.
async fn serve(reply: fn(&Received) -> Response) -> (String, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let mock = Mock {
        reply,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/remove-bg", post(remove_bg))
        .layer(axum::extract::DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), received)
}

fn png_reply(_: &Received) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], PNG.to_vec()).into_response()
}

fn internal_error(_: &Received) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal error" })),
    )
        .into_response()
}

fn bad_gateway(_: &Received) -> Response {
    (StatusCode::BAD_GATEWAY, "upstream down").into_response()
}

/// Records every state so progress can be checked afterwards.
#[derive(Default)]
struct History {
    inner: MemoryStore,
    states: std::cell::RefCell<Vec<UiState>>,
}

impl StateStore for History {
    fn snapshot(&self) -> UiState {
        self.inner.snapshot()
    }

    fn apply(&self, event: Event) {
        self.inner.apply(event);
        self.states.borrow_mut().push(self.inner.snapshot());
    }
}

fn jpg(size: usize) -> InMemoryFile {
    InMemoryFile::new("portrait.jpg", "image/jpeg", vec![0xd8u8; size])
}

#[tokio::test]
async fn test_successful_upload_and_download() {
    let (base_url, received) = serve(png_reply).await;
    let out = tempfile::tempdir().unwrap();
    let controller = Controller::new(
        &ApiConfig::new(base_url),
        ReqwestTransport::new().with_chunk_size(256 * 1024),
        DirectorySink::new(out.path()),
        History::default(),
    );

    let outcome = controller.select_file(vec![jpg(2_000_000)]).await;
    assert_eq!(outcome, Outcome::Succeeded);

    let seen = received.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].field, "image");
    assert_eq!(seen[0].file_name.as_deref(), Some("portrait.jpg"));
    assert_eq!(seen[0].content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(seen[0].len, 2_000_000);

    let progress: Vec<u8> = controller
        .store()
        .states
        .borrow()
        .iter()
        .filter(|s| s.phase == Phase::Uploading)
        .map(|s| s.progress)
        .collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));

    let state = controller.state();
    assert_eq!(state.error, None);
    assert_eq!(state.result.as_ref().map(|r| r.bytes()), Some(PNG));

    assert!(controller.download_result().unwrap());
    assert!(controller.download_result().unwrap());
    let saved = std::fs::read(out.path().join("removed_bg.png")).unwrap();
    assert_eq!(saved, PNG);
}

#[tokio::test]
async fn test_service_error_is_shown() {
    let (base_url, _) = serve(internal_error).await;
    let controller = Controller::new(
        &ApiConfig::new(base_url),
        ReqwestTransport::new(),
        DirectorySink::new(tempfile::tempdir().unwrap().path()),
        MemoryStore::new(),
    );

    let outcome = controller.select_file(vec![jpg(2_000_000)]).await;
    assert_eq!(outcome, Outcome::Failed);

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some("Internal error"));
    assert!(state.render_plan().processed.is_none());
}

#[tokio::test]
async fn test_plain_text_error_uses_generic_message() {
    let (base_url, _) = serve(bad_gateway).await;
    let controller = Controller::new(
        &ApiConfig::new(base_url),
        ReqwestTransport::new(),
        DirectorySink::new(tempfile::tempdir().unwrap().path()),
        MemoryStore::new(),
    );

    controller.select_file(vec![jpg(1024)]).await;
    assert_eq!(controller.state().error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_unreachable_service_uses_generic_message() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = Controller::new(
        &ApiConfig::new(format!("http://{}", addr)),
        ReqwestTransport::new(),
        DirectorySink::new(tempfile::tempdir().unwrap().path()),
        MemoryStore::new(),
    );

    let outcome = controller.select_file(vec![jpg(1024)]).await;
    assert_eq!(outcome, Outcome::Failed);
    let state = controller.state();
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_oversized_file_never_reaches_service() {
    let (base_url, received) = serve(png_reply).await;
    let controller = Controller::new(
        &ApiConfig::new(base_url),
        ReqwestTransport::new(),
        DirectorySink::new(tempfile::tempdir().unwrap().path()),
        MemoryStore::new(),
    );

    let big = InMemoryFile::new("poster.png", "image/png", vec![0u8; 20_000_000]);
    assert_eq!(controller.select_file(vec![big]).await, Outcome::Rejected);
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(
        controller.state().error.as_deref(),
        Some("File size too large. Maximum size is 16MB.")
    );
}
