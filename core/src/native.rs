//! Native HTTP transport built on reqwest.
//!
//! Each upload runs on its own tokio task. The file part is streamed in
//! chunks so progress can be reported as the body goes out; dropping the
//! [`UploadTask`] aborts the tokio task and with it the request.

use std::sync::Arc;

use futures::stream;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};

use crate::config::UPLOAD_FIELD;
use crate::error::{TransportError, TransportResult};
use crate::file::{InMemoryFile, LocalFile};
use crate::transport::{ServiceResponse, TransferSender, Transport, UploadTask};

/// Default size of the chunks the file part is streamed in.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Uploads [`InMemoryFile`]s with reqwest.
///
/// [`Transport::start`] must be called from within a tokio runtime.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    chunk_size: usize,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Use a preconfigured client (timeouts, proxies...).
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the streaming chunk size (minimum 1 byte).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    type File = InMemoryFile;

    fn start(&self, endpoint: &str, file: &InMemoryFile) -> TransportResult<UploadTask> {
        let (events, task) = UploadTask::channel();

        let body = progress_body(file.bytes().clone(), self.chunk_size, events.clone());
        let mut part = Part::stream_with_length(body, file.size()).file_name(file.name());
        let mime = file.mime();
        if !mime.is_empty() {
            part = part
                .mime_str(&mime)
                .map_err(|e| TransportError::Request(e.to_string()))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        log::debug!("POST {} ({} bytes)", endpoint, file.size());
        let request = self.client.post(endpoint).multipart(form);
        let handle = tokio::spawn(async move {
            let result = send(request).await;
            events.finish(result);
        });

        Ok(task.on_abort(move || handle.abort()))
    }
}

/// Streams `bytes` in chunks, reporting each chunk as it is handed to the
/// connection.
fn progress_body(bytes: Arc<[u8]>, chunk_size: usize, events: TransferSender) -> Body {
    let total = bytes.len() as u64;
    let starts = (0..bytes.len()).step_by(chunk_size);
    let chunks = stream::iter(starts.map(move |start| {
        let end = (start + chunk_size).min(bytes.len());
        events.progress(end as u64, total);
        Ok::<_, std::io::Error>(bytes[start..end].to_vec())
    }));
    Body::wrap_stream(chunks)
}

async fn send(request: reqwest::RequestBuilder) -> TransportResult<ServiceResponse> {
    let response = request
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?
        .to_vec();

    log::debug!("Response {} ({} bytes)", status, body.len());
    Ok(ServiceResponse {
        status,
        content_type,
        body,
    })
}
