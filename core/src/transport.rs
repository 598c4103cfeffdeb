//! Network side of an upload.
//!
//! A [`Transport`] starts one multipart `POST` and hands back an
//! [`UploadTask`]: a stream of [`TransferEvent`]s ending with the service's
//! response. Platform callbacks (XHR handlers, a tokio task) push events
//! through a [`TransferSender`].

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::Stream;
use serde::Deserialize;

use crate::error::{TransportError, TransportResult, UploadError, UploadResult};
use crate::file::LocalFile;
use crate::state::ProcessedImage;

/// Raw answer from the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One step of a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferEvent {
    /// Request body bytes sent so far. `total` is 0 when unknown.
    Progress { loaded: u64, total: u64 },
    /// Response received or transfer failed. Always the last event.
    Finished(TransportResult<ServiceResponse>),
}

/// Starts uploads.
pub trait Transport {
    type File: LocalFile;

    /// Send `file` as the `image` field of a multipart `POST` to `endpoint`.
    fn start(&self, endpoint: &str, file: &Self::File) -> TransportResult<UploadTask>;
}

/// Producer half of an [`UploadTask`].
#[derive(Clone, Debug)]
pub struct TransferSender {
    tx: mpsc::UnboundedSender<TransferEvent>,
}

impl TransferSender {
    pub fn progress(&self, loaded: u64, total: u64) {
        let _ = self.tx.unbounded_send(TransferEvent::Progress { loaded, total });
    }

    /// Deliver the final result and close the stream.
    pub fn finish(&self, result: TransportResult<ServiceResponse>) {
        let _ = self.tx.unbounded_send(TransferEvent::Finished(result));
        self.tx.close_channel();
    }

    /// Whether the task side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// An upload in flight.
///
/// Dropping it before the final event runs the abort hook, cancelling the
/// underlying request.
pub struct UploadTask {
    rx: mpsc::UnboundedReceiver<TransferEvent>,
    on_abort: Option<Box<dyn FnOnce()>>,
    finished: bool,
}

impl UploadTask {
    /// A fresh task and the sender feeding it.
    pub fn channel() -> (TransferSender, UploadTask) {
        let (tx, rx) = mpsc::unbounded();
        let task = UploadTask {
            rx,
            on_abort: None,
            finished: false,
        };
        (TransferSender { tx }, task)
    }

    /// Run `hook` if the task is dropped before it finished.
    pub fn on_abort(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_abort = Some(Box::new(hook));
        self
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Stream for UploadTask {
    type Item = TransferEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }
        let polled = Pin::new(&mut self.rx).poll_next(cx);
        match &polled {
            Poll::Ready(Some(TransferEvent::Finished(_))) | Poll::Ready(None) => {
                self.finished = true;
            }
            _ => {}
        }
        polled
    }
}

impl Drop for UploadTask {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(hook) = self.on_abort.take() {
            log::debug!("Aborting unfinished upload");
            hook();
        }
    }
}

/// Error body sent by the service on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extract the `error` string of a JSON failure body, if any.
fn service_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = parsed.error.trim();
    (!message.is_empty()).then(|| message.to_string())
}

/// Turn the service's answer into a processed image or an upload error.
pub fn interpret_response(response: ServiceResponse) -> UploadResult<ProcessedImage> {
    if !response.is_success() {
        return Err(UploadError::Service {
            status: response.status,
            message: service_message(&response.body),
        });
    }
    if response.body.is_empty() {
        return Err(TransportError::MalformedResponse("empty image body".to_string()).into());
    }
    let content_type = response
        .content_type
        .filter(|ct| !ct.trim().is_empty())
        .unwrap_or_else(|| "image/png".to_string());
    Ok(ProcessedImage::new(response.body, content_type))
}
