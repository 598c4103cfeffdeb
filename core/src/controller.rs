//! Upload/preview controller.
//!
//! Drives one interaction from file selection to result display:
//!
//! 1. [`Controller::select_file`] validates the drop, opens a new selection
//!    cycle and cancels the previous cycle's upload
//! 2. [`Controller::upload_file`] sends the file, publishes progress and
//!    resolves the response into a processed image or an error message
//! 3. [`Controller::download_result`] hands the processed image to the sink
//!
//! All state changes go through the [`StateStore`] as [`Event`]s.

use std::cell::{Cell, RefCell};

use futures::future::{AbortHandle, Abortable};
use futures::StreamExt;

use crate::config::{ApiConfig, DOWNLOAD_FILENAME};
use crate::error::{SaveResult, TransportError, UploadError, UploadResult};
use crate::file::{validate_selection, LocalFile};
use crate::progress::ProgressTracker;
use crate::sink::ImageSink;
use crate::state::{Event, ProcessedImage, StateStore, UiState};
use crate::transport::{interpret_response, TransferEvent, Transport};

/// How a selection cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Validation failed, nothing was sent.
    Rejected,
    Succeeded,
    Failed,
    /// A newer selection cancelled this upload.
    Superseded,
}

pub struct Controller<T, K, S> {
    transport: T,
    sink: K,
    store: S,
    endpoint: String,
    cycle: Cell<u64>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl<T, K, S> Controller<T, K, S>
where
    T: Transport,
    K: ImageSink,
    S: StateStore,
{
    pub fn new(config: &ApiConfig, transport: T, sink: K, store: S) -> Self {
        let cycle = store.snapshot().cycle;
        Self {
            transport,
            sink,
            store,
            endpoint: config.remove_bg_url(),
            cycle: Cell::new(cycle),
            in_flight: RefCell::new(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current interface state.
    pub fn state(&self) -> UiState {
        self.store.snapshot()
    }

    pub fn drag_entered(&self) {
        self.store.apply(Event::DragEntered);
    }

    pub fn drag_left(&self) {
        self.store.apply(Event::DragLeft);
    }

    /// Handle a drop or file-dialog selection.
    ///
    /// A rejected selection only sets the error message: the previous
    /// preview, result and any in-flight upload are left alone. An accepted
    /// one starts a new cycle and runs the upload to completion.
    pub async fn select_file(&self, files: Vec<T::File>) -> Outcome {
        let file = match validate_selection(files) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Selection rejected: {:?}", err);
                let message = UploadError::from(err).user_message();
                self.store.apply(Event::Rejected { message });
                return Outcome::Rejected;
            }
        };

        let cycle = self.begin_cycle();
        log::info!(
            "Selected {} ({} bytes, {}), cycle {}",
            file.name(),
            file.size(),
            file.mime(),
            cycle
        );
        self.store.apply(Event::Selected {
            cycle,
            original: file.preview(),
        });

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight.replace(Some(handle));

        let outcome = Abortable::new(self.upload_file(cycle, &file), registration)
            .await
            .unwrap_or(Outcome::Superseded);

        if self.cycle.get() == cycle {
            self.in_flight.replace(None);
        }
        if outcome == Outcome::Superseded {
            log::info!("Upload of cycle {} superseded", cycle);
        }
        outcome
    }

    /// Upload a validated file for `cycle` and publish the result.
    ///
    /// Normally called by [`Controller::select_file`]; always leaves the
    /// uploading phase, whatever happens.
    pub async fn upload_file(&self, cycle: u64, file: &T::File) -> Outcome {
        match self.transfer(cycle, file).await {
            Ok(image) => {
                log::info!("Cycle {}: received {} bytes ({})", cycle, image.len(), image.content_type());
                self.store.apply(Event::Succeeded { cycle, image });
                Outcome::Succeeded
            }
            Err(err) => {
                log::warn!("Cycle {}: upload failed: {}", cycle, err);
                self.store.apply(Event::Failed {
                    cycle,
                    message: err.user_message(),
                });
                Outcome::Failed
            }
        }
    }

    async fn transfer(&self, cycle: u64, file: &T::File) -> UploadResult<ProcessedImage> {
        let mut task = self.transport.start(&self.endpoint, file)?;
        let mut tracker = ProgressTracker::new();

        while let Some(event) = task.next().await {
            match event {
                TransferEvent::Progress { loaded, total } => {
                    if let Some(percent) = tracker.observe(loaded, total) {
                        self.store.apply(Event::Progress { cycle, percent });
                    }
                }
                TransferEvent::Finished(result) => return interpret_response(result?),
            }
        }
        Err(TransportError::Aborted.into())
    }

    /// Save the processed image as `removed_bg.png`.
    ///
    /// Returns `Ok(false)` without touching the sink when there is nothing
    /// to download.
    pub fn download_result(&self) -> SaveResult<bool> {
        let Some(image) = self.store.snapshot().result else {
            return Ok(false);
        };
        self.sink.save(image.bytes(), DOWNLOAD_FILENAME)?;
        log::info!("Downloaded {} ({} bytes)", DOWNLOAD_FILENAME, image.len());
        Ok(true)
    }

    /// Open a new selection cycle, cancelling the previous upload.
    fn begin_cycle(&self) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        let cycle = self.cycle.get() + 1;
        self.cycle.set(cycle);
        cycle
    }
}
