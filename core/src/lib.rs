//! # Cutout - background-removal upload client
//!
//! Platform-free core of the Cutout page: the user drops an image, it is
//! uploaded to a remote `/remove-bg` service, and the processed image comes
//! back for preview and download.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   select_file   ┌────────────┐   start    ┌─────────────┐
//! │  Dropzone  │────────────────▶│ Controller │───────────▶│  Transport  │
//! └────────────┘                 └────────────┘◀───────────└─────────────┘
//!                                   │ apply(Event)   progress / response
//!                                   ▼
//!                              ┌────────────┐  download   ┌─────────────┐
//!                              │ StateStore │────────────▶│  ImageSink  │
//!                              │ (UiState)  │             └─────────────┘
//!                              └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cutout::{ApiConfig, Controller, DirectorySink, InMemoryFile, MemoryStore};
//! use cutout::native::ReqwestTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = Controller::new(
//!         &ApiConfig::from_env(),
//!         ReqwestTransport::new(),
//!         DirectorySink::new("."),
//!         MemoryStore::new(),
//!     );
//!     let file = InMemoryFile::read("portrait.jpg").unwrap();
//!     controller.select_file(vec![file]).await;
//!     controller.download_result().unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - API base URL and fixed limits
//! - [`error`] - Error types
//! - [`file`] - Local files and selection validation
//! - [`progress`] - Upload percentage tracking
//! - [`state`] - Interface state record and stores
//! - [`transport`] - Upload tasks and response interpretation
//! - [`sink`] - Saving the processed image
//! - [`controller`] - The upload/preview workflow
//! - `native` - reqwest transport (feature `native`)

pub mod config;
pub mod error;

pub mod file;
pub mod progress;
pub mod state;

pub mod sink;
pub mod transport;

pub mod controller;

#[cfg(feature = "native")]
pub mod native;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiConfig, DOWNLOAD_FILENAME, GENERIC_ERROR_MESSAGE, MAX_FILE_SIZE};

pub use error::{
    SaveError, SaveResult, TransportError, TransportResult, UploadError, UploadResult,
    ValidationError, ValidationResult,
};

pub use file::{validate_file, validate_selection, InMemoryFile, LocalFile};

pub use progress::{percent, ProgressTracker};

pub use state::{
    Event, MemoryStore, Phase, PreviewRef, ProcessedImage, RenderPlan, StateStore, UiState,
    DROP_HINT, DROP_PROMPT_ACTIVE, DROP_PROMPT_IDLE,
};

pub use transport::{
    interpret_response, ServiceResponse, TransferEvent, TransferSender, Transport, UploadTask,
};

pub use sink::{DirectorySink, ImageSink};

pub use controller::{Controller, Outcome};
