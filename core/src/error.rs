//! Error types for the upload workflow.
//!
//! - [`ValidationError`] - local file checks, never reach the network
//! - [`TransportError`] - network failures and unreadable responses
//! - [`UploadError`] - top-level error of one upload attempt
//! - [`SaveError`] - failures while saving the processed image
//!
//! Every failure ends the current attempt and is resolved into a single
//! user-visible message by [`UploadError::user_message`].

use thiserror::Error;

use crate::config::GENERIC_ERROR_MESSAGE;

// =============================================================================
// Validation Errors
// =============================================================================

/// Rejected selections. The `Display` text is shown to the user verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing was dropped or selected.
    #[error("No image provided")]
    NoFile,

    /// More than one file in a single drop.
    #[error("Only one image can be processed at a time.")]
    TooManyFiles(usize),

    /// File exceeds [`crate::config::MAX_FILE_SIZE`].
    #[error("File size too large. Maximum size is 16MB.")]
    TooLarge { size: u64 },

    /// Not a PNG/JPG/JPEG image.
    #[error("Invalid file type. Please upload a PNG, JPG or JPEG image.")]
    UnsupportedType { name: String, mime: String },
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised while talking to the service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be built or sent.
    #[error("Failed to build request: {0}")]
    Request(String),

    /// Connection failure, timeout, CORS rejection...
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// The transfer ended without a response.
    #[error("Upload aborted")]
    Aborted,

    /// A response arrived but its body is unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

// =============================================================================
// Upload Errors (top-level)
// =============================================================================

/// Why an upload attempt failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Selection rejected locally.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network or response-format failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx answer from the service.
    #[error("Service error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Service {
        status: u16,
        message: Option<String>,
    },
}

impl UploadError {
    /// The single message shown below the dropzone.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation(err) => err.to_string(),
            UploadError::Transport(_) => GENERIC_ERROR_MESSAGE.to_string(),
            UploadError::Service { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        }
    }
}

// =============================================================================
// Save Errors
// =============================================================================

/// Errors while persisting the processed image.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Filesystem failure (native sinks).
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    /// Browser API failure.
    #[error("Download failed: {0}")]
    Platform(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for file validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for one upload attempt.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;
