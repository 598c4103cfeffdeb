//! UI Components for the Cutout page.
//!
//! # Layout Components
//! - [`Hero`] - Title and tagline
//!
//! # Feature Components
//! - [`UploadSection`] - Image dropzone with drag & drop
//! - [`ProgressSection`] - Upload progress indicator
//! - [`PreviewSection`] - Original/processed panels and download button

mod hero;
mod upload;
mod progress;
mod preview;

pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use preview::*;
