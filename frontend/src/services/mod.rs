//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - image upload with progress over XMLHttpRequest
//! - [`download`] - object URLs and anchor-triggered downloads

pub mod upload;
pub mod download;

pub use upload::*;
pub use download::*;
