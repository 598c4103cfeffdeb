//! Client configuration.
//!
//! The only deployment setting is the API base URL. Everything else is a
//! fixed contract with the background-removal service and lives here as a
//! constant.

/// Environment variable holding the API base URL.
///
/// Read at build time by the browser frontend and at runtime by native
/// callers (see [`ApiConfig::from_env`]).
pub const API_URL_ENV: &str = "CUTOUT_API_URL";

/// Local development service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Path of the background-removal endpoint, relative to the base URL.
pub const REMOVE_BG_PATH: &str = "/remove-bg";

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "image";

/// Maximum file size for upload (in bytes).
///
/// 16 MB limit, same as the service's `MAX_CONTENT_LENGTH`.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Accepted file extensions (lowercase, without the dot).
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// MIME category accepted by the dropzone.
pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// Suggested filename for the processed image.
pub const DOWNLOAD_FILENAME: &str = "removed_bg.png";

/// Shown when a failure carries no message from the service.
pub const GENERIC_ERROR_MESSAGE: &str = "Error processing image. Please try again.";

/// Where the background-removal service lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a config from an explicit base URL.
    ///
    /// Trailing slashes are dropped; a blank URL falls back to
    /// [`DEFAULT_API_URL`].
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Create a config from an optional value, typically `option_env!`.
    pub fn or_default(base_url: Option<&str>) -> Self {
        Self::new(base_url.unwrap_or(DEFAULT_API_URL))
    }

    /// Create a config from the `CUTOUT_API_URL` environment variable.
    ///
    /// Loads a `.env` file first when one is present.
    #[cfg(feature = "native")]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::or_default(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the background-removal endpoint.
    pub fn remove_bg_url(&self) -> String {
        format!("{}{}", self.base_url, REMOVE_BG_PATH)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
