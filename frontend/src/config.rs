//! Application configuration.
//!
//! Build-time settings for the Cutout frontend. The API base URL is baked
//! into the WebAssembly bundle from `CUTOUT_API_URL` when trunk builds it;
//! without it the page talks to the local development service.

use cutout::ApiConfig;

/// Backend API base URL, if set at build time.
pub const API_URL: Option<&str> = option_env!("CUTOUT_API_URL");

/// Page title.
pub const APP_NAME: &str = "Background Removal Tool";

/// Subtitle under the page title.
pub const APP_TAGLINE: &str = "Remove background from your images instantly";

/// `accept` attribute of the file input.
pub const ACCEPT_ATTR: &str = "image/png,image/jpeg,.png,.jpg,.jpeg";

/// Service location used by the controller.
pub fn api_config() -> ApiConfig {
    ApiConfig::or_default(API_URL)
}
