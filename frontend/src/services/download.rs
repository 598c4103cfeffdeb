//! Client-side save of the processed image.
//!
//! The bytes become a Blob behind an object URL; a transient
//! `<a download>` element is clicked to open the browser's save flow.

use std::time::Duration;

use cutout::{ImageSink, SaveError, SaveResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// How long a download URL stays valid after the click.
const REVOKE_DELAY: Duration = Duration::from_secs(10);

/// Create an object URL for in-memory image bytes.
pub fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = BlobPropertyBag::new();
    if !mime.trim().is_empty() {
        options.set_type(mime);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

pub fn revoke_object_url(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        log::warn!("Failed to revoke {}: {:?}", url, e);
    }
}

/// [`ImageSink`] that triggers a browser download.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchorDownload;

impl ImageSink for AnchorDownload {
    fn save(&self, bytes: &[u8], suggested_name: &str) -> SaveResult<()> {
        let url = create_object_url(bytes, "image/png").map_err(platform)?;
        let clicked = click_link(&url, suggested_name);

        leptos::set_timeout(move || revoke_object_url(&url), REVOKE_DELAY);
        clicked
    }
}

fn click_link(url: &str, suggested_name: &str) -> SaveResult<()> {
    let document = gloo_utils::document();
    let body = gloo_utils::body();

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(platform)?
        .dyn_into()
        .map_err(|_| SaveError::Platform("created element is not an anchor".to_string()))?;
    link.set_href(url);
    link.set_download(suggested_name);

    body.append_child(&link).map_err(platform)?;
    link.click();
    body.remove_child(&link).map_err(platform)?;

    log::info!("💾 Download triggered: {}", suggested_name);
    Ok(())
}

fn platform(e: JsValue) -> SaveError {
    SaveError::Platform(format!("{:?}", e))
}
