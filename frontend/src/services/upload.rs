//! Image upload to the background-removal service over XMLHttpRequest.
//!
//! `fetch` cannot report upload progress, so the request goes through XHR:
//! `upload.onprogress` feeds progress ticks, `onload` delivers the response
//! as an `ArrayBuffer`, `onerror`/`ontimeout` map to a network error.

use cutout::config::UPLOAD_FIELD;
use cutout::{
    LocalFile, PreviewRef, ServiceResponse, Transport, TransportError, TransportResult, UploadTask,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, File, FormData, ProgressEvent, Url, XmlHttpRequest, XmlHttpRequestResponseType};

/// A file picked from the dropzone or the file dialog.
#[derive(Clone, Debug)]
pub struct BrowserFile(File);

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self(file)
    }

    pub fn as_file(&self) -> &File {
        &self.0
    }
}

impl LocalFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        Blob::size(&self.0) as u64
    }

    fn mime(&self) -> String {
        Blob::type_(&self.0)
    }

    fn preview(&self) -> Option<PreviewRef> {
        match Url::create_object_url_with_blob(&self.0) {
            Ok(url) => Some(PreviewRef::new(url)),
            Err(e) => {
                log::warn!("Failed to create preview URL: {:?}", e);
                None
            }
        }
    }
}

/// Collect the files of a `FileList` (drop or `<input type="file">`).
pub fn files_from_list(list: Option<web_sys::FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile::new)
        .collect()
}

/// XMLHttpRequest-backed [`Transport`].
#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

impl Transport for XhrTransport {
    type File = BrowserFile;

    fn start(&self, endpoint: &str, file: &BrowserFile) -> TransportResult<UploadTask> {
        // Form with the single `image` part
        let form = FormData::new().map_err(request_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, file.as_file(), &file.name())
            .map_err(request_error)?;

        let xhr = XmlHttpRequest::new().map_err(request_error)?;
        xhr.open_with_async("POST", endpoint, true)
            .map_err(request_error)?;
        xhr.set_response_type(XmlHttpRequestResponseType::Arraybuffer);

        let (events, task) = UploadTask::channel();

        // Upload progress
        let on_progress = {
            let events = events.clone();
            Closure::wrap(Box::new(move |event: ProgressEvent| {
                let total = known_total(event.length_computable(), event.total());
                events.progress(event.loaded() as u64, total);
            }) as Box<dyn FnMut(ProgressEvent)>)
        };
        xhr.upload()
            .map_err(request_error)?
            .set_onprogress(Some(on_progress.as_ref().unchecked_ref()));

        // Response
        let on_load = {
            let events = events.clone();
            let xhr = xhr.clone();
            Closure::wrap(Box::new(move || {
                events.finish(read_response(&xhr));
            }) as Box<dyn FnMut()>)
        };
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));

        // Network errors and timeouts
        let on_error = {
            let events = events.clone();
            Closure::wrap(Box::new(move || {
                events.finish(Err(TransportError::Network(
                    "request failed before a response was received".to_string(),
                )));
            }) as Box<dyn FnMut()>)
        };
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(on_error.as_ref().unchecked_ref()));

        // Send
        xhr.send_with_opt_form_data(Some(&form))
            .map_err(request_error)?;
        log::debug!("📤 POST {} ({} bytes)", endpoint, file.size());

        // The closures live as long as the task; dropping it early aborts.
        let handlers = (on_progress, on_load, on_error);
        Ok(task.on_abort(move || {
            log::info!("🚫 Aborting upload");
            let _ = xhr.abort();
            drop(handlers);
        }))
    }
}

/// Total bytes of a progress event, 0 when the browser cannot tell.
fn known_total(length_computable: bool, total: f64) -> u64 {
    if length_computable && total > 0.0 {
        total as u64
    } else {
        0
    }
}

fn read_response(xhr: &XmlHttpRequest) -> TransportResult<ServiceResponse> {
    let status = xhr.status().map_err(malformed)?;
    let content_type = xhr.get_response_header("content-type").ok().flatten();
    let response = xhr.response().map_err(malformed)?;
    let body = if response.is_null() || response.is_undefined() {
        Vec::new()
    } else {
        js_sys::Uint8Array::new(&response).to_vec()
    };
    log::debug!("📥 Response {} ({} bytes)", status, body.len());
    Ok(ServiceResponse {
        status,
        content_type,
        body,
    })
}

fn request_error(e: JsValue) -> TransportError {
    TransportError::Request(format!("{:?}", e))
}

fn malformed(e: JsValue) -> TransportError {
    TransportError::MalformedResponse(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_total() {
        assert_eq!(known_total(true, 2_000_000.0), 2_000_000);
        assert_eq!(known_total(false, 2_000_000.0), 0);
        assert_eq!(known_total(true, 0.0), 0);
    }
}
