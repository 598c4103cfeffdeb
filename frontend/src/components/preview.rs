//! Original and processed image panels, side by side.
//!
//! Object URLs are released when the image they point to is replaced.

use std::rc::Rc;

use cutout::{PreviewRef, ProcessedImage, UiState};
use leptos::*;

use crate::services::{create_object_url, revoke_object_url};
use crate::AppController;

#[component]
pub fn PreviewSection(
    controller: StoredValue<Rc<AppController>>,
    state: RwSignal<UiState>,
) -> impl IntoView {
    let original = create_memo(move |_| state.with(|s| s.original.clone()));

    create_effect(move |previous: Option<Option<PreviewRef>>| {
        let current = original.get();
        if let Some(Some(old)) = previous {
            if current.as_ref() != Some(&old) {
                revoke_object_url(old.as_str());
            }
        }
        current
    });

    // One processed URL per successful cycle
    let result_cycle = create_memo(move |_| state.with(|s| s.result.as_ref().map(|_| s.cycle)));
    let (processed_url, set_processed_url) = create_signal(None::<String>);

    create_effect(move |_| {
        result_cycle.track();
        let url = state.with_untracked(|s| s.result.as_ref().and_then(object_url_for));
        if let Some(old) = processed_url.get_untracked() {
            revoke_object_url(&old);
        }
        set_processed_url.set(url);
    });

    let on_download = move |_: web_sys::MouseEvent| {
        controller.with_value(|c| match c.download_result() {
            Ok(true) => {}
            Ok(false) => log::warn!("⚠️ Nothing to download yet"),
            Err(e) => log::error!("❌ Download failed: {}", e),
        });
    };

    view! {
        <div class="preview-grid">
            <Show when=move || original.with(Option::is_some)>
                <div class="preview-panel">
                    <h3>"Original Image"</h3>
                    <img
                        class="preview-image"
                        alt="Original"
                        src=move || original.get().map(|p| p.as_str().to_string()).unwrap_or_default()
                    />
                </div>
            </Show>

            <Show when=move || state.with(|s| s.render_plan().shows_download())>
                <div class="preview-panel">
                    <h3>"Processed Image"</h3>
                    <img
                        class="preview-image"
                        alt="Processed"
                        src=move || processed_url.get().unwrap_or_default()
                    />
                    <button class="download-button" on:click=on_download>
                        "Download"
                    </button>
                </div>
            </Show>
        </div>
    }
}

fn object_url_for(image: &ProcessedImage) -> Option<String> {
    match create_object_url(image.bytes(), image.content_type()) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Failed to create processed image URL: {:?}", e);
            None
        }
    }
}
