//! Image dropzone with drag & drop and file-dialog support.
//!
//! Hands the dropped/selected files to the controller, which validates them
//! and runs the upload.

use std::rc::Rc;

use cutout::{UiState, DROP_HINT};
use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement, MouseEvent};

use crate::services::{files_from_list, BrowserFile};
use crate::{AppController, ACCEPT_ATTR};

#[component]
pub fn UploadSection(
    controller: StoredValue<Rc<AppController>>,
    state: RwSignal<UiState>,
) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !state.with_untracked(|s| s.drag_active) {
            controller.with_value(|c| c.drag_entered());
        }
    };

    let on_dragleave = move |_: DragEvent| {
        controller.with_value(|c| c.drag_left());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let files = files_from_list(ev.data_transfer().and_then(|dt| dt.files()));
        select(controller, files);
    };

    // Clicking anywhere in the zone opens the file dialog
    let on_zone_click = move |_: MouseEvent| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = files_from_list(input.files());
        // Reset so the same file can be selected again
        input.set_value("");
        select(controller, files);
    };

    view! {
        <div
            class="upload-section"
            class:drag-active=move || state.with(|s| s.drag_active)
            on:click=on_zone_click
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <div class="upload-icon">"🖼️"</div>
            <div class="upload-text">
                {move || state.with(|s| s.render_plan().prompt)}
            </div>
            <div class="upload-hint">{DROP_HINT}</div>
            <input
                type="file"
                accept=ACCEPT_ATTR
                style="display:none"
                node_ref=file_input
                on:click=|ev: MouseEvent| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>

        <Show when=move || state.with(|s| s.error.is_some())>
            <div class="error-message">
                {move || state.with(|s| s.error.clone().unwrap_or_default())}
            </div>
        </Show>
    }
}

fn select(controller: StoredValue<Rc<AppController>>, files: Vec<BrowserFile>) {
    let controller = controller.get_value();
    spawn_local(async move {
        let outcome = controller.select_file(files).await;
        log::info!("Selection finished: {:?}", outcome);
    });
}
