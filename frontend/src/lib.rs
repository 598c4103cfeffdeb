//! Cutout - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for removing image backgrounds: drop an image, watch
//! the upload progress, compare original and processed images, download
//! the result.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, tagline)                                  │
//! │  ├── UploadSection (dropzone + error)                       │
//! │  ├── ProgressSection (while uploading)                      │
//! │  └── PreviewSection (original / processed + download)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All sections read one `RwSignal<UiState>`; only the controller writes
//! it.
//!
//! # Modules
//!
//! - [`config`] - Build-time configuration
//! - [`state`] - Signal-backed state store and controller type
//! - [`components`] - UI components
//! - [`services`] - Browser upload and download

use std::rc::Rc;

use cutout::UiState;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;
pub use state::{AppController, SignalStore};
pub use components::*;
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let state = create_rw_signal(UiState::new());
    let controller = store_value(Rc::new(AppController::new(
        &api_config(),
        XhrTransport,
        AnchorDownload,
        SignalStore::new(state),
    )));

    controller.with_value(|c| log::info!("🔗 Background removal endpoint: {}", c.endpoint()));

    view! {
        <div class="container">
            <Hero/>

            <div class="card">
                <UploadSection controller=controller state=state/>
                <ProgressSection state=state/>
                <PreviewSection controller=controller state=state/>
            </div>
        </div>
    }
}
