//! Hero section component

use leptos::*;

use crate::{APP_NAME, APP_TAGLINE};

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{APP_NAME}</h1>
            <p class="subtitle">{APP_TAGLINE}</p>
        </div>
    }
}
