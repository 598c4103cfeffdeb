use cutout::UiState;
use leptos::*;

#[component]
pub fn ProgressSection(state: RwSignal<UiState>) -> impl IntoView {
    let progress = create_memo(move |_| state.with(|s| s.render_plan().progress));
    let percent = move || progress.get().unwrap_or(0);

    view! {
        <Show when=move || progress.with(Option::is_some)>
            <div class="progress-section show">
                <div class="progress-header">
                    <span class="progress-badge">"Processing"</span>
                    <span class="progress-percent">{move || format!("{}%", percent())}</span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill" style=move || fill_style(percent())></div>
                </div>
            </div>
        </Show>
    }
}

fn fill_style(percent: u8) -> String {
    format!("width: {}%;", percent.min(100))
}
