//! 解析ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn AnalyzeButton<F>(
    has_candidate: Signal<bool>,
    is_analyzing: Signal<bool>,
    on_analyze: F,
) -> impl IntoView
where
    F: Fn(web_sys::MouseEvent) + 'static,
{
    view! {
        <div class="analyze-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !has_candidate.get() || is_analyzing.get()
                on:click=on_analyze
            >
                {move || if is_analyzing.get() { "Analyzing Leaf..." } else { "Analyze Leaf" }}
            </button>
        </div>
    }
}
