//! 画像プレビュー

use leptos::prelude::*;

/// `preview` は (プレビューURL, ファイル名)
#[component]
pub fn PreviewPanel(preview: Signal<Option<(String, String)>>) -> impl IntoView {
    view! {
        <section class="panel preview-panel">
            <h2>"Image Preview"</h2>
            <Show
                when=move || preview.with(Option::is_some)
                fallback=|| view! { <p class="text-muted">"No image selected"</p> }
            >
                {move || preview.get().map(|(url, name)| view! {
                    <img class="preview-image" src=url alt=name.clone() />
                    <p class="file-name">{name}</p>
                })}
            </Show>
        </section>
    }
}
