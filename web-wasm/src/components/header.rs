//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"PlantGuard - Leaf Disease Detection"</h1>
            <p class="subtitle">"Upload a photo of a leaf to identify the plant and check for disease"</p>
        </header>
    }
}
