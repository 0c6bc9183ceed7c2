//! 解析結果カード

use leptos::prelude::*;
use plantguard_common::ResultCard;

#[component]
pub fn ResultPanel(
    card: Signal<Option<ResultCard>>,
    detection_ms: ReadSignal<Option<f64>>,
) -> impl IntoView {
    view! {
        <section class="panel result-panel">
            <h2>"Analysis Results"</h2>
            {move || match card.get() {
                Some(card) => view! { <ResultBody card=card detection_ms=detection_ms /> }.into_any(),
                None => view! {
                    <div class="placeholder">
                        <p class="placeholder-title">"Ready to Analyze"</p>
                        <p class="text-muted">"Upload a leaf photo and press Analyze Leaf"</p>
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn ResultBody(card: ResultCard, detection_ms: ReadSignal<Option<f64>>) -> impl IntoView {
    let badge_class = if card.healthy { "badge badge-healthy" } else { "badge badge-disease" };
    let bar_style = format!("width: {}%", card.confidence_width);

    view! {
        <div class="result-card">
            <div class="result-row">
                <span class="label">"Plant"</span>
                <span class="value plant-name">{card.plant}</span>
            </div>
            <div class="result-row">
                <span class="label">"Condition"</span>
                <span class=badge_class>{card.disease}</span>
            </div>
            <div class="result-row">
                <span class="label">"Confidence"</span>
                <div class="progress-bar">
                    <div class="progress-fill" style=bar_style />
                </div>
                <span class="value">{card.confidence}</span>
            </div>
            <div class="result-row">
                <span class="label">"Image Size"</span>
                <span class="value">{card.image_size}</span>
            </div>
            <div class="result-row">
                <span class="label">"Detection Time"</span>
                <span class="value">
                    {move || detection_ms.get().map(|ms| format!("{:.1}s", ms / 1000.0)).unwrap_or_default()}
                </span>
            </div>
            <div class="treatment">
                <h3>"Treatment Recommendation"</h3>
                <p>{card.treatment}</p>
            </div>
        </div>
    }
}
