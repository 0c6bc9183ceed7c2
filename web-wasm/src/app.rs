//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard_common::{ClassificationService, Error, ResultCard, TreatmentTable};

use crate::browser::{ObjectUrlPreviews, WebSession};
use crate::components::{
    analyze_button::AnalyzeButton,
    error_banner::ErrorBanner,
    header::Header,
    preview_panel::PreviewPanel,
    result_card::ResultPanel,
    upload_area::UploadArea,
};
use crate::service::DelayedMock;

/// 画面全体で共有するセッション（web_sys::File を含むためローカル保持）
pub type SessionSignal = RwSignal<WebSession, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(WebSession::new(
        ObjectUrlPreviews,
        TreatmentTable::builtin(),
    ));
    // 検出にかかった時間（ミリ秒）
    let (detection_ms, set_detection_ms) = signal(None::<f64>);

    let has_candidate = Signal::derive(move || session.with(|s| s.candidate().is_some()));
    let is_analyzing = Signal::derive(move || session.with(|s| s.is_analyzing()));
    let error_message = Signal::derive(move || session.with(|s| s.error_message().map(str::to_string)));
    let preview = Signal::derive(move || {
        session.with(|s| s.candidate().map(|c| (c.preview_url.clone(), c.file_name.clone())))
    });
    let card = Signal::derive(move || {
        session.with(|s| {
            s.result()
                .map(|r| ResultCard::new(r, s.treatment().unwrap_or_default()))
        })
    });

    // 取り込みがあれば前回の検出時間は消す
    let on_intake = move || set_detection_ms.set(None);

    // 解析開始ハンドラ
    let on_analyze = move |_: web_sys::MouseEvent| {
        let started = session
            .try_update(|s| {
                let ticket = s.begin_analysis().ok()?;
                s.candidate().map(|c| (ticket, c.file.clone()))
            })
            .flatten();
        let Some((ticket, file)) = started else {
            return;
        };
        set_detection_ms.set(None);

        let started_at = js_sys::Date::now();
        spawn_local(async move {
            let outcome = match file.to_payload().await {
                Ok(payload) => DelayedMock::default().classify(&payload).await,
                Err(e) => {
                    gloo::console::error!(e.clone());
                    Err(Error::ServiceFailure(e))
                }
            };
            let applied = session
                .try_update(|s| s.finish_analysis(ticket, outcome))
                .unwrap_or(false);
            if applied {
                set_detection_ms.set(Some(js_sys::Date::now() - started_at));
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <UploadArea session=session on_intake=on_intake />

            <AnalyzeButton
                has_candidate=has_candidate
                is_analyzing=is_analyzing
                on_analyze=on_analyze
            />

            <ErrorBanner message=error_message />

            <div class="panels">
                <PreviewPanel preview=preview />
                <ResultPanel card=card detection_ms=detection_ms />
            </div>
        </div>
    }
}
