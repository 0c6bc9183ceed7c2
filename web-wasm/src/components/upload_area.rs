//! アップロードエリアコンポーネント
//!
//! ドロップ、ファイル選択、カメラ撮影、デモ画像。いずれも先頭の1枚のみ取り込む。

use leptos::html;
use leptos::prelude::*;
use plantguard_common::IntakeSource;
use web_sys::{DragEvent, Event, HtmlInputElement, MouseEvent};

use crate::app::SessionSignal;
use crate::browser::BrowserFile;

#[component]
pub fn UploadArea<F>(session: SessionSignal, on_intake: F) -> impl IntoView
where
    F: Fn() + 'static + Clone,
{
    let picker_input = NodeRef::<html::Input>::new();
    let camera_input = NodeRef::<html::Input>::new();
    let is_dragover = Signal::derive(move || session.with(|s| s.is_drag_active()));

    let on_drop = {
        let on_intake = on_intake.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            let files = BrowserFile::from_list(ev.data_transfer().and_then(|dt| dt.files()));
            accept(session, files, IntakeSource::Drop);
            on_intake();
        }
    };

    let on_change = {
        let on_intake = on_intake.clone();
        move |source: IntakeSource| {
            let on_intake = on_intake.clone();
            move |ev: Event| {
                let input = event_target::<HtmlInputElement>(&ev);
                let files = BrowserFile::from_list(input.files());
                // 同じファイルを選び直しても change が発火するように
                input.set_value("");
                accept(session, files, source);
                on_intake();
            }
        }
    };
    let on_picker_change = on_change(IntakeSource::Picker);
    let on_camera_change = on_change(IntakeSource::Camera);

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !is_dragover.get_untracked() {
            session.update(|s| s.drag_enter());
        }
    };

    let on_dragleave = move |_: DragEvent| {
        session.update(|s| s.drag_leave());
    };

    let on_demo = move |_: MouseEvent| match BrowserFile::demo() {
        Ok(file) => {
            accept(session, vec![file], IntakeSource::Demo);
            on_intake();
        }
        Err(e) => gloo::console::error!(e),
    };

    let open = |input: NodeRef<html::Input>| {
        move |_: MouseEvent| {
            if let Some(input) = input.get() {
                input.click();
            }
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:dragenter=on_dragover
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <div class="upload-icon">"🌿"</div>
            <p>"Drag and drop a leaf photo here"</p>
            <p class="text-muted">"or"</p>
            <div class="upload-buttons">
                <button class="btn" on:click=open(picker_input)>"Browse Files"</button>
                <button class="btn" on:click=open(camera_input)>"Take Photo"</button>
                <button class="btn" on:click=on_demo>"Try Demo"</button>
            </div>
            <input
                node_ref=picker_input
                class="hidden-input"
                type="file"
                accept="image/*"
                on:change=on_picker_change
            />
            <input
                node_ref=camera_input
                class="hidden-input"
                type="file"
                accept="image/*"
                capture="environment"
                on:change=on_camera_change
            />
        </div>
    }
}

fn accept(session: SessionSignal, files: Vec<BrowserFile>, source: IntakeSource) {
    session.update(|s| {
        let outcome = match source {
            IntakeSource::Drop => s.accept_drop(files),
            _ => s.accept_files(files, source),
        };
        match outcome {
            Ok(candidate) => gloo::console::log!(
                format!("{}: {}", source.as_str(), candidate.file_name)
            ),
            Err(e) => gloo::console::warn!(e.to_string()),
        }
    });
}
