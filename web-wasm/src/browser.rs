//! ブラウザのFile APIとの橋渡し

use gloo::file::futures::read_as_bytes;
use plantguard_common::{ImagePayload, IntakeFile, PreviewStore, Session};
use wasm_bindgen::JsValue;
use web_sys::{FileList, FilePropertyBag, Url};

/// ブラウザ側のセッション
pub type WebSession = Session<ObjectUrlPreviews>;

const DEMO_FILE_NAME: &str = "demo-plant.svg";

const DEMO_LEAF_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="500" height="400" viewBox="0 0 500 400">
<rect width="500" height="400" fill="#f1f8e9"/>
<path d="M250 40 C390 90 420 260 250 360 C80 260 110 90 250 40 Z" fill="#558b2f"/>
<path d="M250 60 L250 350" stroke="#33691e" stroke-width="6"/>
<circle cx="200" cy="170" r="14" fill="#6d4c41"/>
<circle cx="300" cy="230" r="10" fill="#6d4c41"/>
<circle cx="230" cy="280" r="8" fill="#6d4c41"/>
</svg>"##;

/// `<input type="file">` / ドロップで渡されたファイル
#[derive(Clone, Debug)]
pub struct BrowserFile(pub web_sys::File);

impl BrowserFile {
    /// FileListをVecに（順序はそのまま）
    pub fn from_list(files: Option<FileList>) -> Vec<BrowserFile> {
        let Some(files) = files else {
            return Vec::new();
        };
        (0..files.length())
            .filter_map(|i| files.get(i))
            .map(BrowserFile)
            .collect()
    }

    /// 「Try Demo」用のサンプル画像（葉のSVG）
    pub fn demo() -> Result<BrowserFile, String> {
        let parts = js_sys::Array::of1(&JsValue::from_str(DEMO_LEAF_SVG));
        let options = FilePropertyBag::new();
        options.set_type("image/svg+xml");
        web_sys::File::new_with_str_sequence_and_options(&parts, DEMO_FILE_NAME, &options)
            .map(BrowserFile)
            .map_err(|e| format!("demo: failed to create file: {:?}", e))
    }

    /// 中身を読み込んで分類リクエストにする
    pub async fn to_payload(&self) -> Result<ImagePayload, String> {
        let blob = gloo::file::File::from(self.0.clone());
        let bytes = read_as_bytes(&blob)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.0.name(), e))?;
        Ok(ImagePayload {
            file_name: self.0.name(),
            mime_type: self.0.type_(),
            bytes,
        })
    }
}

impl IntakeFile for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

/// `URL.createObjectURL` で発行し、差し替え時に `revokeObjectURL` する
#[derive(Debug, Default)]
pub struct ObjectUrlPreviews;

impl PreviewStore for ObjectUrlPreviews {
    type File = BrowserFile;

    fn create(&mut self, file: &BrowserFile) -> String {
        match Url::create_object_url_with_blob(&file.0) {
            Ok(url) => url,
            Err(e) => {
                gloo::console::warn!("preview: createObjectURL failed", e);
                String::new()
            }
        }
    }

    fn release(&mut self, preview_url: &str) {
        if preview_url.is_empty() {
            return;
        }
        if let Err(e) = Url::revoke_object_url(preview_url) {
            gloo::console::warn!("preview: revokeObjectURL failed", e);
        }
    }
}
