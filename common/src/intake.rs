//! 画像取り込み（ファイル選択 / ドラッグ&ドロップ / カメラ撮影）
//!
//! ファイルの実体はプラットフォームごとに異なるため、
//! `IntakeFile` と `PreviewStore` で抽象化する。

use crate::types::ImagePayload;

/// 取り込み元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    Picker,
    Drop,
    Camera,
    /// 「Try Demo」で読み込むサンプル画像
    Demo,
}

impl IntakeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeSource::Picker => "picker",
            IntakeSource::Drop => "drop",
            IntakeSource::Camera => "camera",
            IntakeSource::Demo => "demo",
        }
    }
}

/// 取り込み対象のファイル
pub trait IntakeFile {
    fn file_name(&self) -> String;

    /// 申告されたMIMEタイプ（中身は検査しない）
    fn mime_type(&self) -> String;
}

/// プレビュー参照の発行と解放
///
/// 発行した参照は、差し替え・クリア・セッション破棄のいずれかで
/// 必ず一度だけ `release` される。
pub trait PreviewStore {
    type File: IntakeFile;

    fn create(&mut self, file: &Self::File) -> String;

    fn release(&mut self, preview_url: &str);
}

/// 画像として受け付けるMIMEタイプか
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// 検証済みのアップロード候補
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate<F> {
    pub file: F,
    pub file_name: String,
    pub mime_type: String,
    pub preview_url: String,
    pub source: IntakeSource,
}

/// メモリ上の画像ファイル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    pub fn to_payload(&self) -> ImagePayload {
        ImagePayload {
            file_name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

impl IntakeFile for ImageFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}
