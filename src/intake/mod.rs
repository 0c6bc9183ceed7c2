//! ローカル画像の取り込み
//!
//! CLIではファイルパスが取り込み元になる。MIMEタイプは拡張子から決める
//! （ブラウザのFile.typeと同じく申告ベース）。

use crate::error::{PlantGuardError, Result};
use plantguard_common::{ImagePayload, IntakeFile, LoadedFile, PreviewStore};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// 読み込み済みのローカル画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl LocalImage {
    /// 内容のSHA-256（同一画像の判定用）
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

impl IntakeFile for LocalImage {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

impl LoadedFile for LocalImage {
    fn to_payload(&self) -> ImagePayload {
        ImagePayload {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// 拡張子からMIMEタイプを決める
pub fn mime_for_path(path: &Path) -> String {
    if let Ok(format) = image::ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain".to_string(),
        _ => UNKNOWN_MIME.to_string(),
    }
}

/// ファイルを読み込む（画像かどうかの判定はセッション側）
pub fn load_image(path: &Path) -> Result<LocalImage> {
    if !path.exists() {
        return Err(PlantGuardError::FileNotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(PlantGuardError::ImageLoad(format!(
            "ファイルではありません: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LocalImage {
        path: path.to_path_buf(),
        file_name,
        mime_type: mime_for_path(path),
        bytes,
    })
}

/// `file://` 参照を発行するプレビューストア
#[derive(Debug, Default)]
pub struct FilePreviews {
    live: HashSet<String>,
}

impl FilePreviews {
    /// 未解放の参照数
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl PreviewStore for FilePreviews {
    type File = LocalImage;

    fn create(&mut self, file: &LocalImage) -> String {
        let absolute = file
            .path
            .canonicalize()
            .unwrap_or_else(|_| file.path.clone());
        let url = format!("file://{}", absolute.display().to_string().replace('\\', "/"));
        self.live.insert(url.clone());
        url
    }

    fn release(&mut self, preview_url: &str) {
        if !self.live.remove(preview_url) {
            tracing::warn!(preview = preview_url, "release of unknown preview");
        }
    }
}
