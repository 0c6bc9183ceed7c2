//! 分類結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClassificationResult: 分類サービスの出力（1候補）
//! - ImageShape: 前処理後の画像サイズ（高さ, 幅の順）
//! - ImagePayload: 分類サービスへ送る画像

use serde::{de, Deserialize, Deserializer, Serialize};

/// モデル入力サイズ（MobileNetV2既定）
pub const MODEL_INPUT_SIZE: u32 = 224;

/// 前処理後の画像サイズ
///
/// 保存順は `[height, width]`。表示時は `width x height` に入れ替える
/// （[`crate::display::format_image_size`]）。
/// 読み込み時は `[224, 224, 3]` のようなチャンネル付きの形も受け付け、先頭2要素のみ使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageShape(pub u32, pub u32);

impl<'de> Deserialize<'de> for ImageShape {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dims = Vec::<u32>::deserialize(deserializer)?;
        match dims.as_slice() {
            [height, width, ..] => Ok(Self(*height, *width)),
            _ => Err(de::Error::invalid_length(dims.len(), &"at least 2 dimensions")),
        }
    }
}

impl ImageShape {
    pub fn new(height: u32, width: u32) -> Self {
        Self(height, width)
    }

    pub fn height(&self) -> u32 {
        self.0
    }

    pub fn width(&self) -> u32 {
        self.1
    }
}

impl Default for ImageShape {
    fn default() -> Self {
        Self(MODEL_INPUT_SIZE, MODEL_INPUT_SIZE)
    }
}

/// 病害分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub plant_type: String,
    pub disease_type: String,
    /// 0.0〜1.0の確信度
    pub confidence: f64,
    #[serde(default)]
    pub image_shape: ImageShape,
}

impl ClassificationResult {
    pub fn new(plant_type: &str, disease_type: &str, confidence: f64, image_shape: ImageShape) -> Self {
        Self {
            plant_type: plant_type.to_string(),
            disease_type: disease_type.to_string(),
            confidence,
            image_shape,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.disease_type.eq_ignore_ascii_case("healthy")
    }
}

/// 分類サービスへのリクエスト（画像1枚）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_shape_axes() {
        let shape = ImageShape::new(480, 640);
        assert_eq!(shape.height(), 480);
        assert_eq!(shape.width(), 640);
    }

    #[test]
    fn test_image_shape_default_is_model_input() {
        assert_eq!(ImageShape::default(), ImageShape(224, 224));
    }

    #[test]
    fn test_classification_result_serialize() {
        let result = ClassificationResult::new("Tomato", "Bacterial_spot", 0.95, ImageShape(224, 224));

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"plant_type\":\"Tomato\""));
        assert!(json.contains("\"disease_type\":\"Bacterial_spot\""));
        assert!(json.contains("\"image_shape\":[224,224]"));
    }

    #[test]
    fn test_classification_result_deserialize_missing_shape() {
        let json = r#"{"plant_type": "Corn", "disease_type": "Common_rust", "confidence": 0.7}"#;

        let result: ClassificationResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.plant_type, "Corn");
        assert_eq!(result.image_shape, ImageShape(224, 224)); // デフォルト値
    }

    #[test]
    fn test_image_shape_with_channels() {
        let json = r#"{"plant_type": "Tomato", "disease_type": "Healthy", "confidence": 0.9, "image_shape": [256, 320, 3]}"#;

        let result: ClassificationResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.image_shape, ImageShape(256, 320));
        // 書き出しは2要素のまま
        assert!(serde_json::to_string(&result).unwrap().contains("\"image_shape\":[256,320]"));
    }

    #[test]
    fn test_image_shape_too_short() {
        assert!(serde_json::from_str::<ImageShape>("[224]").is_err());
        assert!(serde_json::from_str::<ImageShape>("[]").is_err());
    }

    #[test]
    fn test_is_healthy() {
        let healthy = ClassificationResult::new("Tomato", "Healthy", 0.04, ImageShape::default());
        let sick = ClassificationResult::new("Tomato", "Bacterial_spot", 0.95, ImageShape::default());
        assert!(healthy.is_healthy());
        assert!(!sick.is_healthy());
    }
}
