//! 結果表示用の整形

use crate::types::{ClassificationResult, ImageShape};

/// 確信度を小数1桁のパーセント表記に（0.95 → "95.0%"）
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// 画像サイズを `幅 x 高さ px` で表示（保存順の逆）
pub fn format_image_size(shape: ImageShape) -> String {
    format!("{} x {} px", shape.width(), shape.height())
}

/// 病害名の表示形（最初の `_` のみ空白に置換）
pub fn display_disease(disease_type: &str) -> String {
    disease_type.replacen('_', " ", 1)
}

/// 結果カード1枚分の表示内容
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub plant: String,
    pub disease: String,
    pub healthy: bool,
    pub confidence: String,
    /// プログレスバー幅（0〜100）
    pub confidence_width: f64,
    pub image_size: String,
    pub treatment: String,
}

impl ResultCard {
    pub fn new(result: &ClassificationResult, treatment: &str) -> Self {
        Self {
            plant: result.plant_type.clone(),
            disease: display_disease(&result.disease_type),
            healthy: result.is_healthy(),
            confidence: format_confidence(result.confidence),
            confidence_width: (result.confidence * 100.0).clamp(0.0, 100.0),
            image_size: format_image_size(result.image_shape),
            treatment: treatment.to_string(),
        }
    }
}
