//! 分類サービスのレスポンスパーサー
//!
//! 対応する形式:
//! 1. 単一結果 `{"plant_type", "disease_type", "confidence", "image_shape"}`
//! 2. 単一結果の配列（確信度降順）
//! 3. 推論サーバーの封筒 `{"success": true, "predictions": [{"disease", "confidence"}]}`
//! 4. エラー `{"error": "..."}`

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::service::validate_results;
use crate::types::{ClassificationResult, ImageShape};

/// クラス名の区切り（例: `Tomato___Bacterial_spot`）
const CLASS_SEPARATOR: &str = "___";

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. `{` または `[` から対応する末尾まで（先に現れる方から。JSONとして読めるもの）
/// 3. エラー
///
/// # Examples
/// ```
/// use plantguard_common::extract_json;
///
/// let response = "[mock] result: {\"error\": \"x\"}";
/// assert_eq!(extract_json(response).unwrap(), "{\"error\": \"x\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    let mut candidates: Vec<&str> = ['{', '[']
        .into_iter()
        .filter_map(|open| bracketed(response, open))
        .collect();
    candidates.sort_by_key(|c| c.as_ptr() as usize);

    candidates
        .iter()
        .copied()
        .find(|c| serde_json::from_str::<Value>(c).is_ok())
        .or_else(|| candidates.first().copied())
        .ok_or_else(|| Error::ServiceFailure("Invalid response: no JSON found".into()))
}

/// 最初の `open` から対応する最後の閉じ括弧まで
fn bracketed(response: &str, open: char) -> Option<&str> {
    let close = if open == '{' { '}' } else { ']' };
    let start = response.find(open)?;
    let end = response.rfind(close)?;
    (end > start).then(|| &response[start..=end])
}

/// 推論サーバーの1候補
#[derive(Debug, Deserialize)]
struct Prediction {
    disease: String,
    /// 0〜100のパーセント
    confidence: f64,
}

/// `Tomato___Bacterial_spot` → ("Tomato", "Bacterial_spot")
///
/// 区切りがない場合は植物名を空にする。
pub fn split_class_label(label: &str) -> (String, String) {
    match label.split_once(CLASS_SEPARATOR) {
        Some((plant, disease)) => (plant.replace('_', " ").trim().to_string(), disease.to_string()),
        None => (String::new(), label.to_string()),
    }
}

fn from_prediction(prediction: Prediction) -> ClassificationResult {
    let (plant, disease) = split_class_label(&prediction.disease);
    ClassificationResult::new(
        &plant,
        &disease,
        prediction.confidence / 100.0,
        ImageShape::default(),
    )
}

fn parse_error(e: serde_json::Error) -> Error {
    Error::ServiceFailure(format!("Invalid response: {}", e))
}

/// 分類サービスのレスポンスをパース
///
/// # Returns
/// * `Ok(Vec<ClassificationResult>)` - 受け取った順の候補
/// * `Err(ServiceFailure)` - エラー封筒、またはパース失敗
pub fn parse_service_response(response: &str) -> Result<Vec<ClassificationResult>> {
    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str.trim()).map_err(parse_error)?;

    let results = match value {
        Value::Object(ref map) if map.contains_key("error") => {
            let message = map
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(Error::ServiceFailure(message));
        }
        Value::Object(ref map) if map.contains_key("predictions") => {
            let predictions: Vec<Prediction> =
                serde_json::from_value(map["predictions"].clone()).map_err(parse_error)?;
            predictions.into_iter().map(from_prediction).collect()
        }
        Value::Array(_) => serde_json::from_value::<Vec<ClassificationResult>>(value).map_err(parse_error)?,
        other => vec![serde_json::from_value::<ClassificationResult>(other).map_err(parse_error)?],
    };

    validate_results(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here is the prediction:
```json
{"plant_type": "Corn"}
```
Done."#;
        assert_eq!(extract_json(response).unwrap(), r#"{"plant_type": "Corn"}"#);
    }

    #[test]
    fn test_extract_json_raw_array() {
        let response = r#"[{"a": 1}, {"a": 2}]"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_skips_bracketed_prefix() {
        let response = r#"[mock] {"plant_type": "Corn", "disease_type": "Common_rust", "confidence": 0.8}"#;
        assert_eq!(
            extract_json(response).unwrap(),
            r#"{"plant_type": "Corn", "disease_type": "Common_rust", "confidence": 0.8}"#
        );
    }

    #[test]
    fn test_parse_with_bracketed_prefix() {
        let response = r#"[mock] {"plant_type": "Corn", "disease_type": "Common_rust", "confidence": 0.8}"#;
        let results = parse_service_response(response).unwrap();
        assert_eq!(results[0].plant_type, "Corn");
    }

    #[test]
    fn test_extract_json_not_found() {
        assert!(extract_json("no json here").is_err());
    }

    // =============================================
    // parse_service_response テスト
    // =============================================

    #[test]
    fn test_parse_single_object() {
        let json = r#"{"plant_type": "Tomato", "disease_type": "Bacterial_spot", "confidence": 0.95, "image_shape": [224, 224]}"#;
        let results = parse_service_response(json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plant_type, "Tomato");
        assert_eq!(results[0].image_shape, ImageShape(224, 224));
    }

    #[test]
    fn test_parse_ranked_array() {
        let json = r#"[
            {"plant_type": "Tomato", "disease_type": "Bacterial_spot", "confidence": 0.95, "image_shape": [224, 224]},
            {"plant_type": "Tomato", "disease_type": "Healthy", "confidence": 0.04, "image_shape": [224, 224]}
        ]"#;
        let results = parse_service_response(json).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].disease_type, "Healthy");
    }

    #[test]
    fn test_parse_backend_envelope() {
        let json = r#"{
            "success": true,
            "predictions": [
                {"disease": "Corn_(maize)___Common_rust_", "confidence": 87.5},
                {"disease": "Potato___Early_blight", "confidence": 10.0}
            ],
            "image": "aGVsbG8="
        }"#;
        let results = parse_service_response(json).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].plant_type, "Corn (maize)");
        assert_eq!(results[0].disease_type, "Common_rust_");
        assert!((results[0].confidence - 0.875).abs() < 1e-9);
        assert_eq!(results[1].plant_type, "Potato");
        assert_eq!(results[1].image_shape, ImageShape(224, 224));
    }

    #[test]
    fn test_parse_shape_with_channels() {
        let json = r#"[{"plant_type": "Potato", "disease_type": "Early_blight", "confidence": 0.6, "image_shape": [224, 224, 3]}]"#;
        let results = parse_service_response(json).unwrap();
        assert_eq!(results[0].image_shape, ImageShape(224, 224));
    }

    #[test]
    fn test_parse_error_envelope() {
        let err = parse_service_response(r#"{"error": "No selected file"}"#).unwrap_err();
        assert!(matches!(err, Error::ServiceFailure(ref m) if m == "No selected file"));
    }

    #[test]
    fn test_parse_error_envelope_without_message() {
        let err = parse_service_response(r#"{"error": null}"#).unwrap_err();
        assert_eq!(err.user_message(), "Failed to get prediction");
    }

    #[test]
    fn test_parse_invalid_shape() {
        let err = parse_service_response(r#"{"plant_type": "Tomato"}"#).unwrap_err();
        assert!(matches!(err, Error::ServiceFailure(ref m) if m.starts_with("Invalid response")));
    }

    #[test]
    fn test_parse_clamps_confidence() {
        let json = r#"{"plant_type": "Tomato", "disease_type": "Healthy", "confidence": 1.2}"#;
        let results = parse_service_response(json).unwrap();
        assert_eq!(results[0].confidence, 1.0);
    }

    #[test]
    fn test_split_class_label() {
        assert_eq!(
            split_class_label("Tomato___Bacterial_spot"),
            ("Tomato".to_string(), "Bacterial_spot".to_string())
        );
        assert_eq!(
            split_class_label("Unlabeled"),
            (String::new(), "Unlabeled".to_string())
        );
    }
}
