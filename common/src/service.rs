//! 分類サービス
//!
//! セッションは `ClassificationService` のみに依存する。
//! モック・固定レスポンス・将来のリモート実装を差し替えても
//! 状態遷移は変わらない。

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{ClassificationResult, ImagePayload, ImageShape};

/// 画像1枚を分類するサービス
///
/// 成功時は確信度の降順に並んだ候補を返す（1件でもよい）。
#[async_trait(?Send)]
pub trait ClassificationService {
    async fn classify(&self, image: &ImagePayload) -> Result<Vec<ClassificationResult>>;
}

/// デモ用の固定候補（確信度降順）
pub fn mock_results() -> Vec<ClassificationResult> {
    vec![
        ClassificationResult::new("Tomato", "Bacterial_spot", 0.95, ImageShape(224, 224)),
        ClassificationResult::new("Tomato", "Healthy", 0.04, ImageShape(224, 224)),
        ClassificationResult::new("Potato", "Early_blight", 0.01, ImageShape(224, 224)),
    ]
}

/// 候補の確信度を検査する
///
/// 有限でない確信度は `ServiceFailure`。範囲外は 0〜1 に丸める。
/// どの実装から来た候補もセッションに入る前にここを通る。
pub fn validate_results(results: Vec<ClassificationResult>) -> Result<Vec<ClassificationResult>> {
    results
        .into_iter()
        .map(|result| {
            if !result.confidence.is_finite() {
                return Err(Error::ServiceFailure(format!(
                    "Invalid confidence for {} {}",
                    result.plant_type, result.disease_type
                )));
            }
            Ok(ClassificationResult {
                confidence: result.confidence.clamp(0.0, 1.0),
                ..result
            })
        })
        .collect()
}

/// 最も確信度の高い候補を選ぶ
///
/// 候補の並び順には依存しない。同点の場合は先に現れたもの。
pub fn top_result(results: Vec<ClassificationResult>) -> Option<ClassificationResult> {
    results.into_iter().reduce(|best, next| {
        if next.confidence.total_cmp(&best.confidence).is_gt() {
            next
        } else {
            best
        }
    })
}

/// 推論を行わないモック分類器
///
/// 遅延はプラットフォーム側（tokio / gloo timers）で付与する。
#[derive(Debug, Clone)]
pub struct MockClassifier {
    outcome: std::result::Result<Vec<ClassificationResult>, String>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::with_results(mock_results())
    }

    pub fn with_results(results: Vec<ClassificationResult>) -> Self {
        Self { outcome: Ok(results) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ClassificationService for MockClassifier {
    async fn classify(&self, image: &ImagePayload) -> Result<Vec<ClassificationResult>> {
        tracing::debug!(file = %image.file_name, bytes = image.bytes.len(), "mock classify");
        self.outcome.clone().map_err(Error::ServiceFailure)
    }
}
