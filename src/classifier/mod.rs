//! 分類サービスの組み立て
//!
//! - モック: 固定の3候補を一定時間後に返す
//! - フィクスチャ: JSONファイルのレスポンスをそのまま返す（失敗レスポンスの確認用）
//!
//! どちらも呼び出しはタイムアウトで打ち切る。

use async_trait::async_trait;
use plantguard_common::{
    parse_service_response, ClassificationResult, ClassificationService, Error, ImagePayload,
    MockClassifier,
};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// 応答前に待ち時間を入れる
pub struct LatencyClassifier<S> {
    inner: S,
    latency: Duration,
}

impl<S> LatencyClassifier<S> {
    pub fn new(inner: S, latency: Duration) -> Self {
        Self { inner, latency }
    }
}

#[async_trait(?Send)]
impl<S: ClassificationService> ClassificationService for LatencyClassifier<S> {
    async fn classify(&self, image: &ImagePayload) -> plantguard_common::Result<Vec<ClassificationResult>> {
        tokio::time::sleep(self.latency).await;
        self.inner.classify(image).await
    }
}

/// 一定時間で打ち切る
pub struct TimeoutClassifier<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutClassifier<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait(?Send)]
impl<S: ClassificationService> ClassificationService for TimeoutClassifier<S> {
    async fn classify(&self, image: &ImagePayload) -> plantguard_common::Result<Vec<ClassificationResult>> {
        match tokio::time::timeout(self.timeout, self.inner.classify(image)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::ServiceFailure(format!(
                "Classification timed out after {} seconds",
                self.timeout.as_secs()
            ))),
        }
    }
}

/// JSONファイルのレスポンスを返す
pub struct FixtureClassifier {
    path: PathBuf,
}

impl FixtureClassifier {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait(?Send)]
impl ClassificationService for FixtureClassifier {
    async fn classify(&self, image: &ImagePayload) -> plantguard_common::Result<Vec<ClassificationResult>> {
        tracing::debug!(fixture = %self.path.display(), file = %image.file_name, "fixture classify");
        let response = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::ServiceFailure(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        parse_service_response(&response)
    }
}

/// 設定から分類サービスを組み立てる
pub fn build_service(config: &Config) -> Box<dyn ClassificationService> {
    let timeout = Duration::from_secs(config.timeout_seconds.max(1));
    match &config.response_fixture {
        Some(path) => Box::new(TimeoutClassifier::new(
            FixtureClassifier::new(path.clone()),
            timeout,
        )),
        None => Box::new(TimeoutClassifier::new(
            LatencyClassifier::new(
                MockClassifier::new(),
                Duration::from_millis(config.mock_latency_ms),
            ),
            timeout,
        )),
    }
}
