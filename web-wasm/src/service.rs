//! ブラウザ用の分類サービス

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use plantguard_common::{
    ClassificationResult, ClassificationService, ImagePayload, MockClassifier, Result,
};

/// モックの応答待ち時間
pub const MOCK_LATENCY_MS: u32 = 1500;

/// 一定時間待ってからモック結果を返す
pub struct DelayedMock {
    inner: MockClassifier,
    delay_ms: u32,
}

impl DelayedMock {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            inner: MockClassifier::new(),
            delay_ms,
        }
    }
}

impl Default for DelayedMock {
    fn default() -> Self {
        Self::new(MOCK_LATENCY_MS)
    }
}

#[async_trait(?Send)]
impl ClassificationService for DelayedMock {
    async fn classify(&self, image: &ImagePayload) -> Result<Vec<ClassificationResult>> {
        TimeoutFuture::new(self.delay_ms).await;
        self.inner.classify(image).await
    }
}
