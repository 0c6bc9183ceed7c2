//! 1枚の画像を取り込み〜解析まで通す

use plantguard_common::{
    ClassificationResult, ClassificationService, IntakeSource, Session, TreatmentTable,
};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::intake::{load_image, FilePreviews};

/// 解析結果
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub file_name: String,
    pub digest: String,
    pub result: ClassificationResult,
    pub treatment: String,
    pub elapsed: Duration,
}

/// 画像ファイルを解析する
///
/// 画像以外のファイルは `InvalidImage`、サービス失敗は `ServiceFailure` として返る。
pub async fn analyze_file<S>(path: &Path, service: &S) -> Result<AnalysisReport>
where
    S: ClassificationService + ?Sized,
{
    let image = load_image(path)?;
    let digest = image.digest();

    let mut session = Session::new(FilePreviews::default(), TreatmentTable::builtin());
    let candidate = session.accept_file(Some(image), IntakeSource::Picker)?;
    let file_name = candidate.file_name.clone();
    // プレビューはセッション終了時に解放されるため、レポートには含めない
    tracing::info!(file = %file_name, sha256 = %digest, preview = %candidate.preview_url, "image accepted");

    let started = Instant::now();
    let result = session.submit(service).await?;
    let elapsed = started.elapsed();

    let treatment = session
        .treatment()
        .unwrap_or(plantguard_common::FALLBACK_TREATMENT)
        .to_string();

    Ok(AnalysisReport {
        file_name,
        digest,
        result,
        treatment,
        elapsed,
    })
}
