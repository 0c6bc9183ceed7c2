//! アップロード〜分類セッション
//!
//! 状態遷移:
//! - Idle: 候補なし、または解析待ちの候補あり
//! - Analyzing: `begin_analysis` で遷移（候補必須）
//! - Resolved / Failed: `finish_analysis` で遷移。次の解析か取り込みまで維持
//!
//! 取り込み（成功・失敗とも）は世代番号を進めるため、
//! 取り込み前に発行されたチケットの結果は破棄される。

use crate::error::{Error, Result};
use crate::intake::{is_image_mime, IntakeFile, IntakeSource, PreviewStore, UploadCandidate};
use crate::service::{top_result, validate_results, ClassificationService};
use crate::treatment::TreatmentTable;
use crate::types::{ClassificationResult, ImagePayload};

/// 中身をメモリに読み込み済みのファイル
pub trait LoadedFile: IntakeFile {
    fn to_payload(&self) -> ImagePayload;
}

impl LoadedFile for crate::intake::ImageFile {
    fn to_payload(&self) -> ImagePayload {
        crate::intake::ImageFile::to_payload(self)
    }
}

/// セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Resolved,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Analyzing => "analyzing",
            Phase::Resolved => "resolved",
            Phase::Failed => "failed",
        }
    }
}

/// 解析1回分の引換券
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

/// 1画面分のセッション状態
pub struct Session<P: PreviewStore> {
    previews: P,
    treatments: TreatmentTable,
    candidate: Option<UploadCandidate<P::File>>,
    result: Option<ClassificationResult>,
    error_message: Option<String>,
    is_analyzing: bool,
    drag_active: bool,
    phase: Phase,
    generation: u64,
}

impl<P: PreviewStore> Session<P> {
    pub fn new(previews: P, treatments: TreatmentTable) -> Self {
        Self {
            previews,
            treatments,
            candidate: None,
            result: None,
            error_message: None,
            is_analyzing: false,
            drag_active: false,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn candidate(&self) -> Option<&UploadCandidate<P::File>> {
        self.candidate.as_ref()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }

    pub fn treatments(&self) -> &TreatmentTable {
        &self.treatments
    }

    /// 現在の結果に対する治療推奨
    pub fn treatment(&self) -> Option<&str> {
        self.result
            .as_ref()
            .map(|r| self.treatments.lookup(&r.plant_type, &r.disease_type))
    }

    /// ファイルを1つ取り込む
    ///
    /// `None` または画像以外のMIMEタイプは `InvalidImage`。
    /// その場合も既存の候補・プレビュー・結果はクリアされる。
    pub fn accept_file(
        &mut self,
        file: Option<P::File>,
        source: IntakeSource,
    ) -> Result<&UploadCandidate<P::File>> {
        self.generation += 1;
        self.is_analyzing = false;
        self.phase = Phase::Idle;
        self.result = None;
        self.release_candidate();

        let file = match file {
            Some(file) if is_image_mime(&file.mime_type()) => file,
            rejected => {
                let mime_type = rejected.map(|f| f.mime_type()).unwrap_or_default();
                tracing::debug!(source = source.as_str(), mime_type = %mime_type, "intake rejected");
                self.error_message = Some(Error::InvalidImage.user_message());
                return Err(Error::InvalidImage);
            }
        };

        self.error_message = None;
        let preview_url = self.previews.create(&file);
        let candidate = UploadCandidate {
            file_name: file.file_name(),
            mime_type: file.mime_type(),
            preview_url,
            source,
            file,
        };
        tracing::debug!(
            source = source.as_str(),
            file = %candidate.file_name,
            mime_type = %candidate.mime_type,
            "intake accepted"
        );
        let candidate = self.candidate.insert(candidate);
        Ok(&*candidate)
    }

    /// 複数ファイルが渡された場合は先頭のみ取り込む
    pub fn accept_files(
        &mut self,
        files: Vec<P::File>,
        source: IntakeSource,
    ) -> Result<&UploadCandidate<P::File>> {
        if files.len() > 1 {
            tracing::debug!(ignored = files.len() - 1, "extra files ignored");
        }
        let first = files.into_iter().next();
        self.accept_file(first, source)
    }

    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// ドロップされたファイルを取り込む
    pub fn accept_drop(&mut self, files: Vec<P::File>) -> Result<&UploadCandidate<P::File>> {
        self.drag_active = false;
        self.accept_files(files, IntakeSource::Drop)
    }

    /// Idle → Analyzing
    ///
    /// 候補がなければ `NoCandidate`（is_analyzingは変更しない）。
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket> {
        if self.candidate.is_none() {
            self.result = None;
            self.error_message = Some(Error::NoCandidate.user_message());
            return Err(Error::NoCandidate);
        }

        self.generation += 1;
        self.is_analyzing = true;
        self.phase = Phase::Analyzing;
        self.result = None;
        self.error_message = None;
        tracing::debug!(generation = self.generation, "analysis started");
        Ok(AnalysisTicket {
            generation: self.generation,
        })
    }

    /// 解析結果を反映する
    ///
    /// チケットが古い（後から取り込みや再解析があった）場合は何もせず `false`。
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<Vec<ClassificationResult>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "stale analysis result discarded"
            );
            return false;
        }

        self.is_analyzing = false;
        let top = outcome.and_then(validate_results).and_then(|results| {
            top_result(results).ok_or_else(|| Error::ServiceFailure("Empty response".to_string()))
        });
        match top {
            Ok(result) => {
                tracing::debug!(
                    plant = %result.plant_type,
                    disease = %result.disease_type,
                    confidence = result.confidence,
                    "analysis resolved"
                );
                self.result = Some(result);
                self.error_message = None;
                self.phase = Phase::Resolved;
            }
            Err(err) => {
                let message = err.user_message();
                tracing::debug!(error = %message, "analysis failed");
                self.result = None;
                self.error_message = Some(message);
                self.phase = Phase::Failed;
            }
        }
        true
    }

    fn release_candidate(&mut self) {
        if let Some(old) = self.candidate.take() {
            self.previews.release(&old.preview_url);
        }
    }
}

impl<P> Session<P>
where
    P: PreviewStore,
    P::File: LoadedFile,
{
    /// 解析を最後まで実行する
    ///
    /// 成功時は採用された（最上位の）結果を返す。
    pub async fn submit<S>(&mut self, service: &S) -> Result<ClassificationResult>
    where
        S: ClassificationService + ?Sized,
    {
        let ticket = self.begin_analysis()?;
        let payload = self
            .candidate
            .as_ref()
            .map(|c| c.file.to_payload())
            .ok_or(Error::NoCandidate)?;

        let outcome = service.classify(&payload).await;
        self.finish_analysis(ticket, outcome);

        match (&self.result, &self.error_message) {
            (Some(result), _) => Ok(result.clone()),
            (None, Some(message)) => Err(Error::ServiceFailure(message.clone())),
            (None, None) => Err(Error::ServiceFailure(crate::error::DEFAULT_SERVICE_FAILURE.to_string())),
        }
    }
}

impl<P: PreviewStore> Drop for Session<P> {
    fn drop(&mut self) {
        self.release_candidate();
    }
}
