//! PlantGuard Common Library
//!
//! CLIとWeb(WASM)で共有されるセッション状態・分類サービス・表示ロジック

pub mod types;
pub mod error;
pub mod intake;
pub mod session;
pub mod service;
pub mod treatment;
pub mod parser;
pub mod display;

pub use types::{ClassificationResult, ImagePayload, ImageShape};
pub use error::{Error, Result};
pub use intake::{ImageFile, IntakeFile, IntakeSource, PreviewStore, UploadCandidate};
pub use session::{AnalysisTicket, LoadedFile, Phase, Session};
pub use service::{mock_results, top_result, validate_results, ClassificationService, MockClassifier};
pub use treatment::{TreatmentTable, FALLBACK_TREATMENT};
pub use parser::{extract_json, parse_service_response};
pub use display::{display_disease, format_confidence, format_image_size, ResultCard};
