//! エラー型定義

use thiserror::Error;

/// InvalidImage時にユーザーへ表示するメッセージ
pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file (jpg, jpeg, png)";

/// NoCandidate時にユーザーへ表示するメッセージ
pub const NO_CANDIDATE_MESSAGE: &str = "Please select an image first";

/// サービスがメッセージを返さなかった場合の既定メッセージ
pub const DEFAULT_SERVICE_FAILURE: &str = "Failed to get prediction";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像以外のファイル、またはファイルなしで取り込もうとした
    #[error("Please select a valid image file (jpg, jpeg, png)")]
    InvalidImage,

    /// 画像未選択のまま解析を要求した
    #[error("Please select an image first")]
    NoCandidate,

    /// 分類サービスの呼び出し失敗
    #[error("{0}")]
    ServiceFailure(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// セッションのerror_messageに格納する文字列
    pub fn user_message(&self) -> String {
        match self {
            Error::ServiceFailure(msg) if msg.trim().is_empty() => {
                DEFAULT_SERVICE_FAILURE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
