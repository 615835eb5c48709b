use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of the recommendation path. Parsing and the local engine
/// never produce these; they degrade to defaults instead.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Non-2xx response from the chat-completion endpoint.
    #[error("API 오류({}): {}", .status.as_u16(), .body)]
    Remote { status: StatusCode, body: String },

    /// Network/DNS/timeout failure below the HTTP layer.
    #[error("네트워크 오류: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose completion text is missing or blank after trimming.
    #[error("API 응답이 비어 있습니다.")]
    EmptyResponse,

    /// Rejected input: empty query, system-role turn, empty prompt update.
    #[error("{0}")]
    Validation(String),
}
