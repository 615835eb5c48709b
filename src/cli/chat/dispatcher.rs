use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cli::chat::conversation_state::ConversationState;
use crate::cli::chat::recommend::local_recommend;
use crate::error::RecommendError;
use crate::openai_client::OpenAiClient;

/// Recognized credential variables, checked in order; first defined wins.
pub const API_KEY_VARS: [&str; 2] = ["GPT_API_KEY", "OPENAI_API_KEY"];

const DEFAULT_LOCAL_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct ApiCredential {
    pub var: &'static str,
    pub key: String,
}

/// Routing configuration, resolved once at startup and injected. Tests build
/// this directly instead of touching the environment.
pub struct DispatcherConfig {
    pub credential: Option<ApiCredential>,
    pub local_delay: Duration,
}

impl DispatcherConfig {
    pub fn from_env() -> Self {
        let credential = API_KEY_VARS.iter().find_map(|var| {
            env::var(var)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(|key| ApiCredential { var, key })
        });
        Self {
            credential,
            local_delay: DEFAULT_LOCAL_DELAY,
        }
    }
}

#[async_trait]
pub(crate) trait Recommend: Send + Sync {
    async fn recommend(
        &self,
        conversation: &ConversationState,
        query: &str,
    ) -> Result<String, RecommendError>;
}

struct LocalEngine {
    delay: Duration,
}

#[async_trait]
impl Recommend for LocalEngine {
    async fn recommend(
        &self,
        _conversation: &ConversationState,
        query: &str,
    ) -> Result<String, RecommendError> {
        // keeps perceived latency in line with the remote path
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(local_recommend(query))
    }
}

#[async_trait]
impl Recommend for OpenAiClient {
    async fn recommend(
        &self,
        conversation: &ConversationState,
        _query: &str,
    ) -> Result<String, RecommendError> {
        self.complete(conversation.messages()).await
    }
}

enum Mode {
    Local,
    Remote { var: &'static str },
}

/// Single entry point the chat loop calls. The route is fixed when the
/// dispatcher is built and never changes for the process lifetime; there is
/// no fallback from remote to local on failure.
pub struct Dispatcher {
    backend: Box<dyn Recommend>,
    mode: Mode,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        match config.credential {
            Some(credential) => {
                info!("remote mode enabled via {}", credential.var);
                Self {
                    backend: Box::new(OpenAiClient::new(credential.key)),
                    mode: Mode::Remote {
                        var: credential.var,
                    },
                }
            }
            None => {
                info!("no API key configured, using the local recommendation engine");
                Self {
                    backend: Box::new(LocalEngine {
                        delay: config.local_delay,
                    }),
                    mode: Mode::Local,
                }
            }
        }
    }

    /// Builds a dispatcher around an arbitrary backend, so tests can drive
    /// the failure paths without a network.
    #[cfg(test)]
    pub(crate) fn with_backend(backend: Box<dyn Recommend>) -> Self {
        Self {
            backend,
            mode: Mode::Remote {
                var: "OPENAI_API_KEY",
            },
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.mode, Mode::Local)
    }

    pub fn mode_badge(&self) -> String {
        match self.mode {
            Mode::Local => "🔧 데모 모드(로컬 추천 사용): API 키 미설정".to_string(),
            Mode::Remote { var } => format!("🤖 실시간 GPT 모드: {var} 사용 중"),
        }
    }

    /// The dispatcher never mutates the conversation; the caller appends the
    /// user turn before dispatching and the assistant turn only on success.
    pub async fn recommend(
        &self,
        conversation: &ConversationState,
        query: &str,
    ) -> Result<String, RecommendError> {
        if query.trim().is_empty() {
            return Err(RecommendError::Validation(
                "질문을 입력해주세요.".to_string(),
            ));
        }
        debug!(local = self.is_local(), "dispatching recommendation request");
        self.backend.recommend(conversation, query).await
    }
}
