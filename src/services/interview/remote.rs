//! Remote Completion Client
//!
//! Wraps an `LlmProvider` so that every failure becomes a visible
//! `CompletionOutcome::Fallback` instead of an error. Callers branch on the
//! outcome and use the simulator or mock scorer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use mock_interview_core::{Turn, TurnRole};
use mock_interview_llm::{build_http_client, LlmError, LlmProvider, Message, OpenAIProvider};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, RequestProfile};
use crate::utils::error::{AppError, AppResult};

const ROLE_PREFIXES: &[&str] = &["面试官：", "面试官:", "Interviewer:"];

/// Why the remote reply was not used
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Offline mode or no API key
    Disabled,
    /// No answer within the configured timeout
    Timeout { seconds: u64 },
    /// Transport, HTTP status or response-shape failure
    Remote(LlmError),
    /// The endpoint answered with nothing usable
    EmptyReply,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "remote completion disabled"),
            Self::Timeout { seconds } => write!(f, "remote completion timed out after {}s", seconds),
            Self::Remote(err) => write!(f, "{}", err),
            Self::EmptyReply => write!(f, "remote completion returned an empty reply"),
        }
    }
}

/// Result of one remote call
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Reply(String),
    Fallback(FallbackReason),
}

impl CompletionOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Chat-completion client with a hard per-call timeout
#[derive(Clone)]
pub struct CompletionClient {
    provider: Option<Arc<dyn LlmProvider>>,
    timeout: Duration,
    conversation: RequestProfile,
    feedback: RequestProfile,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
            conversation: RequestProfile::conversation(),
            feedback: RequestProfile::feedback(),
        }
    }

    /// A client that never calls out; every request falls back.
    pub fn offline() -> Self {
        Self {
            provider: None,
            timeout: Duration::from_secs(30),
            conversation: RequestProfile::conversation(),
            feedback: RequestProfile::feedback(),
        }
    }

    /// Build from configuration. Offline mode or a missing API key yields
    /// an offline client rather than an error.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = if config.offline {
            info!("offline mode: interviewer replies come from the simulator");
            Self::offline()
        } else if !config.provider.has_api_key() {
            warn!(
                provider = %config.provider.provider,
                "no API key configured, running offline"
            );
            Self::offline()
        } else {
            let timeout = Duration::from_secs(config.request_timeout_secs);
            let http = build_http_client(config.provider.proxy.as_deref(), Some(timeout))
                .map_err(|e| AppError::config(e.to_string()))?;
            let provider = OpenAIProvider::new(config.provider.clone(), http);
            Self::new(Arc::new(provider), timeout)
        };
        Ok(client.with_profiles(config.conversation, config.feedback))
    }

    pub fn with_profiles(mut self, conversation: RequestProfile, feedback: RequestProfile) -> Self {
        self.conversation = conversation;
        self.feedback = feedback;
        self
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    pub fn conversation_profile(&self) -> RequestProfile {
        self.conversation
    }

    pub fn feedback_profile(&self) -> RequestProfile {
        self.feedback
    }

    /// Send `system` followed by `messages`. Never fails.
    pub async fn complete(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
        profile: RequestProfile,
    ) -> CompletionOutcome {
        let Some(provider) = self.provider.as_ref() else {
            return CompletionOutcome::Fallback(FallbackReason::Disabled);
        };

        debug!(
            provider = provider.name(),
            model = provider.model(),
            messages = messages.len(),
            "requesting completion"
        );

        let call = provider.send_message(messages, system.map(str::to_string), profile.options());
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => CompletionOutcome::Fallback(FallbackReason::Timeout {
                seconds: self.timeout.as_secs(),
            }),
            Ok(Err(LlmError::Timeout { .. })) => CompletionOutcome::Fallback(FallbackReason::Timeout {
                seconds: self.timeout.as_secs(),
            }),
            Ok(Err(err)) => CompletionOutcome::Fallback(FallbackReason::Remote(err)),
            Ok(Ok(response)) => match response.text().and_then(sanitize_reply) {
                Some(text) => CompletionOutcome::Reply(text),
                None => CompletionOutcome::Fallback(FallbackReason::EmptyReply),
            },
        };

        if let CompletionOutcome::Fallback(reason) = &outcome {
            warn!(provider = provider.name(), reason = %reason, "remote completion failed");
        }
        outcome
    }
}

/// Trim and drop a leading role prefix. `None` when nothing remains.
pub fn sanitize_reply(raw: &str) -> Option<String> {
    let mut text = raw.trim();
    for prefix in ROLE_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start();
            break;
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Non-system turns as provider messages, oldest first
pub fn turns_to_messages(turns: &[Turn]) -> Vec<Message> {
    turns
        .iter()
        .filter_map(|turn| match turn.role {
            TurnRole::User => Some(Message::user(turn.content.clone())),
            TurnRole::Assistant => Some(Message::assistant(turn.content.clone())),
            TurnRole::System => None,
        })
        .collect()
}
