//! Mock Interview LLM
//!
//! Provides a unified interface for chat-completion providers that speak the
//! OpenAI wire format:
//! - ZhipuAI GLM (default)
//! - OpenAI
//! - DeepSeek
//!
//! Also includes the HTTP client factory shared by every provider.

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;
