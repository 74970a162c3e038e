//! Mock Interview
//!
//! Library behind the `mock-interview` binary:
//! - Interview orchestration engine (`services::interview`)
//! - JSON configuration file (`config`)
//! - Application error type and paths (`utils`)

pub mod config;
pub mod services;
pub mod utils;

pub use config::{AppConfig, ConfigService, RequestProfile};
pub use mock_interview_core::{
    InterviewCategory, InterviewerTone, SessionContext, Turn, TurnRole,
};
pub use services::interview::{
    CompletionClient, CompletionOutcome, FallbackReason, InterviewPhase, InterviewSession,
    Scorecard, TerminalState, TurnResult,
};
pub use utils::error::{AppError, AppResult};
