//! Interview Orchestration Engine
//!
//! Runs a phased mock interview against a chat-completion endpoint and
//! scores the transcript afterwards. Every remote failure degrades to a
//! local fallback, so callers never see an error from a turn or from
//! feedback generation.
//!
//! ## Architecture
//! - `phase.rs` - Phase labels, turn budget and the end-protocol gates
//! - `simulator.rs` - Keyword job classifier and canned interviewer replies
//! - `prompts.rs` - System prompt and scoring prompt construction
//! - `remote.rs` - Completion client with explicit `Reply | Fallback` outcomes
//! - `orchestrator.rs` - `InterviewSession`, the per-interview state machine
//! - `feedback.rs` - Scorecard parsing, validation and the mock scorer
//! - `scorecard.rs` - `Scorecard` type and presentation helpers

pub mod feedback;
pub mod orchestrator;
pub mod phase;
pub mod prompts;
pub mod remote;
pub mod scorecard;
pub mod simulator;

pub use feedback::{mock_scorecard, parse_scorecard, strip_code_fence, FeedbackError, FeedbackGenerator};
pub use orchestrator::{InterviewSession, TurnResult};
pub use phase::{
    phase_for_turns, question_budget, should_announce_end, should_finalize, InterviewPhase,
    TerminalState,
};
pub use remote::{CompletionClient, CompletionOutcome, FallbackReason};
pub use scorecard::{format_duration, format_score, DimensionScores, ScoreLevel, Scorecard};
pub use simulator::{classify_job_title, JobCategory, ResponseSimulator};
