//! Mock Interview Core
//!
//! Foundational types shared by every crate in the workspace. This crate has
//! no knowledge of LLM providers, HTTP, or the orchestration logic.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `session` - Per-interview configuration (`SessionContext`) and transcript turns (`Turn`)

pub mod error;
pub mod session;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Session Types ──────────────────────────────────────────────────────
pub use session::{InterviewCategory, InterviewerTone, SessionContext, Turn, TurnRole};
