//! Services
//!
//! Business logic for the application.

pub mod interview;

pub use interview::{CompletionClient, InterviewSession, Scorecard, TurnResult};
