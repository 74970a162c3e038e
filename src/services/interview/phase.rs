//! Phase Clock
//!
//! Pure functions that map the interviewer-turn counter and the configured
//! duration to a phase label and to the end-of-interview decision.

use serde::{Deserialize, Serialize};

/// Named stage of the interview, in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    /// Self-introduction and background
    Introduction,
    /// Role-specific questions
    Technical,
    /// Teamwork, deadlines, expectations
    Behavioral,
    /// Candidate questions and wrap-up
    Closing,
}

impl InterviewPhase {
    /// Get the display label for this phase
    pub fn label(&self) -> &'static str {
        match self {
            Self::Introduction => "开场介绍",
            Self::Technical => "专业考察",
            Self::Behavioral => "行为面试",
            Self::Closing => "总结收尾",
        }
    }

    /// Get the phase index (0-based) for progress calculation
    pub fn index(&self) -> usize {
        match self {
            Self::Introduction => 0,
            Self::Technical => 1,
            Self::Behavioral => 2,
            Self::Closing => 3,
        }
    }

    pub fn total_phases() -> usize {
        4
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::Closing => "closing",
        }
    }

    /// Parse from the `as_str` form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "introduction" => Some(Self::Introduction),
            "technical" => Some(Self::Technical),
            "behavioral" => Some(Self::Behavioral),
            "closing" => Some(Self::Closing),
            _ => None,
        }
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the session is in the announce/confirm end protocol.
/// Moves only forward: Running -> Announced -> Completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    Running,
    /// Closing statement delivered, waiting for the caller to confirm
    Announced,
    Completed,
}

impl TerminalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Announced => "announced",
            Self::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `next` is a legal forward step.
    /// Running may skip straight to Completed (explicit confirmation).
    pub fn can_transition_to(&self, next: TerminalState) -> bool {
        next > *self
    }
}

/// Phase label for `turns` interviewer turns. Thresholds do not depend on
/// the configured duration.
pub fn phase_for_turns(turns: u32) -> InterviewPhase {
    match turns {
        0..=1 => InterviewPhase::Introduction,
        2..=5 => InterviewPhase::Technical,
        6..=7 => InterviewPhase::Behavioral,
        _ => InterviewPhase::Closing,
    }
}

/// Maximum interviewer turns for a session of `duration_minutes`
pub fn question_budget(duration_minutes: u32) -> u32 {
    match duration_minutes {
        0..=15 => 6,
        16..=30 => 10,
        31..=45 => 15,
        _ => 20,
    }
}

/// True once the budget is reached while the session is still running.
pub fn should_announce_end(turns: u32, duration_minutes: u32, state: TerminalState) -> bool {
    state == TerminalState::Running && turns >= question_budget(duration_minutes)
}

pub fn should_finalize(state: TerminalState) -> bool {
    state == TerminalState::Completed
}
