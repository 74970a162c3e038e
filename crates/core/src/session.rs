//! Session Types
//!
//! The immutable per-interview configuration (`SessionContext`) and the
//! transcript unit (`Turn`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// How the interviewer behaves toward the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewerTone {
    /// Presses for detail, applies moderate pressure
    Strict,
    /// Relaxed, encouraging
    Friendly,
    /// Exploratory, values the thinking process
    Open,
}

impl InterviewerTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Friendly => "friendly",
            Self::Open => "open",
        }
    }
}

impl FromStr for InterviewerTone {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "friendly" => Ok(Self::Friendly),
            "open" => Ok(Self::Open),
            other => Err(CoreError::parse(format!("unknown interviewer tone: {}", other))),
        }
    }
}

impl fmt::Display for InterviewerTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of interview is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewCategory {
    Technical,
    Behavioral,
    Comprehensive,
}

impl InterviewCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl FromStr for InterviewCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(Self::Technical),
            "behavioral" | "behavioural" => Ok(Self::Behavioral),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(CoreError::parse(format!(
                "unknown interview category: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for InterviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one interview. Created once and never mutated; starting
/// a new interview means building a new context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// Position being interviewed for
    pub job_title: String,
    /// Free-text job description
    pub job_description: String,
    /// Extracted resume text
    pub resume_text: String,
    /// Interviewer style
    pub tone: InterviewerTone,
    /// Optional company name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Interview category
    pub category: InterviewCategory,
    /// Target duration in minutes (> 0)
    pub duration_minutes: u32,
}

impl SessionContext {
    /// Check the invariants a context must satisfy before a session starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.duration_minutes == 0 {
            return Err(CoreError::validation(
                "interview duration must be greater than zero minutes",
            ));
        }
        Ok(())
    }
}

/// Author of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the interview transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// A candidate answer
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// An interviewer utterance
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}
