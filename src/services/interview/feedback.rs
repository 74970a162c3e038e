//! Feedback Generator
//!
//! Turns a transcript into a `Scorecard`. The remote path asks the model for
//! JSON, strips code fences, then validates and clamps every field. Any
//! failure ends in the mock scorer, so `generate` always returns a complete
//! scorecard.

use mock_interview_core::Turn;
use mock_interview_llm::Message;
use rand::Rng;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::prompts::{build_feedback_prompt, FEEDBACK_SYSTEM_PROMPT};
use super::remote::{CompletionClient, CompletionOutcome, FallbackReason};
use super::scorecard::{
    clamp_score, DimensionScores, Scorecard, DIMENSION_KEYS, MAX_LIST_ITEMS, NEUTRAL_SCORE,
};

const DEFAULT_STRENGTHS: [&str; 3] = [
    "技术基础扎实，对核心概念理解深入",
    "表达清晰，逻辑性强",
    "学习能力强，对新技术保持敏感",
];

const DEFAULT_IMPROVEMENTS: [&str; 3] = [
    "可以更多地使用具体数据来支撑观点",
    "在描述技术方案时可以更加详细",
    "建议准备一些行业前沿话题",
];

const DEFAULT_SUMMARY: &str = "整体表现良好，技术能力和沟通能力基本达到岗位要求。";

const MOCK_STRENGTHS: [&str; 4] = [
    "技术基础扎实，对核心概念理解深入",
    "表达清晰，逻辑性强",
    "学习能力强，对新技术保持敏感",
    "团队协作意识良好",
];

const MOCK_IMPROVEMENTS: [&str; 4] = [
    "可以更多地使用具体数据来支撑观点",
    "在描述技术方案时可以更加详细",
    "建议准备一些行业前沿话题",
    "可以提前准备一些有针对性的问题",
];

const MOCK_SUMMARY: &str =
    "整体表现优秀，技术能力和沟通能力都达到了岗位要求。建议在未来的面试中更多地展示具体的项目成果和数据支撑。";

/// Why the remote scorecard could not be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    /// The model answered, but not with a usable JSON object
    #[error("feedback format error: {0}")]
    Format(String),

    /// The remote call itself did not produce a reply
    #[error("feedback unavailable: {0}")]
    Remote(FallbackReason),
}

/// Remove a surrounding ``` fence with an optional `json` tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(mut inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    if inner
        .get(..4)
        .map_or(false, |tag| tag.eq_ignore_ascii_case("json"))
    {
        inner = &inner[4..];
    }
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn score_field(object: &Map<String, Value>, key: &str) -> f64 {
    let raw = match object.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    clamp_score(raw.unwrap_or(NEUTRAL_SCORE))
}

fn list_field(object: &Map<String, Value>, key: &str, default: &[&str]) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(MAX_LIST_ITEMS)
            .map(str::to_string)
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Parse and validate model output into a scorecard.
///
/// Scores are clamped into [1, 10]; absent or non-numeric scores become 7.5.
/// Lists are cut to five entries and replaced by defaults when absent.
pub fn parse_scorecard(text: &str) -> Result<Scorecard, FeedbackError> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FeedbackError::Format(format!("invalid JSON: {}", e)))?;
    let Value::Object(object) = value else {
        return Err(FeedbackError::Format(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let empty = Map::new();
    let dimensions = match object.get("dimensionScores") {
        Some(Value::Object(map)) => map,
        _ => &empty,
    };

    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUMMARY)
        .to_string();

    Ok(Scorecard {
        overall_score: score_field(&object, "overallScore"),
        dimension_scores: DimensionScores::from_ordered(
            DIMENSION_KEYS.map(|key| score_field(dimensions, key)),
        ),
        strengths: list_field(&object, "strengths", &DEFAULT_STRENGTHS),
        improvements: list_field(&object, "improvements", &DEFAULT_IMPROVEMENTS),
        summary,
    })
}

/// Offline scorecard: base score grows with transcript length, each
/// dimension jitters by up to half a point around it.
pub fn mock_scorecard<R: Rng + ?Sized>(turn_count: usize, rng: &mut R) -> Scorecard {
    let base = (6.0 + 0.2 * turn_count as f64).min(8.5);
    let mut jitter = || base + rng.gen_range(-0.5..0.5);
    let dimensions = [jitter(), jitter(), jitter(), jitter(), jitter()];

    Scorecard {
        overall_score: clamp_score(base),
        dimension_scores: DimensionScores::from_ordered(dimensions),
        strengths: MOCK_STRENGTHS.iter().map(|s| s.to_string()).collect(),
        improvements: MOCK_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        summary: MOCK_SUMMARY.to_string(),
    }
}

/// Scores a transcript through the completion client
pub struct FeedbackGenerator<'a> {
    client: &'a CompletionClient,
}

impl<'a> FeedbackGenerator<'a> {
    pub fn new(client: &'a CompletionClient) -> Self {
        Self { client }
    }

    /// Ask the model for a scorecard. Errors are typed so the caller can
    /// decide how to recover.
    pub async fn request_scorecard(&self, transcript: &[Turn]) -> Result<Scorecard, FeedbackError> {
        let prompt = build_feedback_prompt(transcript);
        let outcome = self
            .client
            .complete(
                Some(FEEDBACK_SYSTEM_PROMPT),
                vec![Message::user(prompt)],
                self.client.feedback_profile(),
            )
            .await;

        match outcome {
            CompletionOutcome::Reply(text) => parse_scorecard(&text),
            CompletionOutcome::Fallback(reason) => Err(FeedbackError::Remote(reason)),
        }
    }

    /// Never fails: any error yields the mock scorecard.
    pub async fn generate<R: Rng + ?Sized>(&self, transcript: &[Turn], rng: &mut R) -> Scorecard {
        match self.request_scorecard(transcript).await {
            Ok(card) => {
                debug!(overall = card.overall_score, "scorecard parsed from model output");
                card
            }
            Err(err) => {
                warn!(error = %err, "falling back to mock scorecard");
                // The system turn counts toward transcript length.
                mock_scorecard(transcript.len(), rng)
            }
        }
    }
}
