//! Feedback Integration Tests
//!
//! Scorecard generation through `InterviewSession::generate_feedback` and
//! the parser directly:
//! - Fenced and malformed model output
//! - Clamping and backfilling
//! - Mock scorer fallback

use mock_interview::services::interview::scorecard::DIMENSION_KEYS;
use mock_interview::services::interview::{parse_scorecard, FeedbackError, ScoreLevel};
use mock_interview::Scorecard;

use super::support::{offline_session, scripted_session, ScriptedProvider};

// ============================================================================
// Helpers
// ============================================================================

fn assert_fully_populated(card: &Scorecard) {
    assert!(card.is_within_bounds(), "out of bounds: {:?}", card);
    let json = serde_json::to_value(card).unwrap();
    for key in DIMENSION_KEYS {
        let score = json["dimensionScores"][key].as_f64().unwrap();
        assert!((1.0..=10.0).contains(&score), "{} = {}", key, score);
    }
    assert!(!card.summary.is_empty());
}

// ============================================================================
// Parser
// ============================================================================

#[test]
fn test_fenced_overall_score_is_clamped() {
    let card = parse_scorecard("```json\n{\"overallScore\":11}\n```").unwrap();
    assert_eq!(card.overall_score, 10.0);
    assert_fully_populated(&card);
}

#[test]
fn test_unparsable_text_is_format_error() {
    let err = parse_scorecard("The candidate did well overall.").unwrap_err();
    assert!(matches!(err, FeedbackError::Format(_)));
}

#[test]
fn test_validated_scorecard_round_trips() {
    let raw = r#"{
        "overallScore": 12.345,
        "dimensionScores": {"逻辑清晰度": 0.2, "专业契合度": 8.77, "表达能力": "9.04", "压力应对力": 6},
        "strengths": ["一", "二", "三", "四", "五", "六"],
        "summary": "  表现稳定  "
    }"#;
    let card = parse_scorecard(raw).unwrap();
    assert_fully_populated(&card);
    assert_eq!(card.strengths.len(), 5);
    assert_eq!(card.summary, "表现稳定");

    let serialized = serde_json::to_string(&card).unwrap();
    let reparsed = parse_scorecard(&serialized).unwrap();
    assert_eq!(reparsed, card);

    let deserialized: Scorecard = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, card);
}

// ============================================================================
// Session feedback
// ============================================================================

#[tokio::test]
async fn test_unparsable_remote_feedback_falls_back_to_mock() {
    let provider = ScriptedProvider::replies(&["第一个问题", "第二个问题", "这不是JSON"]);
    let mut session = scripted_session(30, provider.clone());
    session.send_message("回答一").await;
    session.send_message("回答二").await;
    session.complete_interview();

    let card = session.generate_feedback().await;
    assert_fully_populated(&card);
    // System turn plus four exchanged turns: 6 + 0.2 * 5
    assert_eq!(card.overall_score, 7.0);
    assert_eq!(card.strengths.len(), 4);

    let calls = provider.calls();
    let scoring = calls.last().unwrap();
    assert_eq!(scoring.options.temperature_override, Some(0.3));
    assert_eq!(scoring.options.max_tokens_override, Some(2048));
    assert!(scoring.system.as_deref().unwrap().contains("HR专家"));
    assert!(scoring.messages[0].content.contains("候选人: 回答一"));
    assert!(scoring.messages[0].content.contains("面试官: 第二个问题"));
}

#[tokio::test]
async fn test_remote_feedback_is_validated() {
    let report = r#"```json
{
  "overallScore": 8.6,
  "dimensionScores": {"逻辑清晰度": 9.1, "专业契合度": 8.4, "表达能力": 15, "问题理解力": 8.8, "压力应对力": 7.2},
  "strengths": ["架构思路清晰"],
  "improvements": ["多用数据佐证"],
  "summary": "整体优秀"
}
```"#;
    let provider = ScriptedProvider::replies(&["请介绍一下自己", report]);
    let mut session = scripted_session(15, provider);
    session.send_message("你好").await;
    session.complete_interview();

    let card = session.generate_feedback().await;
    assert_eq!(card.overall_score, 8.6);
    assert_eq!(card.dimension_scores.expression, 10.0);
    assert_eq!(card.strengths, vec!["架构思路清晰".to_string()]);
    assert_eq!(card.level(), ScoreLevel::Excellent);
}

#[tokio::test]
async fn test_feedback_before_any_turn_is_legal() {
    let mut session = offline_session(15, 2);
    let card = session.generate_feedback().await;
    assert_fully_populated(&card);
    // Only the system turn so far: 6 + 0.2 * 1
    assert_eq!(card.overall_score, 6.2);
}

#[tokio::test]
async fn test_regenerating_feedback_yields_new_scorecard() {
    let mut session = offline_session(30, 12);
    for i in 0..5 {
        session.send_message(&format!("回答{}", i)).await;
    }
    let first = session.generate_feedback().await;
    let second = session.generate_feedback().await;
    assert_fully_populated(&first);
    assert_fully_populated(&second);
    assert_eq!(first.overall_score, second.overall_score);
    assert_eq!(first.strengths, second.strengths);
}
