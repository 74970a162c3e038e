//! Interview Session Integration Tests
//!
//! Drives `InterviewSession` end to end through the public API:
//! - Turn budget and the announce/confirm end protocol
//! - Remote replies versus simulator fallback
//! - Transcript bookkeeping
//!
//! Remote calls go to a scripted in-process provider; nothing touches the
//! network.

use mock_interview::services::interview::{
    classify_job_title, question_budget, JobCategory, ResponseSimulator,
};
use mock_interview::{InterviewPhase, TerminalState, TurnRole};
use mock_interview_llm::{LlmError, MessageRole};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::support::{offline_session, scripted_session, ScriptedProvider};

// ============================================================================
// End protocol
// ============================================================================

#[tokio::test]
async fn test_fifteen_minute_interview_announces_on_seventh_message() {
    let mut session = offline_session(15, 3);
    assert_eq!(question_budget(15), 6);

    for i in 1..=6 {
        let result = session.send_message(&format!("第{}个回答", i)).await;
        assert!(!result.should_show_end_button, "announced early at turn {}", i);
        assert!(!result.is_complete);
    }
    assert_eq!(session.question_count(), 6);
    assert_eq!(session.terminal_state(), TerminalState::Running);

    let result = session.send_message("第7个回答").await;
    assert!(result.should_show_end_button);
    assert!(!result.is_complete);
    assert_eq!(result.next_phase, Some(InterviewPhase::Closing));
    assert_eq!(session.terminal_state(), TerminalState::Announced);

    // The closing statement is what the transcript records for that turn.
    let history = session.conversation_history();
    assert_eq!(history.last().unwrap().content, result.content);
}

#[tokio::test]
async fn test_confirm_after_announce_completes_session() {
    let mut session = offline_session(15, 4);
    for i in 0..7 {
        session.send_message(&format!("回答{}", i)).await;
    }
    assert_eq!(session.terminal_state(), TerminalState::Announced);

    session.complete_interview();
    assert_eq!(session.terminal_state(), TerminalState::Completed);

    let count = session.question_count();
    let result = session.send_message("我还有一个问题").await;
    assert!(result.is_complete);
    assert!(!result.should_show_end_button);
    assert_eq!(session.question_count(), count);
    assert_eq!(session.terminal_state(), TerminalState::Completed);
}

#[tokio::test]
async fn test_continuing_after_announce_does_not_reannounce() {
    let mut session = offline_session(15, 5);
    for i in 0..7 {
        session.send_message(&format!("回答{}", i)).await;
    }

    for _ in 0..3 {
        let result = session.send_message("继续补充").await;
        assert!(!result.should_show_end_button);
        assert!(!result.is_complete);
        assert_eq!(session.terminal_state(), TerminalState::Announced);
        assert_eq!(session.current_phase(), InterviewPhase::Closing);
    }
}

#[tokio::test]
async fn test_budget_scales_with_duration() {
    for (minutes, budget) in [(30, 10), (45, 15), (60, 20)] {
        let mut session = offline_session(minutes, 6);
        for _ in 0..budget {
            let result = session.send_message("回答").await;
            assert!(!result.should_show_end_button);
        }
        let result = session.send_message("最后一个回答").await;
        assert!(result.should_show_end_button, "no announce for {} minutes", minutes);
    }
}

#[tokio::test]
async fn test_complete_without_announce_is_allowed() {
    let mut session = offline_session(30, 7);
    session.send_message("你好").await;
    session.complete_interview();
    assert_eq!(session.terminal_state(), TerminalState::Completed);
    assert!(session.send_message("再见").await.is_complete);
}

// ============================================================================
// Remote replies and fallback
// ============================================================================

#[tokio::test]
async fn test_remote_reply_is_used_and_transcript_sent() {
    let provider = ScriptedProvider::replies(&["面试官：请介绍一下支付网关的架构。", "好的，谈谈限流。"]);
    let mut session = scripted_session(30, provider.clone());

    let first = session.send_message("我做了五年后端").await;
    assert_eq!(first.content, "请介绍一下支付网关的架构。");

    let second = session.send_message("网关分三层").await;
    assert_eq!(second.content, "好的，谈谈限流。");

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].system.as_deref().unwrap().contains("后端工程师"));
    assert_eq!(calls[0].options.temperature_override, Some(0.7));
    assert_eq!(calls[0].options.max_tokens_override, Some(1024));

    // The second request carries the whole conversation so far.
    let roles: Vec<MessageRole> = calls[1].messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
    );
    assert_eq!(calls[1].messages[1].content, "请介绍一下支付网关的架构。");
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_simulator() {
    let provider = ScriptedProvider::failing();
    let mut session = scripted_session(30, provider.clone());

    let result = session.send_message("test").await;
    assert!(!result.content.trim().is_empty());
    assert!(result.error.is_none());
    assert_eq!(session.question_count(), 1);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_mixed_failures_keep_conversation_going() {
    let provider = ScriptedProvider::new(vec![
        Ok("第一个问题".to_string()),
        Err(LlmError::NetworkError {
            message: "connection reset".to_string(),
        }),
        Ok("   ".to_string()),
        Ok("第四个问题".to_string()),
    ]);
    let mut session = scripted_session(60, provider);

    let contents: Vec<String> = {
        let mut out = Vec::new();
        for i in 0..4 {
            out.push(session.send_message(&format!("回答{}", i)).await.content);
        }
        out
    };
    assert_eq!(contents[0], "第一个问题");
    assert!(!contents[1].is_empty());
    assert!(!contents[2].trim().is_empty());
    assert_eq!(contents[3], "第四个问题");
    assert_eq!(session.question_count(), 4);
}

#[tokio::test]
async fn test_offline_replies_follow_phase_pools() {
    let mut session = offline_session(60, 8);
    assert_eq!(
        classify_job_title(&session.context().job_title),
        JobCategory::Engineering
    );

    // Every introduction template for the title, collected over many seeds
    let candidates: Vec<String> = (0..64)
        .map(|seed| {
            ResponseSimulator::reply(
                "后端工程师",
                InterviewPhase::Introduction,
                &mut StdRng::seed_from_u64(seed),
            )
        })
        .collect();

    let first = session.send_message("自我介绍").await;
    assert!(candidates.contains(&first.content));
    assert!(first.content.contains("后端工程师") || first.content.contains("技术"));
}

// ============================================================================
// Transcript bookkeeping
// ============================================================================

#[tokio::test]
async fn test_history_excludes_system_turn_and_is_stable() {
    let mut session = offline_session(30, 9);
    session.send_message("").await;
    session.send_message("第二个回答").await;

    let first = session.conversation_history();
    let second = session.conversation_history();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|t| t.role != TurnRole::System));
    assert_eq!(first[0].role, TurnRole::User);
    assert_eq!(first[0].content, "");
    assert_eq!(first[1].role, TurnRole::Assistant);
}

#[tokio::test]
async fn test_counter_and_phase_are_monotonic() {
    let mut session = offline_session(60, 10);
    let mut last_count = 0;
    let mut last_phase = session.current_phase();
    let mut last_state = session.terminal_state();

    for i in 0..25 {
        let result = session.send_message(&format!("回答{}", i)).await;
        assert!(session.question_count() >= last_count);
        assert!(session.current_phase() >= last_phase);
        assert!(session.terminal_state() >= last_state);
        if let Some(phase) = result.next_phase {
            assert_eq!(phase, session.current_phase());
        }
        last_count = session.question_count();
        last_phase = session.current_phase();
        last_state = session.terminal_state();
    }
    assert_eq!(session.terminal_state(), TerminalState::Announced);
}

#[tokio::test]
async fn test_suggestions_follow_phase() {
    let mut session = offline_session(60, 11);
    let intro = session.send_message("你好").await;
    assert_eq!(
        intro.suggestions.unwrap(),
        ResponseSimulator::suggestions(InterviewPhase::Introduction)
    );

    let technical = session.send_message("回答").await;
    assert_eq!(technical.next_phase, Some(InterviewPhase::Technical));
    assert_eq!(
        technical.suggestions.unwrap(),
        ResponseSimulator::suggestions(InterviewPhase::Technical)
    );
}
