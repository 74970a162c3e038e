//! Conversation Orchestrator
//!
//! `InterviewSession` owns one interview: its context, the transcript, the
//! phase clock and the announce/confirm end protocol. One session per
//! interview; `&mut self` on every mutating call keeps turns strictly
//! sequential.

use mock_interview_core::{SessionContext, Turn, TurnRole};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

use super::feedback::FeedbackGenerator;
use super::phase::{
    phase_for_turns, question_budget, should_announce_end, should_finalize, InterviewPhase,
    TerminalState,
};
use super::prompts::build_system_prompt;
use super::remote::{turns_to_messages, CompletionClient, CompletionOutcome};
use super::scorecard::Scorecard;
use super::simulator::ResponseSimulator;

/// Shown when an internal error interrupts a turn
pub const APOLOGY_REPLY: &str =
    "抱歉，我遇到了一些技术问题。请稍后再试，或者我们可以继续其他问题。";

/// Returned for input that arrives after the interview was confirmed over
pub const FINISHED_REPLY: &str = "本次面试已经结束，感谢你的参与。";

/// What the caller receives for each candidate message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    /// Interviewer reply shown to the candidate
    pub content: String,
    /// True only after `complete_interview`
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_phase: Option<InterviewPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Set on the turn that announces the end
    #[serde(default)]
    pub should_show_end_button: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TurnResult {
    fn apology(error: &AppError) -> Self {
        Self {
            content: APOLOGY_REPLY.to_string(),
            is_complete: false,
            next_phase: None,
            suggestions: None,
            should_show_end_button: false,
            error: Some(error.to_string()),
        }
    }
}

/// A single mock interview
#[derive(Debug)]
pub struct InterviewSession {
    id: String,
    context: SessionContext,
    client: CompletionClient,
    rng: StdRng,
    system_prompt: String,
    /// Full transcript, system turn first
    turns: Vec<Turn>,
    phase: InterviewPhase,
    turns_answered: u32,
    state: TerminalState,
}

impl InterviewSession {
    /// Start a session with an entropy-seeded RNG
    pub fn new(context: SessionContext, client: CompletionClient) -> AppResult<Self> {
        Self::with_rng(context, client, StdRng::from_entropy())
    }

    /// Start a session with an explicit RNG, e.g. a seeded one in tests
    pub fn with_rng(
        context: SessionContext,
        client: CompletionClient,
        rng: StdRng,
    ) -> AppResult<Self> {
        context.validate()?;
        let system_prompt = build_system_prompt(&context);
        let session = Self {
            id: Uuid::new_v4().to_string(),
            turns: vec![Turn::system(system_prompt.clone())],
            system_prompt,
            context,
            client,
            rng,
            phase: InterviewPhase::Introduction,
            turns_answered: 0,
            state: TerminalState::Running,
        };
        info!(
            session_id = %session.id,
            job_title = %session.context.job_title,
            category = %session.context.category,
            budget = question_budget(session.context.duration_minutes),
            online = session.client.is_online(),
            "interview session started"
        );
        Ok(session)
    }

    /// Discard the current interview and start over with `context`.
    /// On error the current session is left untouched.
    pub fn set_session_context(&mut self, context: SessionContext) -> AppResult<()> {
        context.validate()?;
        self.system_prompt = build_system_prompt(&context);
        self.turns = vec![Turn::system(self.system_prompt.clone())];
        self.context = context;
        self.id = Uuid::new_v4().to_string();
        self.phase = InterviewPhase::Introduction;
        self.turns_answered = 0;
        self.state = TerminalState::Running;
        info!(session_id = %self.id, "interview session restarted");
        Ok(())
    }

    /// Record a candidate answer and produce the interviewer's next turn.
    /// Never fails; internal errors become an apology result.
    pub async fn send_message(&mut self, text: &str) -> TurnResult {
        if should_finalize(self.state) {
            debug!(session_id = %self.id, "message after completion ignored");
            return TurnResult {
                content: FINISHED_REPLY.to_string(),
                is_complete: true,
                next_phase: Some(self.phase),
                suggestions: None,
                should_show_end_button: false,
                error: None,
            };
        }

        match self.advance(text).await {
            Ok(result) => result,
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "turn failed");
                TurnResult::apology(&err)
            }
        }
    }

    async fn advance(&mut self, text: &str) -> AppResult<TurnResult> {
        let asked = self.turns_answered;
        self.turns.push(Turn::user(text));

        // Budget spent: the closing statement replaces the next question.
        // Counting before the increment lets all M questions be asked, so with
        // D=15 the 7th message is the one that shows the end button.
        if should_announce_end(asked, self.context.duration_minutes, self.state) {
            let closing = ResponseSimulator::closing_statement(&mut self.rng);
            self.turns.push(Turn::assistant(closing.clone()));
            self.turns_answered += 1;
            self.transition(TerminalState::Announced)?;
            self.phase = InterviewPhase::Closing;
            info!(session_id = %self.id, turn = self.turns_answered, "interview end announced");
            return Ok(TurnResult {
                content: closing,
                is_complete: false,
                next_phase: Some(InterviewPhase::Closing),
                suggestions: None,
                should_show_end_button: true,
                error: None,
            });
        }

        let reply = self.interviewer_reply(asked).await;
        self.turns.push(Turn::assistant(reply.clone()));
        self.turns_answered += 1;
        self.phase = self.phase.max(phase_for_turns(self.turns_answered));

        debug!(
            session_id = %self.id,
            turn = self.turns_answered,
            phase = %self.phase,
            "turn recorded"
        );

        Ok(TurnResult {
            content: reply,
            is_complete: should_finalize(self.state),
            next_phase: Some(self.phase),
            suggestions: Some(ResponseSimulator::suggestions(self.phase)),
            should_show_end_button: false,
            error: None,
        })
    }

    async fn interviewer_reply(&mut self, asked: u32) -> String {
        let messages = turns_to_messages(&self.turns);
        let outcome = self
            .client
            .complete(
                Some(&self.system_prompt),
                messages,
                self.client.conversation_profile(),
            )
            .await;

        match outcome {
            CompletionOutcome::Reply(text) => text,
            CompletionOutcome::Fallback(reason) => {
                debug!(session_id = %self.id, reason = %reason, "using simulator reply");
                ResponseSimulator::reply(&self.context.job_title, phase_for_turns(asked), &mut self.rng)
            }
        }
    }

    fn transition(&mut self, next: TerminalState) -> AppResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(AppError::internal(format!(
                "illegal session transition {} -> {}",
                self.state.as_str(),
                next.as_str()
            )));
        }
        self.state = next;
        Ok(())
    }

    /// Confirm the end of the interview. Idempotent.
    pub fn complete_interview(&mut self) {
        if self.state != TerminalState::Completed {
            info!(session_id = %self.id, turns = self.turns_answered, "interview completed");
        }
        self.state = TerminalState::Completed;
    }

    /// Score the transcript as it stands. Calling this before completion
    /// scores a partial interview.
    pub async fn generate_feedback(&mut self) -> Scorecard {
        let generator = FeedbackGenerator::new(&self.client);
        let card = generator.generate(&self.turns, &mut self.rng).await;
        info!(
            session_id = %self.id,
            overall = card.overall_score,
            level = card.level().label(),
            "feedback generated"
        );
        card
    }

    /// Transcript without the system turn
    pub fn conversation_history(&self) -> Vec<Turn> {
        self.turns
            .iter()
            .filter(|turn| turn.role != TurnRole::System)
            .cloned()
            .collect()
    }

    pub fn current_phase(&self) -> InterviewPhase {
        self.phase
    }

    /// Interviewer turns emitted so far
    pub fn question_count(&self) -> u32 {
        self.turns_answered
    }

    pub fn terminal_state(&self) -> TerminalState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn session_id(&self) -> &str {
        &self.id
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
