//! Shared test doubles: a scripted in-process provider and a one-shot HTTP
//! endpoint speaking the chat-completions format.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use mock_interview::services::interview::CompletionClient;
use mock_interview::{InterviewCategory, InterviewSession, InterviewerTone, SessionContext};
use mock_interview_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
    StopReason, UsageStats,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Session helpers
// ============================================================================

pub fn context(duration_minutes: u32) -> SessionContext {
    SessionContext {
        job_title: "后端工程师".to_string(),
        job_description: "负责交易系统的设计、开发与性能优化".to_string(),
        resume_text: "五年 Java / Spring 开发经验\n主导支付网关重构项目，延迟降低 40%".to_string(),
        tone: InterviewerTone::Strict,
        company_name: Some("示例科技".to_string()),
        category: InterviewCategory::Technical,
        duration_minutes,
    }
}

pub fn offline_session(duration_minutes: u32, seed: u64) -> InterviewSession {
    InterviewSession::with_rng(
        context(duration_minutes),
        CompletionClient::offline(),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

pub fn scripted_session(
    duration_minutes: u32,
    provider: Arc<ScriptedProvider>,
) -> InterviewSession {
    let client = CompletionClient::new(provider, Duration::from_secs(2));
    InterviewSession::with_rng(context(duration_minutes), client, StdRng::seed_from_u64(1))
        .unwrap()
}

// ============================================================================
// Scripted provider
// ============================================================================

/// One recorded `send_message` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub options: LlmRequestOptions,
}

/// Replays queued results in order; an empty queue answers with a 503.
pub struct ScriptedProvider {
    config: ProviderConfig,
    script: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replies(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn failing() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            system,
            messages,
            options: request_options,
        });
        let next = self.script.lock().unwrap().pop_front();
        let content = next.unwrap_or_else(|| {
            Err(LlmError::ServerError {
                message: "script exhausted".to_string(),
                status: Some(503),
            })
        })?;
        Ok(LlmResponse {
            content: Some(content),
            stop_reason: StopReason::EndTurn,
            usage: UsageStats::default(),
            model: "scripted-model".to_string(),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// ============================================================================
// HTTP stub
// ============================================================================

/// Serve one canned response per queued entry, recording request bodies.
/// Returns the chat-completions URL and the shared body log.
pub async fn spawn_stub_endpoint(
    responses: Vec<(u16, String)>,
) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let log = bodies.clone();

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let request_body = read_request_body(&mut stream).await;
            log.lock().unwrap().push(request_body);

            let response = format!(
                "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}/v1/chat/completions", addr), bodies)
}

async fn read_request_body(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = find_subsequence(&buf, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let body_start = header_end + 4;
        if buf.len() >= body_start + content_length {
            return String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                .to_string();
        }
    }
    String::new()
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn chat_completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-stub",
        "model": "glm-4-flash",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8}
    })
    .to_string()
}
