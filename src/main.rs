//! Mock Interview - terminal driver
//!
//! Reads candidate answers from stdin, prints interviewer turns, and prints
//! the scorecard as JSON when the interview ends.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use mock_interview::services::interview::{format_duration, format_score};
use mock_interview::{
    CompletionClient, ConfigService, InterviewCategory, InterviewSession, InterviewerTone,
    SessionContext,
};

#[derive(Parser)]
#[command(name = "mock-interview")]
#[command(about = "Run a mock job interview in the terminal", long_about = None)]
struct Cli {
    /// Position being interviewed for
    #[arg(long)]
    job_title: String,

    /// Job description text
    #[arg(long, default_value = "")]
    job_description: String,

    /// Plain-text resume file
    #[arg(long)]
    resume: Option<PathBuf>,

    /// strict, friendly or open
    #[arg(long, default_value = "friendly")]
    tone: InterviewerTone,

    /// technical, behavioral or comprehensive
    #[arg(long, default_value = "technical")]
    category: InterviewCategory,

    /// Target length in minutes
    #[arg(long, default_value_t = 30)]
    duration: u32,

    #[arg(long)]
    company: Option<String>,

    /// Config file (defaults to ~/.mock-interview/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never call the remote model
    #[arg(long)]
    offline: bool,

    /// Seed for reproducible template selection
    #[arg(long)]
    seed: Option<u64>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

/// What the candidate typed after the end was announced
#[derive(Debug, PartialEq, Eq)]
enum EndChoice {
    Confirm,
    /// Anything else is the next answer
    Answer(String),
}

impl EndChoice {
    fn from_line(line: String) -> Self {
        if line.trim().eq_ignore_ascii_case("y") {
            Self::Confirm
        } else {
            Self::Answer(line)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = ConfigService::load(cli.config.as_deref()).context("failed to load config")?;
    let mut config = service.effective_config();
    config.offline |= cli.offline;

    let resume_text = match &cli.resume {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read resume {}", path.display()))?,
        None => String::new(),
    };

    let context = SessionContext {
        job_title: cli.job_title,
        job_description: cli.job_description,
        resume_text,
        tone: cli.tone,
        company_name: cli.company,
        category: cli.category,
        duration_minutes: cli.duration,
    };

    let client = CompletionClient::from_config(&config)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = InterviewSession::with_rng(context, client, rng)?;

    println!(
        "模拟面试：{}（{}，{}）",
        session.context().job_title,
        session.context().category,
        format_duration(session.context().duration_minutes)
    );
    println!("请先做个简单的自我介绍。输入空行也会作为一次回答，Ctrl-D 结束。\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<String> = None;
    loop {
        let answer = match pending.take() {
            Some(answer) => answer,
            None => match lines.next_line().await? {
                Some(line) => line,
                None => break,
            },
        };

        let result = session.send_message(answer.trim()).await;
        println!("\n面试官：{}\n", result.content);

        if result.should_show_end_button {
            println!("面试官已宣布结束。输入 y 确认结束面试，输入其他内容将作为你的回答继续：");
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match EndChoice::from_line(line) {
                EndChoice::Confirm => {
                    session.complete_interview();
                    break;
                }
                EndChoice::Answer(answer) => {
                    pending = Some(answer);
                    continue;
                }
            }
        }

        if let Some(suggestions) = &result.suggestions {
            println!("提示：{}\n", suggestions.join(" / "));
        }
        if result.is_complete {
            break;
        }
    }

    session.complete_interview();
    let card = session.generate_feedback().await;
    println!(
        "综合评分：{}（{}）",
        format_score(card.overall_score),
        card.level().label()
    );
    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_choice_confirm() {
        assert_eq!(EndChoice::from_line("y".to_string()), EndChoice::Confirm);
        assert_eq!(EndChoice::from_line(" Y ".to_string()), EndChoice::Confirm);
    }

    #[test]
    fn test_end_choice_keeps_answer() {
        assert_eq!(
            EndChoice::from_line("我还想补充一个项目".to_string()),
            EndChoice::Answer("我还想补充一个项目".to_string())
        );
        assert_eq!(
            EndChoice::from_line(String::new()),
            EndChoice::Answer(String::new())
        );
    }
}
