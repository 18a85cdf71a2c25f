//! Interactive planning conversation

use crate::config::{get_api_key, Config};
use crate::error::CliError;
use siteplan_llm_sdk::client::LlmClient;
use siteplan_llm_sdk::gemini::GeminiClient;
use siteplan_workflow::export::BriefExporter;
use siteplan_workflow::storage::{FileSessionStore, SessionStore};
use siteplan_workflow::{
    LlmModelService, PlanDocument, PlannerError, PlannerOutcome, PlanningSession, Question,
    SessionError, SessionState,
};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const HELP_TEXT: &str = "\
Commands:
  quit  - save your progress and exit
  save  - save your progress and keep going
  plan  - build the plan now (needs the essentials answered)
  help  - show this message

Tips:
  - Be as specific as you can, examples help
  - It is fine to say you are not sure; I will suggest options
  - Mention any websites you like or dislike";

#[derive(Debug, Default, Clone)]
pub struct ChatOptions {
    pub output_dir: Option<PathBuf>,
    pub min_questions: Option<usize>,
    pub resume_from: Option<PathBuf>,
}

/// What a line of user input means in the chat
#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Empty,
    Quit,
    Save,
    Help,
    Plan,
    Answer(&'a str),
}

impl<'a> ChatInput<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => ChatInput::Empty,
            "quit" | "exit" => ChatInput::Quit,
            "save" => ChatInput::Save,
            "help" => ChatInput::Help,
            "plan" => ChatInput::Plan,
            _ => ChatInput::Answer(trimmed),
        }
    }
}

/// How a conversation loop ended
#[derive(Debug, PartialEq, Eq)]
pub enum ChatEnd {
    Finished(PlanDocument),
    Quit,
    EndOfInput,
    Interrupted,
}

pub(crate) fn build_client(config: &Config) -> Result<Arc<dyn LlmClient>, CliError> {
    let api_key = get_api_key(config)?;
    let mut client = GeminiClient::new(api_key)?.with_model(config.model.name.clone());
    if let Some(base_url) = &config.model.base_url {
        client = client.with_base_url(base_url.clone());
    }
    Ok(Arc::new(client))
}

pub async fn run_chat(config: &Config, options: ChatOptions) -> Result<(), CliError> {
    let client = build_client(config)?;
    let service = Arc::new(LlmModelService::new(client, config.model_settings()));

    let mut settings = config.planner_settings();
    if let Some(min_questions) = options.min_questions {
        settings.min_questions = min_questions;
    }

    let mut session = match &options.resume_from {
        Some(path) => {
            let snapshot = FileSessionStore::read_file(path).await?;
            tracing::info!(session_id = %snapshot.id, "Resuming session");
            PlanningSession::from_snapshot(snapshot, service, settings)
        }
        None => PlanningSession::new(service, settings),
    };

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.session.output_dir.clone());
    let store = FileSessionStore::new(&output_dir);
    let exporter = BriefExporter::new(&output_dir);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };
    converse(&mut session, stdin, &mut stdout, &store, &exporter, interrupt).await?;
    Ok(())
}

/// Drive one session from `input` until the plan is ready or the user
/// leaves. Progress is saved to `store` on quit, save, end of input and
/// `interrupt`, and before an error is returned.
pub async fn converse<R, W, I>(
    session: &mut PlanningSession,
    input: R,
    out: &mut W,
    store: &dyn SessionStore,
    exporter: &BriefExporter,
    interrupt: I,
) -> Result<ChatEnd, CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Future<Output = ()>,
{
    let result = chat_loop(session, input, out, store, exporter, interrupt).await;
    if let Err(e) = &result {
        match store.save(&session.snapshot()).await {
            Ok(location) => {
                tracing::info!(error = %e, %location, "Saved progress before exiting on error")
            }
            Err(save_error) => {
                tracing::error!(error = %save_error, "Could not save progress")
            }
        }
    }
    result
}

async fn chat_loop<R, W, I>(
    session: &mut PlanningSession,
    input: R,
    out: &mut W,
    store: &dyn SessionStore,
    exporter: &BriefExporter,
    interrupt: I,
) -> Result<ChatEnd, CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Future<Output = ()>,
{
    if session.state() == SessionState::Complete {
        let plan = session.request_plan()?;
        writeln!(out, "This session is already complete.\n")?;
        return finish(session, plan, out, store, exporter).await;
    }

    writeln!(out, "Welcome! Let's plan your website together.")?;
    writeln!(out, "Type 'help' at any time for commands.\n")?;

    let mut question = session.start();
    print_question(out, &question)?;

    tokio::pin!(interrupt);
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = tokio::select! {
            biased;
            _ = &mut interrupt => {
                writeln!(out)?;
                save(session, out, store).await?;
                writeln!(out, "Interrupted. Resume any time with 'siteplan resume --state <file>'.")?;
                return Ok(ChatEnd::Interrupted);
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            save(session, out, store).await?;
            return Ok(ChatEnd::EndOfInput);
        };

        match ChatInput::parse(&line) {
            ChatInput::Empty => {
                writeln!(out, "Please type an answer, or 'help' for options.")?;
            }
            ChatInput::Quit => {
                save(session, out, store).await?;
                writeln!(out, "Goodbye! Resume any time with 'siteplan resume --state <file>'.")?;
                return Ok(ChatEnd::Quit);
            }
            ChatInput::Save => {
                save(session, out, store).await?;
                print_question(out, &question)?;
            }
            ChatInput::Help => {
                writeln!(out, "{HELP_TEXT}\n")?;
                print_question(out, &question)?;
            }
            ChatInput::Plan => match session.request_plan() {
                Ok(plan) => return finish(session, plan, out, store, exporter).await,
                Err(PlannerError::Session(SessionError::Incomplete { missing })) => {
                    let labels: Vec<&str> = missing.iter().map(|c| c.label()).collect();
                    writeln!(
                        out,
                        "Not quite yet. I still need to know about: {}\n",
                        labels.join(", ")
                    )?;
                    print_question(out, &question)?;
                }
                Err(e) => return Err(e.into()),
            },
            ChatInput::Answer(answer) => match session.respond(answer).await {
                Ok(PlannerOutcome::Question(next)) => {
                    question = next;
                    print_question(out, &question)?;
                }
                Ok(PlannerOutcome::PlanReady(plan)) => {
                    return finish(session, plan, out, store, exporter).await;
                }
                Err(PlannerError::Session(SessionError::EmptyAnswer)) => {
                    writeln!(out, "Please type an answer, or 'help' for options.")?;
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
}

fn print_question<W: Write>(out: &mut W, question: &Question) -> std::io::Result<()> {
    writeln!(out, "{}", question.text)
}

async fn save<W: Write>(
    session: &PlanningSession,
    out: &mut W,
    store: &dyn SessionStore,
) -> Result<(), CliError> {
    let location = store.save(&session.snapshot()).await?;
    writeln!(out, "Progress saved to {location}")?;
    Ok(())
}

async fn finish<W: Write>(
    session: &PlanningSession,
    plan: PlanDocument,
    out: &mut W,
    store: &dyn SessionStore,
    exporter: &BriefExporter,
) -> Result<ChatEnd, CliError> {
    writeln!(out, "\nHere is your website plan:\n")?;
    writeln!(out, "{plan}")?;

    let exported = exporter.export(&plan).await?;
    writeln!(out, "Brief saved to {}", exported.markdown.display())?;
    writeln!(out, "HTML version saved to {}", exported.html.display())?;
    save(session, out, store).await?;

    Ok(ChatEnd::Finished(plan))
}
