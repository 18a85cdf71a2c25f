use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{check_api_key, render_state, run_chat, ChatOptions};
use crate::config::resolve_config;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "siteplan")]
#[command(about = "Plan a website through a short conversation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a new planning conversation
    Chat {
        /// Directory for saved state and exported briefs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Questions to ask before the plan may be finalized
        #[arg(short, long)]
        min_questions: Option<usize>,
    },

    /// Continue a conversation from a saved state file
    Resume {
        /// Path to a conversation_state_*.json file
        #[arg(short, long)]
        state: PathBuf,

        /// Directory for saved state and exported briefs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the plan stored in a saved state file
    Render {
        /// Path to a conversation_state_*.json file
        #[arg(short, long)]
        state: PathBuf,

        /// Render as Markdown instead of plain text
        #[arg(long)]
        markdown: bool,
    },

    /// Check that the configured API key works
    Check,

    /// Show version information
    Version,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.command {
            Some(Commands::Chat {
                output_dir,
                min_questions,
            }) => {
                self.handle_chat(ChatOptions {
                    output_dir: output_dir.clone(),
                    min_questions: *min_questions,
                    resume_from: None,
                })
                .await
            }
            Some(Commands::Resume { state, output_dir }) => {
                self.handle_chat(ChatOptions {
                    output_dir: output_dir.clone(),
                    min_questions: None,
                    resume_from: Some(state.clone()),
                })
                .await
            }
            Some(Commands::Render { state, markdown }) => render_state(state, *markdown).await,
            Some(Commands::Check) => {
                let config = resolve_config(self.config.as_deref())?;
                check_api_key(&config).await
            }
            Some(Commands::Version) => self.handle_version().await,
            None => self.handle_chat(ChatOptions::default()).await,
        }
    }

    async fn handle_chat(&self, options: ChatOptions) -> Result<(), CliError> {
        let config = resolve_config(self.config.as_deref())?;
        run_chat(&config, options).await
    }

    async fn handle_version(&self) -> Result<(), CliError> {
        println!("siteplan version: {}", env!("CARGO_PKG_VERSION"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::parse_from(["siteplan", "--verbose"]);
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_render_arguments() {
        let cli = Cli::parse_from([
            "siteplan",
            "render",
            "--state",
            "conversation_state_20240101_120000.json",
            "--markdown",
        ]);
        match cli.command {
            Some(Commands::Render { state, markdown }) => {
                assert_eq!(state, PathBuf::from("conversation_state_20240101_120000.json"));
                assert!(markdown);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_chat_overrides() {
        let cli = Cli::parse_from(["siteplan", "chat", "-o", "briefs", "--min-questions", "5"]);
        match cli.command {
            Some(Commands::Chat {
                output_dir,
                min_questions,
            }) => {
                assert_eq!(output_dir, Some(PathBuf::from("briefs")));
                assert_eq!(min_questions, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
