//! pincer CLI — the main entry point.
//!
//! Commands:
//! - `prompt`    — Print the cached static system prompt
//! - `messages`  — Print the composed message list for one turn
//! - `skills`    — List or show skills
//! - `memory`    — Show memory or append a daily note

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "pincer",
    about = "pincer — inspect the agent's prompt context",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Override the workspace directory
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the static system prompt
    Prompt,

    /// Print the message list that would be sent for MESSAGE, as JSON
    Messages {
        /// The user message for this turn
        message: String,

        /// Conversation summary to include in the system message
        #[arg(short, long, default_value = "")]
        summary: String,

        /// Channel name for the session block
        #[arg(long, default_value = "")]
        channel: String,

        /// Chat ID for the session block
        #[arg(long, default_value = "")]
        chat_id: String,
    },

    /// Inspect skills
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Inspect and update memory
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
}

#[derive(Subcommand)]
enum SkillsAction {
    /// List valid skills across all tiers
    List,
    /// Print a skill's body
    Show { name: String },
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Print long-term memory and recent daily notes
    Show {
        /// How many days of notes to include
        #[arg(short, long, default_value_t = 3)]
        days: u32,
    },
    /// Append a line to today's daily note
    Note { text: String },
}

/// Log level used when `RUST_LOG` is unset.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = default_log_level(cli.verbose);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    let config = commands::load_config(cli.workspace)?;

    match cli.command {
        Commands::Prompt => commands::prompt::run(&config)?,
        Commands::Messages {
            message,
            summary,
            channel,
            chat_id,
        } => commands::messages::run(&config, &message, &summary, &channel, &chat_id)?,
        Commands::Skills { action } => match action {
            SkillsAction::List => commands::skills::list(&config)?,
            SkillsAction::Show { name } => commands::skills::show(&config, &name)?,
        },
        Commands::Memory { action } => match action {
            MemoryAction::Show { days } => commands::memory::show(&config, days)?,
            MemoryAction::Note { text } => commands::memory::note(&config, &text)?,
        },
    }

    Ok(())
}
