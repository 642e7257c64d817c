//! kabeuchi CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive chat or single-message mode
//! - `settings` — Show or change the API key and model
//! - `prompt`   — Show, override, or reset a mode's system prompt
//! - `calendar` — List, add, or remove planner events

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "kabeuchi",
    about = "kabeuchi — mode-driven interview assistant",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Start in this mode (normal, wall, rephrase, pre_interview, feedback)
        #[arg(short = 'M', long)]
        mode: Option<String>,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Show, override, or reset a mode's system prompt
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Manage planner events
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show the current settings (the key is never printed)
    Show,
    /// Store the API key
    SetKey { api_key: String },
    /// Store the model choice
    SetModel { model: String },
}

#[derive(Subcommand)]
enum PromptCommands {
    /// Show the effective prompt for a mode
    Show { mode: String },
    /// Override a mode's system prompt
    Set { mode: String, prompt: String },
    /// Drop the override, falling back to the built-in default
    Reset { mode: String },
}

#[derive(Subcommand)]
enum CalendarCommands {
    /// List events grouped by date
    List,
    /// Add an event
    Add {
        /// YYYY-MM-DD
        date: String,
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Mark the event as confirmed instead of draft
        #[arg(long)]
        confirmed: bool,
    },
    /// Remove an event by id
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message, mode } => commands::chat::run(message, mode).await?,
        Commands::Settings { command } => match command {
            SettingsCommands::Show => commands::settings_cmd::show()?,
            SettingsCommands::SetKey { api_key } => commands::settings_cmd::set_key(&api_key)?,
            SettingsCommands::SetModel { model } => commands::settings_cmd::set_model(&model)?,
        },
        Commands::Prompt { command } => match command {
            PromptCommands::Show { mode } => commands::prompt::show(&mode)?,
            PromptCommands::Set { mode, prompt } => commands::prompt::set(&mode, &prompt)?,
            PromptCommands::Reset { mode } => commands::prompt::reset(&mode)?,
        },
        Commands::Calendar { command } => match command {
            CalendarCommands::List => commands::calendar_cmd::list().await?,
            CalendarCommands::Add {
                date,
                title,
                description,
                confirmed,
            } => commands::calendar_cmd::add(&date, &title, &description, confirmed).await?,
            CalendarCommands::Remove { id } => commands::calendar_cmd::remove(&id).await?,
        },
    }

    Ok(())
}
