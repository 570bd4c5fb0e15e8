use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;

use bootstrap::AppContext;
use commands::settings::{FontSizeArg, ThemeArg};

#[derive(Parser)]
#[command(name = "plantcare")]
#[command(about = "PlantCare AI - chat with a plant-care assistant and analyze plant photos", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml and PLANTCARE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for config, settings and chat history (overrides PLANTCARE_HOME)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a chat message and print the reply
    Chat {
        message: String,
    },
    /// Send a plant photo into the chat for analysis
    SendImage {
        path: PathBuf,
        /// What you have noticed or done with the plant
        #[arg(long)]
        caption: Option<String>,
    },
    /// Analyze a photo and print the full report without touching the chat
    Analyze {
        path: PathBuf,
        /// Care actions taken so far
        #[arg(long)]
        notes: Option<String>,
    },
    /// Print the chat transcript
    History,
    /// Reset the chat to the greeting
    Clear,
    /// Query the backend health endpoint
    Health,
    /// Query the backend capabilities endpoint
    Capabilities,
    /// Show or change display settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,
    /// Set the color theme
    SetTheme { theme: ThemeArg },
    /// Set the font size preset
    SetFontSize { size: FontSizeArg },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plantcare=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = AppContext::load(cli.api_url, cli.data_dir)?;

    match cli.command {
        Commands::Chat { message } => commands::chat::send_text(&ctx, &message).await?,
        Commands::SendImage { path, caption } => {
            commands::chat::send_image(&ctx, &path, caption.as_deref()).await?
        }
        Commands::Analyze { path, notes } => {
            commands::analyze::run(&ctx, &path, notes.as_deref()).await?
        }
        Commands::History => commands::chat::history(&ctx).await?,
        Commands::Clear => commands::chat::clear(&ctx).await?,
        Commands::Health => commands::analyze::health(&ctx).await?,
        Commands::Capabilities => commands::analyze::capabilities(&ctx).await?,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&ctx),
            SettingsAction::SetTheme { theme } => commands::settings::set_theme(&ctx, theme)?,
            SettingsAction::SetFontSize { size } => {
                commands::settings::set_font_size(&ctx, size)?
            }
        },
    }

    Ok(())
}
