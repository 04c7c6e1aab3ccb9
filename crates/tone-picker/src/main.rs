use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tone_picker_config::AppConfig;
use tone_picker_core::setup::{command_transform, history_config};
use tone_picker_core::{CommandTransform, EditorSession, HistoryStore, SlotStore, Tone, ToneTransform};
use tone_picker_mod_history::config::resolve_data_dir;

mod repl;

/// Rewrite text in a chosen tone, with undo/redo.
#[derive(Parser, Debug)]
#[command(name = "tone-picker", version, about)]
struct Cli {
    /// Config file to use instead of `tone-picker.json` next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the history database.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Restore the history left by the previous session.
    #[arg(long)]
    resume: bool,

    /// Text to start with.
    #[arg(long)]
    initial: Option<String>,

    /// Keep history in memory only.
    #[arg(long = "in-memory")]
    in_memory: bool,
}

/// The transform program from the config, or an error explaining how to set one.
struct ConfiguredTransform {
    command: Option<CommandTransform>,
    config_path: PathBuf,
}

impl ToneTransform for ConfiguredTransform {
    fn transform(&self, text: &str, tone: &Tone) -> Result<String> {
        match &self.command {
            Some(command) => command.transform(text, tone),
            None => bail!(
                "No text-transform service configured. Set \"transform_command\" in {}",
                self.config_path.display()
            ),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting tone-picker");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let mut app = AppConfig::load_or_create(&config_path);
    if cli.resume {
        app.resume_history = true;
    }
    if let Some(initial) = cli.initial {
        app.initial_text = initial;
    }

    let data_dir = cli.data_dir.unwrap_or_else(resolve_data_dir);
    let slots = if cli.in_memory {
        None
    } else {
        match SlotStore::open(&data_dir) {
            Ok(slots) => Some(slots),
            Err(e) => {
                tracing::warn!("History will not be persisted: {e:#}");
                None
            }
        }
    };

    let store = HistoryStore::initialize(
        app.initial_text.clone(),
        history_config(&app, data_dir),
        slots,
    );
    let transform = ConfiguredTransform {
        command: command_transform(&app),
        config_path,
    };
    let mut session = EditorSession::new(store, transform);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(&mut session, stdin.lock(), stdout.lock())?;

    tracing::info!("Exiting tone-picker");
    Ok(())
}
