use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use okwu_config::Config;
use okwu_core::{
    AudioBackend, AudioCueSequencer, CardOptions, Catalog, FlashCard, NavState, RodioBackend,
    SilentBackend, WordSession,
};
use okwu_types::CategoryFilter;
use rodio::OutputStream;
use tracing_subscriber::EnvFilter;

use crate::controller::AppController;
use crate::profile::ProfileStore;
use crate::state::AppState;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod session_context;
pub mod state;
pub mod ticker;
pub mod ui;

#[cfg(test)]
mod tests;

/// Igbo vocabulary flashcards
#[derive(Debug, Parser)]
#[command(name = "okwu", version, about)]
struct Cli {
    /// Profile to load settings from and save preferences to
    #[arg(short, long, default_value = "main")]
    profile: String,

    /// Word catalog JSON, overrides the profile and the built-in list
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Start in this category (`all` or a part of speech)
    #[arg(short, long)]
    category: Option<String>,

    /// Start on this word
    #[arg(short, long)]
    word: Option<String>,

    /// Open a shared link or query instead of --category/--word
    #[arg(long, conflicts_with_all = ["category", "word"])]
    link: Option<String>,

    /// Disable audio for this run without touching the profile
    #[arg(long)]
    mute: bool,
}

impl Cli {
    fn initial_location(&self) -> NavState {
        if let Some(link) = &self.link {
            return NavState::parse_query(link);
        }

        let category = self.category.as_deref().map(|raw| {
            raw.parse::<CategoryFilter>().unwrap_or_else(|_| {
                tracing::warn!("Unknown category '{}', showing all", raw);
                CategoryFilter::All
            })
        });
        NavState::new(category, self.word.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();

    let profiles = ProfileStore::default_location()?;
    profiles.init()?;
    if !profiles.exists(&cli.profile) {
        profiles.add_profile_from_default(&cli.profile)?;
    }
    let mut config = profiles.load(&cli.profile)?;
    if cli.mute {
        config.audio.enabled = false;
    }

    let catalog = Arc::new(load_catalog(&cli, &config)?);

    // the output stream has to stay alive for as long as clips can play
    let (_output, backend) = audio_backend(&config);
    let audio = AudioCueSequencer::new(backend, config.audio.asset_root.clone());
    let options = CardOptions {
        countdown_start: config.session.countdown_start,
        tick_interval: Duration::from_millis(config.session.tick_ms),
        audio_enabled: config.audio.enabled,
    };
    let card = FlashCard::new(WordSession::new(catalog), audio, options);

    let capacity = config.event_capacity;
    let state = Arc::new(AppState::new(config, profiles, cli.profile.clone()));
    let controller = AppController::new(state, capacity);

    let mut tasks = controller.spawn_tasks(card, cli.initial_location());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Session ended"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("Task failed during shutdown: {e:#}");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("okwu=info,okwu_core=info"));

    let json = std::env::var("OKWU_LOG_JSON").is_ok_and(|v| v != "0");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

fn load_catalog(cli: &Cli, config: &Config) -> anyhow::Result<Catalog> {
    let path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog.path.as_ref().map(PathBuf::from));

    match path {
        Some(path) => Ok(Catalog::load_from_file(&path)?),
        None => Ok(Catalog::load_embedded()?),
    }
}

fn audio_backend(config: &Config) -> (Option<OutputStream>, Box<dyn AudioBackend>) {
    if !config.audio.output_device {
        tracing::info!("Audio output disabled, clips are decoded but not played");
        return (None, Box::new(SilentBackend::default()));
    }

    match RodioBackend::try_default() {
        Ok((stream, backend)) => (Some(stream), Box::new(backend)),
        Err(e) => {
            tracing::warn!("{}, clips are decoded but not played", e);
            (None, Box::new(SilentBackend::default()))
        }
    }
}
