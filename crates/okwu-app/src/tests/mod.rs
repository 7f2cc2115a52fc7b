mod command_tests;
mod profile_tests;
mod render_tests;

use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use okwu_config::Config;
use okwu_core::{
    AudioCueSequencer, CardOptions, Catalog, FlashCard, MemoryHistory, SilentBackend, WordSession,
};
use okwu_types::{AppEvent, Category, WordRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use crate::profile::ProfileStore;
use crate::session_context::SessionContext;
use crate::state::AppState;
use crate::ticker::TickScheduler;

pub(crate) type TestCard = FlashCard<StdRng, SilentBackend>;

pub(crate) fn word(english: &str, igbo: &str, category: Category) -> WordRecord {
    WordRecord {
        english: english.to_string(),
        igbo: igbo.to_string(),
        category,
        examples: None,
    }
}

pub(crate) fn test_card(words: Vec<WordRecord>, tick: Duration) -> TestCard {
    let catalog = Arc::new(Catalog::new(words).unwrap());
    let session = WordSession::with_rng(catalog, StdRng::seed_from_u64(7));
    // clips never exist here, so playback is skipped quietly
    let audio = AudioCueSequencer::new(SilentBackend::default(), "no-such-audio-root");
    FlashCard::new(
        session,
        audio,
        CardOptions {
            countdown_start: 3,
            tick_interval: tick,
            audio_enabled: true,
        },
    )
}

pub(crate) fn house_and_run() -> Vec<WordRecord> {
    vec![
        word("house", "ụlọ", Category::Noun),
        word("run", "gba ọsọ", Category::Verb),
    ]
}

pub(crate) struct Harness {
    pub ctx: SessionContext,
    pub ui_rx: AsyncReceiver<AppEvent>,
    pub events_rx: AsyncReceiver<AppEvent>,
    pub events_tx: AsyncSender<AppEvent>,
    pub cancel: CancellationToken,
    pub _dir: tempfile::TempDir,
}

pub(crate) fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let profiles = ProfileStore::new(dir.path());
    let state = Arc::new(AppState::new(Config::default(), profiles, "main"));

    let (events_tx, events_rx) = kanal::unbounded_async();
    let (ui_tx, ui_rx) = kanal::unbounded_async();
    let cancel = CancellationToken::new();
    let ticker = TickScheduler::new(events_tx.clone(), cancel.child_token());

    Harness {
        ctx: SessionContext::new(state, MemoryHistory::default(), ticker, ui_tx),
        ui_rx,
        events_rx,
        events_tx,
        cancel,
        _dir: dir,
    }
}
