use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use okwu_core::{AudioBackend, FlashCard, NavState};
use okwu_types::AppEvent;
use rand::Rng;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            // ticks and user input
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity.max(1)),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<R, B>(
        &self,
        card: FlashCard<R, B>,
        initial: NavState,
    ) -> JoinSet<anyhow::Result<()>>
    where
        R: Rng + Send + 'static,
        B: AudioBackend + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            card,
            initial,
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        // Stdin commands
        tasks.spawn(watcher_io(
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Tell both loops to stop, then cancel whatever is still waiting
    pub fn shutdown(&self) {
        for tx in [&self.channels.ui_to_app.0, &self.channels.app_to_ui.0] {
            // Ok(false) means the queue is full
            if !matches!(tx.try_send(AppEvent::Shutdown), Ok(true)) {
                tracing::debug!("Shutdown not queued, closing channel");
                let _ = tx.close();
            }
        }
        self.cancel_token.cancel();
    }
}
