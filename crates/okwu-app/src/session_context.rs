use std::sync::Arc;

use kanal::AsyncSender;
use okwu_core::MemoryHistory;
use okwu_types::AppEvent;

use crate::state::AppState;
use crate::ticker::TickScheduler;

/// Everything the event handlers need besides the card itself
pub struct SessionContext {
    pub state: Arc<AppState>,
    pub history: MemoryHistory,
    pub ticker: TickScheduler,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
}

impl SessionContext {
    pub fn new(
        state: Arc<AppState>,
        history: MemoryHistory,
        ticker: TickScheduler,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            state,
            history,
            ticker,
            app_to_ui_tx,
        }
    }

    /// Status line for the shell, dropped if the UI is gone
    pub async fn status(&self, message: impl Into<String>) {
        let _ = self
            .app_to_ui_tx
            .send(AppEvent::StatusUpdate(message.into()))
            .await;
    }
}
