use std::time::Duration;

use kanal::AsyncSender;
use okwu_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Delivers countdown ticks back into the event loop.
///
/// At most one tick is pending; scheduling a new one cancels the previous
/// timer task instead of letting it fire.
pub struct TickScheduler {
    event_tx: AsyncSender<AppEvent>,
    parent: CancellationToken,
    pending: Option<CancellationToken>,
}

impl TickScheduler {
    pub fn new(event_tx: AsyncSender<AppEvent>, parent: CancellationToken) -> Self {
        Self {
            event_tx,
            parent,
            pending: None,
        }
    }

    pub fn schedule(&mut self, epoch: u64, after: Duration) {
        self.cancel();

        let token = self.parent.child_token();
        let cancelled = token.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::trace!("Tick {} cancelled", epoch);
                }
                _ = tokio::time::sleep(after) => {
                    if let Err(e) = tx.send(AppEvent::Tick { epoch }).await {
                        tracing::debug!("Tick {} not delivered: {}", epoch, e);
                    }
                }
            }
        });

        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
