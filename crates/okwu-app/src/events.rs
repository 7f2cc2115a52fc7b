use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender, Receiver};
use okwu_core::{AudioBackend, CardInput, FlashCard, MemoryHistory, NavState};
use okwu_types::{AppEvent, SessionState, UiEvent};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::session_context::SessionContext;
use crate::state::AppState;
use crate::ticker::TickScheduler;

pub mod card_input;
pub mod navigation;
pub mod preferences;

use card_input::dispatch;
use navigation::{
    handle_back, handle_category_select, handle_forward, handle_open, handle_share,
};
use preferences::handle_audio_toggle;

/// App's main loop, sole owner of the flashcard
pub async fn event_loop<R, B>(
    state: Arc<AppState>,
    mut card: FlashCard<R, B>,
    initial: NavState,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    let history_limit = state.config.read().await.session.history_limit;
    let states = card.subscribe();
    let ticker = TickScheduler::new(ui_to_app_tx, cancel.child_token());
    let mut ctx = SessionContext::new(
        state,
        MemoryHistory::with_limit(initial.clone(), history_limit),
        ticker,
        app_to_ui_tx,
    );

    tracing::info!("[EVENT_LOOP] Opening {}", initial);
    dispatch(&mut ctx, &mut card, CardInput::Navigated(initial)).await?;
    forward_states(&ctx, &states).await?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        if !handle_events(&mut ctx, &mut card, event).await? {
            break;
        }
        forward_states(&ctx, &states).await?;
    }

    ctx.ticker.cancel();
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Returns false once the session should end
async fn handle_events<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
    event: AppEvent,
) -> anyhow::Result<bool>
where
    R: Rng,
    B: AudioBackend,
{
    match event {
        AppEvent::UiEvent(UiEvent::Click) => dispatch(ctx, card, CardInput::Click).await?,
        AppEvent::UiEvent(UiEvent::Hold) => dispatch(ctx, card, CardInput::Hold(true)).await?,
        AppEvent::UiEvent(UiEvent::Release) => dispatch(ctx, card, CardInput::Hold(false)).await?,
        AppEvent::UiEvent(UiEvent::SelectCategory(filter)) => {
            handle_category_select(ctx, card, filter).await?
        }
        AppEvent::UiEvent(UiEvent::Open(query)) => handle_open(ctx, card, &query).await?,
        AppEvent::UiEvent(UiEvent::Back) => handle_back(ctx, card).await?,
        AppEvent::UiEvent(UiEvent::Forward) => handle_forward(ctx, card).await?,
        AppEvent::UiEvent(UiEvent::ToggleAudio) => handle_audio_toggle(ctx, card).await?,
        AppEvent::UiEvent(UiEvent::Share) => handle_share(ctx).await?,
        AppEvent::UiEvent(UiEvent::Close) | AppEvent::Shutdown => {
            tracing::info!("[EVENT_LOOP] Close requested");
            return Ok(false);
        }
        AppEvent::Tick { epoch } => dispatch(ctx, card, CardInput::Tick { epoch }).await?,
        AppEvent::ShowCard(_)
        | AppEvent::ShowEmpty { .. }
        | AppEvent::ShowLink(_)
        | AppEvent::StatusUpdate(_) => {
            // UI-only events, ignore in backend
        }
    }

    Ok(true)
}

/// Push every state the card published since the last call to the UI
async fn forward_states(
    ctx: &SessionContext,
    states: &Receiver<SessionState>,
) -> anyhow::Result<()> {
    while let Ok(Some(state)) = states.try_recv() {
        ctx.app_to_ui_tx.send(AppEvent::ShowCard(state)).await?;
    }
    Ok(())
}
