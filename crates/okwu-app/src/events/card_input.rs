use std::collections::VecDeque;

use okwu_core::{AudioBackend, CardEffect, CardInput, FlashCard, Navigator, SessionError};
use okwu_types::AppEvent;
use rand::Rng;

use crate::session_context::SessionContext;

/// Feed one input to the card and carry out its effects. Navigation writes
/// are applied to the history and the new location fed back until the card
/// stops writing.
pub async fn dispatch<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
    input: CardInput,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    let mut pending = VecDeque::from([input]);

    while let Some(input) = pending.pop_front() {
        let effects = match card.handle(input) {
            Ok(effects) => effects,
            Err(SessionError::EmptyCatalog(category)) => {
                ctx.ticker.cancel();
                tracing::warn!("No words for category {}", category);
                ctx.app_to_ui_tx.send(AppEvent::ShowEmpty { category }).await?;
                continue;
            }
            Err(e) => {
                ctx.ticker.cancel();
                tracing::error!("Card input failed: {}", e);
                ctx.status(format!("Failed: {e}")).await;
                continue;
            }
        };

        for effect in effects {
            match effect {
                CardEffect::Navigate(intent) => {
                    ctx.history.navigate(intent);
                    pending.push_back(CardInput::Navigated(ctx.history.location().clone()));
                }
                CardEffect::ScheduleTick { epoch, after } => ctx.ticker.schedule(epoch, after),
                CardEffect::CancelTick => ctx.ticker.cancel(),
            }
        }
    }

    Ok(())
}
