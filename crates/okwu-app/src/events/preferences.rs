use okwu_core::{AudioBackend, CardInput, FlashCard};
use rand::Rng;

use super::card_input::dispatch;
use crate::session_context::SessionContext;

/// Flip the audio preference, persist it to the active profile, and let the
/// card react
pub async fn handle_audio_toggle<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    let enabled = {
        let mut config = ctx.state.config.write().await;
        config.audio.enabled = !config.audio.enabled;

        if let Err(e) = ctx.state.profiles.save(&ctx.state.profile_name, &config) {
            tracing::warn!("Failed to persist audio preference: {}", e);
        }
        config.audio.enabled
    };

    tracing::info!("Audio {}", if enabled { "enabled" } else { "muted" });
    dispatch(ctx, card, CardInput::SetAudio(enabled)).await
}
