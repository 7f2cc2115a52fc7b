use okwu_core::{AudioBackend, CardInput, FlashCard, NavIntent, NavState, Navigator};
use okwu_types::{AppEvent, CategoryFilter};
use rand::Rng;

use super::card_input::dispatch;
use crate::session_context::SessionContext;

/// Category picker: new entry with only the category, the card fills the word
pub async fn handle_category_select<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
    filter: CategoryFilter,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    tracing::info!("Category selected: {}", filter);
    push(ctx, card, NavState::new(Some(filter), None)).await
}

/// Open a pasted link or raw query
pub async fn handle_open<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
    query: &str,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    let target = NavState::parse_query(query);
    tracing::info!("Opening {}", target);
    push(ctx, card, target).await
}

pub async fn handle_back<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    if !ctx.history.back() {
        ctx.status("Already at the first word").await;
        return Ok(());
    }
    let location = ctx.history.location().clone();
    dispatch(ctx, card, CardInput::Navigated(location)).await
}

pub async fn handle_forward<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    if !ctx.history.forward() {
        ctx.status("No later word to return to").await;
        return Ok(());
    }
    let location = ctx.history.location().clone();
    dispatch(ctx, card, CardInput::Navigated(location)).await
}

pub async fn handle_share(ctx: &mut SessionContext) -> anyhow::Result<()> {
    let base_url = {
        let config = ctx.state.config.read().await;
        config.share.base_url.clone()
    };
    let link = ctx.history.location().share_link(&base_url);
    tracing::debug!("Share link: {}", link);
    ctx.app_to_ui_tx.send(AppEvent::ShowLink(link)).await?;
    Ok(())
}

async fn push<R, B>(
    ctx: &mut SessionContext,
    card: &mut FlashCard<R, B>,
    target: NavState,
) -> anyhow::Result<()>
where
    R: Rng,
    B: AudioBackend,
{
    ctx.history.navigate(NavIntent::Push(target));
    let location = ctx.history.location().clone();
    dispatch(ctx, card, CardInput::Navigated(location)).await
}
