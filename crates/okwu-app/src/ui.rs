use std::fmt::Write;

use kanal::AsyncReceiver;
use okwu_types::{AppEvent, CategoryFilter, SessionState};

use crate::io::HELP;

/// Plain-text shell, the only writer to stdout: prints whatever the app sends
/// until shutdown
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    let mut last: Option<SessionState> = None;
    println!("{HELP}");

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowCard(state) => {
                if last.as_ref() != Some(&state) {
                    println!("{}", render_card(&state));
                    last = Some(state);
                }
            }
            AppEvent::ShowEmpty { category } => {
                last = None;
                println!("{}", render_empty(category));
            }
            AppEvent::ShowLink(link) => println!("link: {link}"),
            AppEvent::StatusUpdate(message) => println!("-- {message}"),
            AppEvent::Shutdown => break,
            _ => {}
        }
    }

    tracing::debug!("UI loop finished");
    Ok(())
}

pub fn render_card(state: &SessionState) -> String {
    let word = &state.current_word;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "[{}] {} ({})",
        state.category_filter,
        word.english,
        word.category
    );

    if state.is_revealed {
        let _ = writeln!(out, "  => {}", word.igbo);
        for example in word.examples.iter().flatten() {
            let _ = writeln!(out, "     {} / {}", example.english, example.igbo);
        }
    } else if state.is_suspended {
        let _ = writeln!(out, "  paused at {}", state.reveal_countdown);
    } else {
        let _ = writeln!(out, "  Revealing in {}...", state.reveal_countdown);
    }

    if !state.audio_enabled {
        let _ = writeln!(out, "  (muted)");
    }

    out.trim_end().to_string()
}

pub fn render_empty(category: CategoryFilter) -> String {
    format!("No words in category '{category}', pick another one")
}
