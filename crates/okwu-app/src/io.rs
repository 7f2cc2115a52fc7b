use std::io::BufRead;

use kanal::{AsyncSender, Sender};
use okwu_types::{AppEvent, CategoryFilter, UiEvent};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
commands:
  <enter> | click       reveal the translation, or next word once revealed
  hold / release        pause and resume the countdown
  category <name|all>   switch category
  open <link or query>  jump to a shared card
  back / forward        move through visited cards
  audio                 toggle audio
  share                 print a link to this card
  quit";

/// Turn a line typed into the shell into a UI event
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "" | "c" | "click" => Some(UiEvent::Click),
        "h" | "hold" => Some(UiEvent::Hold),
        "r" | "release" => Some(UiEvent::Release),
        "category" | "cat" => {
            let filter = arg.parse::<CategoryFilter>().unwrap_or_else(|_| {
                tracing::warn!("Unknown category '{}', showing all", arg);
                CategoryFilter::All
            });
            Some(UiEvent::SelectCategory(filter))
        }
        "open" if !arg.is_empty() => Some(UiEvent::Open(arg.to_string())),
        "b" | "back" => Some(UiEvent::Back),
        "f" | "forward" => Some(UiEvent::Forward),
        "a" | "audio" => Some(UiEvent::ToggleAudio),
        "s" | "share" => Some(UiEvent::Share),
        "q" | "quit" | "exit" => Some(UiEvent::Close),
        _ => None,
    }
}

/// Send a typed line to the app, or the help text to the UI when it isn't a
/// command. Returns false once the receiving side is gone.
pub fn route_line(line: &str, event_tx: &Sender<AppEvent>, ui_tx: &Sender<AppEvent>) -> bool {
    match parse_command(line) {
        Some(event) => event_tx.send(AppEvent::UiEvent(event)).is_ok(),
        None => ui_tx.send(AppEvent::StatusUpdate(HELP.to_string())).is_ok(),
    }
}

/// Reads commands from stdin until EOF or cancellation. Unknown input is
/// answered with the help text on the UI channel.
pub async fn watcher_io(
    event_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let tx = event_tx.clone().to_sync();
    let ui_tx = ui_tx.to_sync();

    // blocking reads live on their own thread so shutdown never waits on stdin
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            };

            if !route_line(&line, &tx, &ui_tx) {
                return;
            }
        }

        tracing::info!("Input closed");
        let _ = tx.send(AppEvent::UiEvent(UiEvent::Close));
    });

    cancel.cancelled().await;
    tracing::info!("Input watcher stopping");
    Ok(())
}
