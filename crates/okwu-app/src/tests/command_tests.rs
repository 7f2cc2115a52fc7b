use okwu_types::{AppEvent, Category, CategoryFilter, UiEvent};

use crate::io::{HELP, parse_command, route_line};

#[test]
fn test_plain_commands() {
    assert_eq!(parse_command(""), Some(UiEvent::Click));
    assert_eq!(parse_command("  click "), Some(UiEvent::Click));
    assert_eq!(parse_command("HOLD"), Some(UiEvent::Hold));
    assert_eq!(parse_command("release"), Some(UiEvent::Release));
    assert_eq!(parse_command("back"), Some(UiEvent::Back));
    assert_eq!(parse_command("forward"), Some(UiEvent::Forward));
    assert_eq!(parse_command("audio"), Some(UiEvent::ToggleAudio));
    assert_eq!(parse_command("share"), Some(UiEvent::Share));
    assert_eq!(parse_command("q"), Some(UiEvent::Close));
    assert_eq!(parse_command("dance"), None);
}

#[test]
fn test_category_command() {
    assert_eq!(
        parse_command("category Noun"),
        Some(UiEvent::SelectCategory(CategoryFilter::Only(Category::Noun)))
    );
    assert_eq!(
        parse_command("category all"),
        Some(UiEvent::SelectCategory(CategoryFilter::All))
    );
    // unknown names fall back to everything
    assert_eq!(
        parse_command("category banana"),
        Some(UiEvent::SelectCategory(CategoryFilter::All))
    );
}

#[test]
fn test_open_command_keeps_argument() {
    assert_eq!(
        parse_command("open https://okwu.app/#/?category=noun&word=on%20top%20of"),
        Some(UiEvent::Open(
            "https://okwu.app/#/?category=noun&word=on%20top%20of".to_string()
        ))
    );
    assert_eq!(parse_command("open"), None);
}

#[test]
fn test_unknown_line_sends_help_to_ui() {
    let (event_tx, event_rx) = kanal::unbounded();
    let (ui_tx, ui_rx) = kanal::unbounded();

    assert!(route_line("dance", &event_tx, &ui_tx));
    match ui_rx.try_recv() {
        Ok(Some(AppEvent::StatusUpdate(text))) => assert_eq!(text, HELP),
        other => panic!("expected help, got {other:?}"),
    }
    assert!(matches!(event_rx.try_recv(), Ok(None)));

    assert!(route_line("hold", &event_tx, &ui_tx));
    assert!(matches!(
        event_rx.try_recv(),
        Ok(Some(AppEvent::UiEvent(UiEvent::Hold)))
    ));
    assert!(matches!(ui_rx.try_recv(), Ok(None)));
}

#[test]
fn test_route_line_stops_when_app_is_gone() {
    let (event_tx, event_rx) = kanal::unbounded();
    let (ui_tx, _ui_rx) = kanal::unbounded();
    drop(event_rx);

    assert!(!route_line("click", &event_tx, &ui_tx));
}
