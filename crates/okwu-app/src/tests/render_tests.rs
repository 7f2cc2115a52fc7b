use okwu_types::{Category, CategoryFilter, SessionState, UsageExample};

use super::word;
use crate::ui::{render_card, render_empty};

fn state() -> SessionState {
    SessionState {
        category_filter: CategoryFilter::Only(Category::Noun),
        current_word: word("house", "ụlọ", Category::Noun),
        is_revealed: false,
        reveal_countdown: 2,
        is_suspended: false,
        audio_enabled: true,
    }
}

#[test]
fn test_counting_card_hides_translation() {
    let out = render_card(&state());
    assert!(out.contains("house"));
    assert!(out.contains("Revealing in 2..."));
    assert!(!out.contains("ụlọ"));
}

#[test]
fn test_revealed_card_shows_examples() {
    let mut s = state();
    s.is_revealed = true;
    s.reveal_countdown = 0;
    s.audio_enabled = false;
    s.current_word.examples = Some(vec![UsageExample {
        english: "My house is big".to_string(),
        igbo: "Ụlọ m buru ibu".to_string(),
    }]);

    let out = render_card(&s);
    assert!(out.contains("=> ụlọ"));
    assert!(out.contains("My house is big / Ụlọ m buru ibu"));
    assert!(out.contains("(muted)"));
    assert!(!out.contains("Revealing"));
}

#[test]
fn test_paused_card() {
    let mut s = state();
    s.is_suspended = true;
    assert!(render_card(&s).contains("paused at 2"));
}

#[test]
fn test_empty_message_names_category() {
    assert!(render_empty(CategoryFilter::Only(Category::Adverb)).contains("adverb"));
}
