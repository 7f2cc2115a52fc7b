use crate::types::{CategoryFilter, SessionState};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Countdown tick scheduled for the given timer epoch
    Tick {
        epoch: u64,
    },
    ShowCard(SessionState),
    /// No word matches the active filter
    ShowEmpty {
        category: CategoryFilter,
    },
    ShowLink(String),
    StatusUpdate(String),
    /// Sent to every loop when the app is closing
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click,
    Hold,
    Release,
    SelectCategory(CategoryFilter),
    /// Open a raw query such as `?category=noun&word=house`
    Open(String),
    Back,
    Forward,
    ToggleAudio,
    Share,
    Close,
}
