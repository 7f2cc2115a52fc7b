pub mod events;
pub mod types;

pub use events::{AppEvent, UiEvent};
pub use types::{Category, CategoryFilter, SessionState, UnknownCategory, UsageExample, WordRecord};
