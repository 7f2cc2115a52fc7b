pub mod audio;
pub mod card;
pub mod catalog;
pub mod error;
pub mod navigation;
pub mod reveal;
pub mod sanitize;
pub mod session;

pub use audio::{
    AudioBackend, AudioCueSequencer, Clip, ClipId, RodioBackend, SilentBackend, Voice, decode_clip,
};
pub use card::{CardEffect, CardInput, CardOptions, FlashCard, SessionObserver};
pub use catalog::Catalog;
pub use error::{CatalogError, SessionError};
pub use navigation::{MemoryHistory, NavIntent, NavState, Navigator};
pub use reveal::{ClickOutcome, RevealState, RevealTimer};
pub use session::WordSession;
