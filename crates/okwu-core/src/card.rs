use std::time::Duration;

use okwu_types::{SessionState, WordRecord};
use rand::Rng;

use crate::audio::{AudioBackend, AudioCueSequencer};
use crate::error::SessionError;
use crate::navigation::{NavIntent, NavState};
use crate::reveal::{ClickOutcome, RevealTimer};
use crate::session::WordSession;

/// Reacts to every newly published session state
pub trait SessionObserver: Send {
    fn on_session_change(&mut self, state: &SessionState);
}

#[derive(Debug, Clone)]
pub enum CardInput {
    /// The location changed (initial load, sync write applied, back, ...)
    Navigated(NavState),
    Tick { epoch: u64 },
    Click,
    /// Hold gesture active or released
    Hold(bool),
    SetAudio(bool),
}

/// Side effects for the boundary to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEffect {
    Navigate(NavIntent),
    /// Deliver `CardInput::Tick { epoch }` after `after`, superseding any
    /// previously scheduled tick
    ScheduleTick { epoch: u64, after: Duration },
    CancelTick,
}

#[derive(Debug, Clone)]
pub struct CardOptions {
    pub countdown_start: u8,
    pub tick_interval: Duration,
    pub audio_enabled: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            countdown_start: RevealTimer::DEFAULT_START,
            tick_interval: Duration::from_secs(1),
            audio_enabled: true,
        }
    }
}

/// One flashcard: navigation snapshot plus local state (countdown, hold,
/// audio preference), recomputed into a `SessionState` after every input.
pub struct FlashCard<R, B> {
    session: WordSession<R>,
    timer: RevealTimer,
    audio: AudioCueSequencer<B>,
    observers: Vec<Box<dyn SessionObserver>>,
    channels: Vec<kanal::Sender<SessionState>>,
    nav: NavState,
    current: Option<WordRecord>,
    audio_enabled: bool,
    tick_interval: Duration,
    scheduled: Option<u64>,
    published: Option<SessionState>,
}

impl<R: Rng, B: AudioBackend> FlashCard<R, B> {
    pub fn new(session: WordSession<R>, audio: AudioCueSequencer<B>, options: CardOptions) -> Self {
        Self {
            session,
            timer: RevealTimer::new(options.countdown_start),
            audio,
            observers: Vec::new(),
            channels: Vec::new(),
            nav: NavState::default(),
            current: None,
            audio_enabled: options.audio_enabled,
            tick_interval: options.tick_interval,
            scheduled: None,
            published: None,
        }
    }

    /// Receive every published state from now on
    pub fn subscribe(&mut self) -> kanal::Receiver<SessionState> {
        let (tx, rx) = kanal::unbounded();
        if let Some(state) = &self.published {
            let _ = tx.try_send(state.clone());
        }
        self.channels.push(tx);
        rx
    }

    pub fn observe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Last published state, `None` before the first word or when the
    /// active category has no words
    pub fn state(&self) -> Option<&SessionState> {
        self.published.as_ref()
    }

    pub fn audio(&self) -> &AudioCueSequencer<B> {
        &self.audio
    }

    pub fn timer(&self) -> &RevealTimer {
        &self.timer
    }

    /// Apply one input. On error no tick is left scheduled and the caller
    /// should cancel any it still holds.
    pub fn handle(&mut self, input: CardInput) -> Result<Vec<CardEffect>, SessionError> {
        let mut effects = Vec::new();

        let result = match input {
            CardInput::Navigated(nav) => self.on_navigated(nav, &mut effects),
            CardInput::Tick { epoch } => {
                if self.scheduled == Some(epoch) {
                    self.scheduled = None;
                }
                if self.timer.tick(epoch) {
                    self.publish();
                }
                Ok(())
            }
            CardInput::Click => self.on_click(&mut effects),
            CardInput::Hold(held) => {
                if self.timer.set_suspended(held) {
                    tracing::debug!("Hold {}", if held { "started" } else { "released" });
                    self.publish();
                }
                Ok(())
            }
            CardInput::SetAudio(enabled) => {
                self.audio_enabled = enabled;
                self.publish();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.scheduled = None;
            return Err(e);
        }
        self.reconcile_timer(&mut effects);
        Ok(effects)
    }

    fn on_navigated(
        &mut self,
        nav: NavState,
        effects: &mut Vec<CardEffect>,
    ) -> Result<(), SessionError> {
        self.nav = nav;

        match self.session.derive_current_word(&self.nav) {
            Ok(word) => self.current = Some(word),
            Err(e) => {
                self.clear();
                return Err(e);
            }
        }

        if let Some(intent) = self.session.sync(&self.nav)? {
            tracing::debug!("Completing location with {}", intent.state());
            effects.push(CardEffect::Navigate(intent));
        }

        self.publish();
        Ok(())
    }

    fn on_click(&mut self, effects: &mut Vec<CardEffect>) -> Result<(), SessionError> {
        if self.current.is_none() {
            return Ok(());
        }

        match self.timer.click() {
            ClickOutcome::Revealed => self.publish(),
            ClickOutcome::Advance => {
                let (next, intent) = match self.session.advance(&self.nav) {
                    Ok(advanced) => advanced,
                    Err(e) => {
                        // nothing left to show in this category
                        self.clear();
                        return Err(e);
                    }
                };
                self.nav = intent.state().clone();
                self.current = Some(next);
                // the draw may repeat the word, reset explicitly
                self.timer.reset();
                effects.push(CardEffect::Navigate(intent));
                self.publish();
            }
        }
        Ok(())
    }

    /// Drop the shown word, as for an empty category
    fn clear(&mut self) {
        self.current = None;
        self.published = None;
        self.audio.reset();
        // a recovered word starts from a full countdown
        self.timer.reset();
    }

    fn snapshot(&self) -> Option<SessionState> {
        let word = self.current.clone()?;
        Some(SessionState {
            category_filter: self.nav.filter(),
            current_word: word,
            is_revealed: self.timer.is_revealed(),
            reveal_countdown: self.timer.countdown(),
            is_suspended: self.timer.is_suspended(),
            audio_enabled: self.audio_enabled,
        })
    }

    fn publish(&mut self) {
        if let Some(word) = &self.current {
            self.timer.bind_word(&word.english);
        }

        let Some(state) = self.snapshot() else {
            return;
        };
        if self.published.as_ref() == Some(&state) {
            return;
        }

        self.audio.on_session_change(&state);
        for observer in &mut self.observers {
            observer.on_session_change(&state);
        }
        // dropped receivers unsubscribe
        self.channels.retain(|tx| tx.try_send(state.clone()).is_ok());

        self.published = Some(state);
    }

    fn reconcile_timer(&mut self, effects: &mut Vec<CardEffect>) {
        let wanted = if self.current.is_some() {
            self.timer.pending_tick()
        } else {
            None
        };
        if wanted == self.scheduled {
            return;
        }

        match wanted {
            Some(epoch) => effects.push(CardEffect::ScheduleTick {
                epoch,
                after: self.tick_interval,
            }),
            None => effects.push(CardEffect::CancelTick),
        }
        self.scheduled = wanted;
    }
}
