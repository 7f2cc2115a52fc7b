#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Seconds left before the translation shows
    Counting(u8),
    Revealed,
}

/// What a click on the card means in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Translation was hidden and is now shown
    Revealed,
    /// Translation was already shown, move on to another word
    Advance,
}

/// Countdown to the reveal of the current word.
///
/// Every transition bumps `epoch`. A pending tick is only honoured if it
/// carries the epoch that was current when it was scheduled, so ticks from a
/// previous word, a previous countdown step, or from before a hold are
/// dropped.
#[derive(Debug, Clone)]
pub struct RevealTimer {
    start: u8,
    state: RevealState,
    suspended: bool,
    epoch: u64,
    word: Option<String>,
}

impl RevealTimer {
    pub const DEFAULT_START: u8 = 3;

    pub fn new(start: u8) -> Self {
        let mut timer = Self {
            start,
            state: RevealState::Counting(start),
            suspended: false,
            epoch: 0,
            word: None,
        };
        timer.settle();
        timer
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn countdown(&self) -> u8 {
        match self.state {
            RevealState::Counting(n) => n,
            RevealState::Revealed => 0,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Epoch a one-second tick should be scheduled for, if one is wanted
    pub fn pending_tick(&self) -> Option<u64> {
        match self.state {
            RevealState::Counting(_) if !self.suspended => Some(self.epoch),
            _ => None,
        }
    }

    /// Apply one elapsed second. Returns whether the state changed.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            tracing::debug!("Dropping stale tick (epoch {} != {})", epoch, self.epoch);
            return false;
        }
        if self.suspended {
            return false;
        }

        match self.state {
            RevealState::Counting(n) if n > 0 => {
                self.state = RevealState::Counting(n - 1);
                self.epoch += 1;
                self.settle();
                true
            }
            RevealState::Counting(_) => self.settle(),
            RevealState::Revealed => false,
        }
    }

    /// Hold gesture started or ended. Returns whether the flag changed.
    pub fn set_suspended(&mut self, suspended: bool) -> bool {
        if self.suspended == suspended {
            return false;
        }
        self.suspended = suspended;
        // the wait restarts from a full second once released
        self.epoch += 1;
        if !suspended {
            self.settle();
        }
        true
    }

    pub fn click(&mut self) -> ClickOutcome {
        match self.state {
            RevealState::Revealed => ClickOutcome::Advance,
            RevealState::Counting(_) => {
                self.reveal();
                ClickOutcome::Revealed
            }
        }
    }

    /// Back to a full countdown, pending ticks are invalidated
    pub fn reset(&mut self) {
        self.state = RevealState::Counting(self.start);
        self.epoch += 1;
        self.settle();
    }

    /// Track the word the countdown belongs to, resetting when it changes.
    /// Returns whether a reset happened.
    pub fn bind_word(&mut self, english: &str) -> bool {
        if self.word.as_deref() == Some(english) {
            return false;
        }
        self.word = Some(english.to_string());
        self.reset();
        true
    }

    fn reveal(&mut self) {
        self.state = RevealState::Revealed;
        self.epoch += 1;
    }

    fn settle(&mut self) -> bool {
        if self.state == RevealState::Counting(0) && !self.suspended {
            self.reveal();
            return true;
        }
        false
    }
}

impl Default for RevealTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_now(timer: &mut RevealTimer) -> bool {
        let epoch = timer.epoch();
        timer.tick(epoch)
    }

    #[test]
    fn test_three_ticks_reveal() {
        let mut timer = RevealTimer::default();
        assert_eq!(timer.state(), RevealState::Counting(3));

        assert!(tick_now(&mut timer));
        assert_eq!(timer.state(), RevealState::Counting(2));
        assert!(tick_now(&mut timer));
        assert_eq!(timer.state(), RevealState::Counting(1));
        assert!(!timer.is_revealed());
        assert!(tick_now(&mut timer));
        assert_eq!(timer.state(), RevealState::Revealed);
        assert_eq!(timer.countdown(), 0);

        // terminal for this word
        assert!(!tick_now(&mut timer));
        assert_eq!(timer.pending_tick(), None);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let mut timer = RevealTimer::default();
        let scheduled = timer.epoch();
        assert!(timer.tick(scheduled));
        assert!(!timer.tick(scheduled));
        assert_eq!(timer.countdown(), 2);
    }

    #[test]
    fn test_hold_freezes_countdown() {
        let mut timer = RevealTimer::default();
        tick_now(&mut timer);
        assert_eq!(timer.countdown(), 2);

        let scheduled = timer.epoch();
        assert!(timer.set_suspended(true));
        assert!(timer.is_suspended());
        assert_eq!(timer.pending_tick(), None);

        for _ in 0..10 {
            assert!(!timer.tick(scheduled));
            assert!(!tick_now(&mut timer));
        }
        assert_eq!(timer.countdown(), 2);

        assert!(timer.set_suspended(false));
        // a fresh wait, the tick scheduled before the hold stays dead
        let resumed = timer.pending_tick().unwrap();
        assert_ne!(resumed, scheduled);
        assert!(!timer.tick(scheduled));
        assert!(timer.tick(resumed));
        assert_eq!(timer.countdown(), 1);
    }

    #[test]
    fn test_repeated_hold_signal_is_ignored() {
        let mut timer = RevealTimer::default();
        assert!(!timer.set_suspended(false));
        assert!(timer.set_suspended(true));
        let epoch = timer.epoch();
        assert!(!timer.set_suspended(true));
        assert_eq!(timer.epoch(), epoch);
    }

    #[test]
    fn test_click_reveals_then_advances() {
        let mut timer = RevealTimer::default();
        tick_now(&mut timer);
        let scheduled = timer.epoch();

        assert_eq!(timer.click(), ClickOutcome::Revealed);
        assert!(timer.is_revealed());
        assert!(!timer.tick(scheduled));

        assert_eq!(timer.click(), ClickOutcome::Advance);
        // click alone doesn't reset, the caller does after advancing
        assert!(timer.is_revealed());
        timer.reset();
        assert_eq!(timer.state(), RevealState::Counting(3));
    }

    #[test]
    fn test_bind_word_resets_on_change_only() {
        let mut timer = RevealTimer::default();
        assert!(timer.bind_word("house"));
        timer.click();
        assert!(timer.is_revealed());

        assert!(!timer.bind_word("house"));
        assert!(timer.is_revealed());

        let before = timer.epoch();
        assert!(timer.bind_word("run"));
        assert_eq!(timer.state(), RevealState::Counting(3));
        assert!(timer.epoch() > before);
    }

    #[test]
    fn test_zero_start_reveals_immediately() {
        let timer = RevealTimer::new(0);
        assert!(timer.is_revealed());
    }

    #[test]
    fn test_hold_at_zero_delays_reveal_until_release() {
        let mut timer = RevealTimer::new(0);
        timer.set_suspended(true);
        timer.reset();
        assert_eq!(timer.state(), RevealState::Counting(0));
        assert!(!tick_now(&mut timer));

        timer.set_suspended(false);
        assert!(timer.is_revealed());
    }
}
