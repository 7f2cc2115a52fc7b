use std::sync::Arc;

use okwu_types::{CategoryFilter, WordRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::navigation::{NavIntent, NavState};

/// Derives the current word from navigation state and picks the next one.
///
/// The derived word is memoised on the `(word, category)` parameters so that
/// re-deriving an unchanged location never re-rolls the random pick.
pub struct WordSession<R = StdRng> {
    catalog: Arc<Catalog>,
    rng: R,
    memo: Option<(NavState, WordRecord)>,
}

impl WordSession<StdRng> {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> WordSession<R> {
    pub fn with_rng(catalog: Arc<Catalog>, rng: R) -> Self {
        Self {
            catalog,
            rng,
            memo: None,
        }
    }

    /// Uniform pick from the words in `filter`
    pub fn random_word(&mut self, filter: CategoryFilter) -> Result<WordRecord, SessionError> {
        self.catalog.random(filter, &mut self.rng).cloned()
    }

    /// The word named by `nav.word` if it exists, otherwise a random word
    /// from the active category
    pub fn derive_current_word(&mut self, nav: &NavState) -> Result<WordRecord, SessionError> {
        if let Some((key, word)) = &self.memo
            && key == nav
        {
            return Ok(word.clone());
        }

        let found = nav
            .word
            .as_deref()
            .and_then(|w| self.catalog.find(w))
            .cloned();
        let word = match found {
            Some(found) => found,
            None => {
                if let Some(missing) = &nav.word {
                    tracing::debug!("Word '{}' not in catalog, picking at random", missing);
                }
                self.random_word(nav.filter())?
            }
        };

        self.memo = Some((nav.clone(), word.clone()));
        Ok(word)
    }

    /// Pick a new word in the active category and the history entry that
    /// shows it. The draw may repeat the current word.
    pub fn advance(&mut self, nav: &NavState) -> Result<(WordRecord, NavIntent), SessionError> {
        let filter = nav.filter();
        let next = self.random_word(filter)?;
        tracing::debug!("Advancing to '{}' ({})", next.english, filter);

        let target = NavState::new(Some(filter), Some(next.english.clone()));
        self.memo = Some((target.clone(), next.clone()));
        Ok((next, NavIntent::Push(target)))
    }

    /// Replace-write that completes `nav` with the derived word, `None` once
    /// the location already names a catalog word
    pub fn sync(&mut self, nav: &NavState) -> Result<Option<NavIntent>, SessionError> {
        let complete = nav
            .word
            .as_deref()
            .is_some_and(|w| self.catalog.find(w).is_some());
        if complete {
            return Ok(None);
        }

        let current = self.derive_current_word(nav)?;
        let target = NavState::new(Some(nav.filter()), Some(current.english.clone()));
        // the completed location resolves to the same word without a re-roll
        self.memo = Some((target.clone(), current));
        Ok(Some(NavIntent::Replace(target)))
    }
}
