use std::collections::HashMap;
use std::path::Path;

use okwu_types::{CategoryFilter, WordRecord};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{CatalogError, SessionError};

/// Static, read-only word list
#[derive(Debug, Clone)]
pub struct Catalog {
    words: Vec<WordRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate `english` keys
    pub fn new(words: Vec<WordRecord>) -> Result<Self, CatalogError> {
        if words.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.english.clone(), i).is_some() {
                return Err(CatalogError::DuplicateWord(word.english.clone()));
            }
        }

        Ok(Self { words, index })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let words: Vec<WordRecord> = serde_json::from_str(json)?;
        Self::new(words)
    }

    /// Load the word list bundled with the crate
    pub fn load_embedded() -> Result<Self, CatalogError> {
        let json = include_str!("../data/words.json");
        tracing::info!("Loading embedded word catalog...");
        let catalog = Self::from_json(json)?;
        tracing::info!("Loaded {} words", catalog.len());
        Ok(catalog)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        tracing::info!("Loading word catalog from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!("Loaded {} words from file", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Exact match on the English term
    pub fn find(&self, english: &str) -> Option<&WordRecord> {
        self.index.get(english).map(|&i| &self.words[i])
    }

    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&WordRecord> {
        self.words
            .iter()
            .filter(|word| filter.matches(word.category))
            .collect()
    }

    /// Uniform pick from the words matching `filter`; repeats are possible
    pub fn random<R>(&self, filter: CategoryFilter, rng: &mut R) -> Result<&WordRecord, SessionError>
    where
        R: Rng + ?Sized,
    {
        self.filtered(filter)
            .choose(rng)
            .copied()
            .ok_or(SessionError::EmptyCatalog(filter))
    }
}
