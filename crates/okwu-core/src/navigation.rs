use std::fmt;

use okwu_types::CategoryFilter;

use crate::error::SessionError;

/// The two navigation parameters the session reads and writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NavState {
    pub category: Option<CategoryFilter>,
    pub word: Option<String>,
}

impl NavState {
    pub fn new(category: Option<CategoryFilter>, word: Option<String>) -> Self {
        Self { category, word }
    }

    /// Filter in effect, `all` when the parameter is absent
    pub fn filter(&self) -> CategoryFilter {
        self.category.unwrap_or_default()
    }

    /// Parse a query, substituting `all` for an unrecognized category
    pub fn parse_query(query: &str) -> Self {
        let (state, invalid) = parse_params(query);
        if let Some(raw) = invalid {
            tracing::warn!("Unrecognized category '{}' in navigation, using 'all'", raw);
        }
        state
    }

    /// Parse a query, failing on an unrecognized category
    pub fn try_parse_query(query: &str) -> Result<Self, SessionError> {
        match parse_params(query) {
            (state, None) => Ok(state),
            (_, Some(raw)) => Err(SessionError::InvalidCategory(raw)),
        }
    }

    /// Encode as `?category=..&word=..`, empty when neither is set
    pub fn to_query(&self) -> String {
        let mut params = Vec::with_capacity(2);
        if let Some(category) = self.category {
            params.push(format!("category={}", category.as_str()));
        }
        if let Some(word) = &self.word {
            params.push(format!("word={}", urlencoding::encode(word)));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }

    pub fn share_link(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.to_query())
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.to_query();
        if query.is_empty() {
            f.write_str("?")
        } else {
            f.write_str(&query)
        }
    }
}

/// Returns the parsed state plus the raw category text if it was rejected
fn parse_params(query: &str) -> (NavState, Option<String>) {
    let query = match query.find('?') {
        Some(i) => &query[i + 1..],
        None => query.trim_start_matches(['#', '/']),
    };

    let mut state = NavState::default();
    let mut invalid = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode(value);
        if value.is_empty() {
            continue;
        }

        match key {
            "category" => match value.parse::<CategoryFilter>() {
                Ok(filter) => state.category = Some(filter),
                Err(_) => {
                    state.category = Some(CategoryFilter::All);
                    invalid = Some(value);
                }
            },
            "word" => state.word = Some(value),
            other => tracing::debug!("Ignoring navigation parameter '{}'", other),
        }
    }

    (state, invalid)
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}

/// A navigation write produced by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    /// New history entry
    Push(NavState),
    /// Overwrite the current entry
    Replace(NavState),
}

impl NavIntent {
    pub fn state(&self) -> &NavState {
        match self {
            NavIntent::Push(state) | NavIntent::Replace(state) => state,
        }
    }
}

/// Boundary that owns the real location (address bar or equivalent)
pub trait Navigator {
    fn location(&self) -> &NavState;

    fn navigate(&mut self, intent: NavIntent);
}

/// In-memory history stack with a cursor. Pushing past `limit` entries
/// drops the oldest ones.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<NavState>,
    cursor: usize,
    limit: usize,
}

impl MemoryHistory {
    pub const DEFAULT_LIMIT: usize = 200;

    pub fn new(initial: NavState) -> Self {
        Self::with_limit(initial, Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(initial: NavState, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Step back one entry, returns false at the start of history
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(NavState::default())
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> &NavState {
        &self.entries[self.cursor]
    }

    fn navigate(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Push(state) => {
                self.entries.truncate(self.cursor + 1);
                self.entries.push(state);
                let excess = self.entries.len().saturating_sub(self.limit);
                if excess > 0 {
                    self.entries.drain(..excess);
                }
                self.cursor = self.entries.len() - 1;
            }
            NavIntent::Replace(state) => {
                self.entries[self.cursor] = state;
            }
        }
        tracing::debug!("Navigated to {}", self.location());
    }
}
