use serde::{Deserialize, Serialize};

fn default_countdown_start() -> u8 {
    3
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_history_limit() -> usize {
    200
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds counted down before the translation is revealed
    #[serde(default = "default_countdown_start")]
    pub countdown_start: u8,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Oldest history entries are dropped beyond this many
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_start: default_countdown_start(),
            tick_ms: default_tick_ms(),
            history_limit: default_history_limit(),
        }
    }
}
