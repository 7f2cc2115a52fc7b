use std::env;

use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::catalog::CatalogConfig;
use self::session::SessionConfig;
use self::share::ShareConfig;

pub mod audio;
pub mod catalog;
pub mod session;
pub mod share;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub audio: AudioConfig,
    pub catalog: CatalogConfig,
    pub share: ShareConfig,

    /// Capacity of the ui -> app channel
    pub event_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from defaults, overridden by whatever `lookup` returns for the
    /// `OKWU_*` keys
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            session: SessionConfig::default(),
            audio: AudioConfig::default(),
            catalog: CatalogConfig::default(),
            share: ShareConfig::default(),
            event_capacity: default_event_capacity(),
        };

        if let Some(v) = lookup("OKWU_COUNTDOWN").and_then(|v| v.parse().ok()) {
            config.session.countdown_start = v;
        }
        if let Some(v) = lookup("OKWU_TICK_MS").and_then(|v| v.parse().ok()) {
            config.session.tick_ms = v;
        }
        if let Some(v) = lookup("OKWU_AUDIO_ROOT") {
            config.audio.asset_root = v;
        }
        if let Some(v) = lookup("OKWU_AUDIO_DEVICE") {
            config.audio.output_device = !matches!(v.as_str(), "0" | "false" | "off");
        }
        if let Some(v) = lookup("OKWU_HISTORY_LIMIT").and_then(|v| v.parse().ok()) {
            config.session.history_limit = v;
        }
        if let Some(v) = lookup("OKWU_CATALOG") {
            config.catalog.path = Some(v);
        }
        if let Some(v) = lookup("OKWU_SHARE_URL") {
            config.share.base_url = v;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_event_capacity() -> usize {
    64
}
