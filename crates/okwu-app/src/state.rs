use std::sync::Arc;

use okwu_config::Config;
use tokio::sync::RwLock;

use crate::profile::ProfileStore;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub profiles: ProfileStore,
    /// Profile the config was loaded from and preferences are saved to
    pub profile_name: String,
}

impl AppState {
    pub fn new(config: Config, profiles: ProfileStore, profile_name: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            profiles,
            profile_name: profile_name.into(),
        }
    }
}
