use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_asset_root() -> String {
    "audio".to_string()
}

fn default_output_device() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play pronunciation audio
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_asset_root")]
    pub asset_root: String,
    /// Open the default output device; when false clips are only decoded
    #[serde(default = "default_output_device")]
    pub output_device: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            asset_root: default_asset_root(),
            output_device: default_output_device(),
        }
    }
}
