use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use okwu_config::Config;
use serde::{Deserialize, Serialize};

/// Load the default config shipped next to the binary, if any
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        tracing::info!("No config.json in working directory, using built-in defaults");
        return Ok(Config::new());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profiles stored as `{root}/profiles/{name}.json`
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<config dir>/okwu`, e.g. `~/.config/okwu` on Linux
    pub fn default_location() -> anyhow::Result<Self> {
        let base = dirs::config_dir().context("No user config directory on this platform")?;
        Ok(Self::new(base.join("okwu")))
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.profile_path(name).exists()
    }

    /// Initialize the profiles folder and main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            self.save("main", &load_repo_default_config()?)?;
            tracing::info!("Created main profile in {}", self.profiles_dir().display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to the defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);

        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            load_repo_default_config()
        }
    }

    pub fn save(&self, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(self.profiles_dir())?;
        let profile = Profile {
            name: name.into(),
            value: config.clone(),
        };
        let file = self.profile_path(name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
        tracing::debug!("Saved profile {name}");
        Ok(file)
    }

    /// Add a new profile cloned from main
    pub fn add_profile_from_default(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        let default_config = self.load("main")?;
        let file = self.save(new_name, &default_config)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Malformed profile {}", path.display()))?;
    Ok(profile.value)
}
