use crate::models::PatcherSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ::config::{Config, Environment, File};

/// Settings file looked up in the configuration directory
pub const SETTINGS_FILE_NAME: &str = "csgo-patcher.yaml";

/// Prefix for environment overrides, e.g. `CSGO_PATCHER_STEAM_PATH`
pub const ENV_PREFIX: &str = "CSGO_PATCHER";

/// Configuration manager for the optional patcher settings.
///
/// Settings are layered, later sources winning:
/// 1. Built-in defaults ([`PatcherSettings::default`])
/// 2. `csgo-patcher.yaml` in the configuration directory, if present
/// 3. `CSGO_PATCHER_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the specified configuration directory.
    ///
    /// The directory is not created; a missing settings file just means defaults.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();

        Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        }
    }

    /// Load settings from the settings file and the process environment.
    pub fn load_settings(&self) -> Result<PatcherSettings> {
        self.load_with_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings using `vars` in place of the process environment.
    ///
    /// Keys are full variable names such as `CSGO_PATCHER_VERBOSE`.
    pub fn load_settings_with_env(
        &self,
        vars: ::config::Map<String, String>,
    ) -> Result<PatcherSettings> {
        self.load_with_environment(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load_with_environment(&self, environment: Environment) -> Result<PatcherSettings> {
        if self.settings_path.exists() {
            tracing::info!("Loading settings from {}", self.settings_path);
        } else {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings = Config::builder()
            .add_source(File::from(self.settings_path.as_std_path()).required(false))
            .add_source(environment.try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize::<PatcherSettings>()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
