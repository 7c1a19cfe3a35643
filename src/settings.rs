use crate::identity::client::{IdentityProviderConfig, DEFAULT_BASE_URL};
use crate::navigation::ROOT_PATH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoordinatorSettings {
    #[serde(default)]
    pub identity_provider: IdentityProviderSettings,
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProviderSettings {
    /// API key appended to every verification request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Name of an environment variable holding the API key (overrides `api_key`)
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationSettings {
    /// Destination after a successful sign-in
    #[serde(default = "default_root_path")]
    pub root_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Helper functions for serde defaults
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_root_path() -> String { ROOT_PATH.to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for IdentityProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: None,
            base_url: default_base_url(),
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Settings loading failures
#[derive(Debug)]
pub enum SettingsError {
    /// A settings file exists but could not be read
    Io(std::io::Error),
    /// A settings file is not valid TOML for this schema
    Parse(basic_toml::Error),
    /// No API key in the settings file, the named env var or `IDP_API_KEY`
    MissingApiKey,
    /// Logger was already initialized
    Logger(log::SetLoggerError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "Failed to read settings: {err}"),
            SettingsError::Parse(err) => write!(f, "Failed to parse settings: {err}"),
            SettingsError::MissingApiKey => write!(
                f,
                "Identity provider API key is not configured (set IDP_API_KEY or identity_provider.api_key)"
            ),
            SettingsError::Logger(err) => write!(f, "Failed to initialize logger: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
            SettingsError::Logger(err) => Some(err),
            SettingsError::MissingApiKey => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<basic_toml::Error> for SettingsError {
    fn from(err: basic_toml::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl CoordinatorSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_env_file();

        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings()?;

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings);

        // The logger starts last so the configured level applies
        settings
            .logger_builder()
            .try_init()
            .map_err(SettingsError::Logger)?;

        Ok(settings)
    }

    /// Logger configured from `logging.level`, which already reflects `RUST_LOG`
    #[must_use]
    pub fn logger_builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&self.logging.level);
        builder
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `RELYINGPARTY_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    fn load_base_settings() -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(from_file) = Self::load_file(Path::new("Settings.toml"))? {
            settings = from_file;
        }

        if let Ok(secrets_dir) = std::env::var("RELYINGPARTY_SECRETS_DIR") {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            match Self::load_file(&secrets_path)? {
                Some(from_secrets) => settings = from_secrets,
                None => println!(
                    "ℹ RELYINGPARTY_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                ),
            }
        }

        Ok(settings)
    }

    /// Parse a settings file, or `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_file(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let toml_content = fs::read_to_string(path)?;
        let settings = basic_toml::from_str(&toml_content)?;
        println!("✓ Loaded settings from {}", path.display());
        Ok(Some(settings))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_identity_provider_env_overrides(&mut settings.identity_provider);
        Self::apply_navigation_env_overrides(&mut settings.navigation);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    /// Apply environment overrides for identity provider settings
    pub fn apply_identity_provider_env_overrides(idp_settings: &mut IdentityProviderSettings) {
        if let Ok(api_key) = std::env::var("IDP_API_KEY") {
            if !api_key.is_empty() {
                idp_settings.api_key = Some(api_key);
            }
        }
        if let Ok(base_url) = std::env::var("IDP_BASE_URL") {
            idp_settings.base_url = base_url;
        }
    }

    fn apply_navigation_env_overrides(navigation_settings: &mut NavigationSettings) {
        if let Ok(root_path) = std::env::var("NAVIGATION_ROOT_PATH") {
            navigation_settings.root_path = root_path;
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            Self::apply_env_file(&contents);
        }
    }

    /// Set variables from `.env` contents. Variables already present in the
    /// process environment take precedence over the file.
    pub fn apply_env_file(contents: &str) {
        for (key, value) in contents.lines().filter_map(parse_env_line) {
            if std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
            }
        }
    }

    /// Build the configuration injected into the identity provider client
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingApiKey`] if no non-empty API key is configured
    pub fn identity_provider_config(&self) -> Result<IdentityProviderConfig, SettingsError> {
        let api_key = self
            .identity_provider
            .get_api_key()
            .ok_or(SettingsError::MissingApiKey)?;
        Ok(IdentityProviderConfig::new(api_key).with_base_url(&self.identity_provider.base_url))
    }
}

/// Parse one `KEY=value` line, skipping blanks and `#` comments.
/// An optional `export ` prefix and matching surrounding quotes are removed.
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim();
    let value = ['"', '\'']
        .iter()
        .find_map(|quote| {
            value
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(value);
    Some((key, value))
}

impl IdentityProviderSettings {
    /// Resolve the API key, preferring the named environment variable
    #[must_use]
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key_env
            .as_ref()
            .and_then(|env_var| std::env::var(env_var).ok())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.is_empty())
    }
}
