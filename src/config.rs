use dailycal_core::{LogoutPolicy, DEFAULT_WATER_GOAL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Calorie estimation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Base URL of an OpenAI-compatible API (e.g., "https://api.openai.com/v1")
    pub base_url: String,
    /// API key; never printed
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

impl EstimatorConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the data file
    pub data_dir: ConfigValue<PathBuf>,
    /// What logout does to the food and water logs
    pub logout_policy: ConfigValue<LogoutPolicy>,
    /// Daily water target in glasses
    pub water_goal: ConfigValue<u32>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Estimation service configuration
    pub estimator: EstimatorConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    logout_policy: Option<LogoutPolicy>,
    water_goal: Option<u32>,
    estimator: Option<EstimatorConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |name| std::env::var(name).ok())
    }

    fn load_with_env<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut logout_policy = ConfigValue::new(LogoutPolicy::default(), ConfigSource::Default);
        let mut water_goal = ConfigValue::new(DEFAULT_WATER_GOAL, ConfigSource::Default);
        let mut config_file = None;
        let mut estimator = EstimatorConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(policy) = file_config.logout_policy {
                logout_policy = ConfigValue::new(policy, ConfigSource::File);
            }
            if let Some(goal) = file_config.water_goal {
                water_goal = ConfigValue::new(goal, ConfigSource::File);
            }
            if let Some(estimator_config) = file_config.estimator {
                estimator = estimator_config;
            }
        }

        let mut config = Self {
            data_dir,
            logout_policy,
            water_goal,
            config_file,
            estimator,
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Applies `DAILYCAL_*` overrides, reading each variable through `lookup`.
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DAILYCAL_DATA_DIR") {
            self.data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(policy) = lookup("DAILYCAL_LOGOUT_POLICY") {
            let parsed = policy
                .parse()
                .map_err(|e: String| ConfigError::InvalidValue("DAILYCAL_LOGOUT_POLICY", e))?;
            self.logout_policy = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Some(url) = lookup("DAILYCAL_ESTIMATOR_URL") {
            self.estimator.base_url = url;
        }
        if let Some(key) = lookup("DAILYCAL_API_KEY") {
            self.estimator.api_key = Some(key);
        }
        if let Some(model) = lookup("DAILYCAL_MODEL") {
            self.estimator.model = model;
        }
        Ok(())
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/dailycal/
    /// - macOS: ~/Library/Application Support/dailycal/
    /// - Windows: %APPDATA%/dailycal/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dailycal")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/dailycal/
    /// - macOS: ~/Library/Application Support/dailycal/
    /// - Windows: %APPDATA%/dailycal/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dailycal")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, e) => write!(f, "Invalid {}: {}", name, e),
        }
    }
}

impl std::error::Error for ConfigError {}
