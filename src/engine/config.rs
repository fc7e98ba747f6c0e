// Configuration for the QuantRead pacing engine and terminal reader.
// Defaults are documented on each field; a sparse TOML file may override any of them.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

/// What `Pacer::load` does with an empty element in a raw word sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTokenPolicy {
    /// Fail the whole load with `PacerError::InvalidInput`.
    Reject,
    /// Drop the element and log a warning.
    Skip,
}

impl Default for EmptyTokenPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            EmptyTokenPolicy::Reject
        } else {
            EmptyTokenPolicy::Skip
        }
    }
}

/// Pacing configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PacerConfig {
    /// Words per minute used until the reader picks another rate (default 300)
    pub default_wpm: u32,

    /// Accepted rates, inclusive (default 1..=2000)
    pub wpm_range: RangeInclusive<u32>,

    /// Step for the `+` / `-` keys (default 25)
    pub wpm_step: u32,

    pub empty_token_policy: EmptyTokenPolicy,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            default_wpm: 300,
            wpm_range: 1..=2000,
            wpm_step: 25,
            empty_token_policy: EmptyTokenPolicy::default(),
        }
    }
}

/// Reader view configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Neighbouring words shown on each side while paused (default 3)
    pub context_words: usize,

    /// Progress bar width in cells (default 20)
    pub progress_bar_width: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            context_words: 3,
            progress_bar_width: 20,
        }
    }
}

/// Upper bound on `history.capacity`; the history panel is sized from it.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// History log configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Most-recent entries kept (default 5)
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}

/// Web page fetching configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    /// Request timeout (default 15s)
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: concat!("quantread/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Master configuration combining all QuantRead settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub pacer: PacerConfig,
    pub reader: ReaderConfig,
    pub history: HistoryConfig,
    pub web: WebConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// Sparse on-disk shape; every key is optional.

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    pacer: FilePacer,
    #[serde(default)]
    reader: FileReader,
    #[serde(default)]
    history: FileHistory,
    #[serde(default)]
    web: FileWeb,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilePacer {
    default_wpm: Option<u32>,
    min_wpm: Option<u32>,
    max_wpm: Option<u32>,
    wpm_step: Option<u32>,
    empty_token_policy: Option<EmptyTokenPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileReader {
    context_words: Option<usize>,
    progress_bar_width: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileHistory {
    capacity: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileWeb {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl Config {
    /// Parses a TOML document on top of the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        let min = file.pacer.min_wpm.unwrap_or(*config.pacer.wpm_range.start());
        let max = file.pacer.max_wpm.unwrap_or(*config.pacer.wpm_range.end());
        config.pacer.wpm_range = min..=max;
        if let Some(wpm) = file.pacer.default_wpm {
            config.pacer.default_wpm = wpm;
        }
        if let Some(step) = file.pacer.wpm_step {
            config.pacer.wpm_step = step;
        }
        if let Some(policy) = file.pacer.empty_token_policy {
            config.pacer.empty_token_policy = policy;
        }

        if let Some(words) = file.reader.context_words {
            config.reader.context_words = words;
        }
        if let Some(width) = file.reader.progress_bar_width {
            config.reader.progress_bar_width = width;
        }
        if let Some(capacity) = file.history.capacity {
            config.history.capacity = capacity;
        }
        if let Some(secs) = file.web.timeout_secs {
            config.web.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.web.user_agent {
            config.web.user_agent = agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Loads `path` if given, else the default location if a file exists there,
    /// else the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = &self.pacer.wpm_range;
        if *range.start() == 0 {
            return Err(ConfigError::Invalid("min_wpm must be at least 1".into()));
        }
        if range.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "min_wpm {} exceeds max_wpm {}",
                range.start(),
                range.end()
            )));
        }
        if !range.contains(&self.pacer.default_wpm) {
            return Err(ConfigError::Invalid(format!(
                "default_wpm {} outside {}..={}",
                self.pacer.default_wpm,
                range.start(),
                range.end()
            )));
        }
        if self.pacer.wpm_step == 0 {
            return Err(ConfigError::Invalid("wpm_step must be at least 1".into()));
        }
        let span = (range.end() - range.start()).max(1);
        if self.pacer.wpm_step > span {
            return Err(ConfigError::Invalid(format!(
                "wpm_step {} larger than the rate range ({})",
                self.pacer.wpm_step, span
            )));
        }
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid("history capacity must be at least 1".into()));
        }
        if self.history.capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "history capacity {} exceeds {}",
                self.history.capacity, MAX_HISTORY_CAPACITY
            )));
        }
        Ok(())
    }
}

/// `<config_dir>/quantread/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quantread").join("config.toml"))
}
