//! Global choreboard configuration.

use std::path::PathBuf;

use chrono::Weekday;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{ChoreBoardError, ChoreBoardResult};

static DEFAULT_DATA_PATH: &str = "~/.choreboard";

/// Relay proxies tried, in order, when the feed can't be fetched directly.
pub static DEFAULT_PROXIES: &[&str] = &[
    "https://corsproxy.io/?",
    "https://cors-anywhere.herokuapp.com/",
    "https://api.allorigins.win/raw?url=",
];

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_proxies() -> Vec<String> {
    DEFAULT_PROXIES.iter().map(|p| p.to_string()).collect()
}

fn default_week_start() -> String {
    "sunday".to_string()
}

/// Global configuration at ~/.config/choreboard/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct BoardConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// iCalendar feed URL of the external family calendar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default = "default_proxies")]
    pub proxies: Vec<String>,

    /// First day of the agenda week: "sunday" (default) or another weekday
    /// name.
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            data_dir: default_data_dir(),
            feed_url: None,
            proxies: default_proxies(),
            week_start: default_week_start(),
        }
    }
}

impl BoardConfig {
    pub fn config_path() -> ChoreBoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ChoreBoardError::Config("Could not determine config directory".into()))?
            .join("choreboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> ChoreBoardResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| ChoreBoardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ChoreBoardError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/choreboard/config.toml
    pub fn save(&self) -> ChoreBoardResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChoreBoardError::Config(format!("Could not create config directory: {e}")))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ChoreBoardError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| ChoreBoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> ChoreBoardResult<()> {
        let contents = format!(
            "\
# choreboard configuration

# Where chore data lives:
# data_dir = \"{}\"

# iCalendar feed of your external family calendar:
# feed_url = \"https://rest.cozi.com/api/ext/1103/.../icalendar/feed/feed.ics\"

# First day of the agenda week:
# week_start = \"sunday\"
",
            DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ChoreBoardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ChoreBoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Expanded data directory path.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Path of the JSON store document.
    pub fn store_path(&self) -> PathBuf {
        self.data_path().join("board.json")
    }

    /// Parse the configured week start, defaulting to Sunday on anything
    /// unrecognized.
    pub fn week_start_day(&self) -> Weekday {
        match self.week_start.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Weekday::Mon,
            "tuesday" | "tue" => Weekday::Tue,
            "wednesday" | "wed" => Weekday::Wed,
            "thursday" | "thu" => Weekday::Thu,
            "friday" | "fri" => Weekday::Fri,
            "saturday" | "sat" => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }
}
