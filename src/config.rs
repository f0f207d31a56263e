// ⚙️ Configuration - Environment driven settings
// Read after dotenv so a local .env file can override the defaults

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "users_data.json";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding every record (BMI_DATA_FILE)
    pub data_file: PathBuf,

    /// Directory containing layout.html and static/ (BMI_TEMPLATES_DIR)
    pub templates_dir: PathBuf,

    /// BMI_HOST
    pub host: String,

    /// BMI_PORT
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Build the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment in production)
    ///
    /// An unparsable port is an error rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port: u16 = match lookup("BMI_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid BMI_PORT: {:?}", raw))?,
            None => defaults.port,
        };

        Ok(Config {
            data_file: lookup("BMI_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            templates_dir: lookup("BMI_TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.templates_dir),
            host: lookup("BMI_HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Address to bind the web server to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory served under /static
    pub fn static_dir(&self) -> PathBuf {
        self.templates_dir.join("static")
    }
}

// ============================================================================
// TESTS
// ============================================================================
