//! Runtime configuration.
//!
//! Built once at startup and handed to [`crate::db::Database`] and
//! [`crate::llm::ChatClient`]. Sources, in order of precedence: CLI flags,
//! environment variables, platform defaults.
//!
//! - `RECALL_DATA_DIR` - directory holding the two JSON documents
//! - `OPENAI_API_KEY` - chat API credential (AI endpoints fail without it)
//! - `OPENAI_BASE_URL` - chat API base URL (default: `https://api.openai.com/v1`)
//! - `RECALL_MODEL` - default chat model (default: `gpt-4o-mini`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const LEARNING_FILE: &str = "learning_data.json";
pub const PLANNING_FILE: &str = "planning_data.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub data: DataConfig,
    pub llm: LlmConfig,
}

/// Where the JSON documents live.
#[derive(Clone, Debug)]
pub struct DataConfig {
    pub learning_file: PathBuf,
    pub planning_file: PathBuf,
}

impl DataConfig {
    /// Both documents under `dir`, with their standard file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            learning_file: dir.join(LEARNING_FILE),
            planning_file: dir.join(PLANNING_FILE),
        }
    }

    /// `RECALL_DATA_DIR`, or the platform data directory.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = std::env::var("RECALL_DATA_DIR") {
            return Ok(Self::in_dir(dir));
        }
        let dirs = directories::ProjectDirs::from("", "", "recall-planner")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::in_dir(dirs.data_dir()))
    }
}

/// Chat-completion upstream settings.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            default_model: std::env::var("RECALL_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(60),
        }
    }

    /// A config with no credential, for local use without AI features.
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data: DataConfig::from_env()?,
            llm: LlmConfig::from_env(),
        })
    }

    /// Replace the data directory, keeping everything else.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data = DataConfig::in_dir(dir);
        self
    }
}
