use crate::error::{PlantGuardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// モックの既定待ち時間（ミリ秒）
pub const DEFAULT_LATENCY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mock_latency_ms: u64,
    pub response_fixture: Option<PathBuf>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mock_latency_ms: DEFAULT_LATENCY_MS,
            response_fixture: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_overrides())
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantGuardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plantguard").join("config.json"))
    }

    /// 環境変数を優先
    fn with_env_overrides(mut self) -> Self {
        if let Ok(fixture) = std::env::var("PLANTGUARD_FIXTURE") {
            if !fixture.is_empty() {
                self.response_fixture = Some(PathBuf::from(fixture));
            }
        }
        if let Some(ms) = std::env::var("PLANTGUARD_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.mock_latency_ms = ms;
        }
        self
    }
}
