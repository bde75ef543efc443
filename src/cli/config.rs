use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

const CONFIG_FILE: &str = "cli.json";

/// Client-side settings persisted between invocations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    pub server_url: Option<String>,
    pub token: Option<String>,
}

impl CliConfig {
    /// Server URL precedence: explicit flag, then SHOWS_SERVER_URL, then saved, then default
    pub fn resolve_server_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| std::env::var("SHOWS_SERVER_URL").ok().filter(|s| !s.trim().is_empty()))
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SHOWS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("show-tracker")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_config() -> anyhow::Result<CliConfig> {
    load_config_from(&get_config_dir()?)
}

pub fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    save_config_to(&get_config_dir()?, config)
}

pub fn load_config_from(dir: &Path) -> anyhow::Result<CliConfig> {
    let config_file = dir.join(CONFIG_FILE);

    if !config_file.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(config_file)?;
    let config: CliConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_config_to(dir: &Path, config: &CliConfig) -> anyhow::Result<()> {
    let config_file = dir.join(CONFIG_FILE);

    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_file, content)?;
    Ok(())
}
