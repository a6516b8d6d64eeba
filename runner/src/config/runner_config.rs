use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::SnakeGameSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::RecordsConfig;

const CONFIG_FILE_NAME: &str = "snake_runner_config.yaml";

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(default_config_path))
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    #[serde(default)]
    pub game: SnakeGameSettings,
    #[serde(default)]
    pub records: RecordsConfig,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.records.validate()?;
        Ok(())
    }
}
