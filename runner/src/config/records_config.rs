use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RecordsConfig {
    pub save: bool,
    pub path: String,
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

fn default_recent_count() -> usize {
    common::records::DEFAULT_RECENT_RECORDS
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            save: true,
            path: "snake_records.txt".to_string(),
            recent_count: default_recent_count(),
        }
    }
}

impl Validate for RecordsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save && self.path.trim().is_empty() {
            return Err("records.path must not be empty when saving is enabled".to_string());
        }
        if self.recent_count == 0 {
            return Err("records.recent_count must be at least 1".to_string());
        }
        Ok(())
    }
}
