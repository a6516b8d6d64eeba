mod records_config;
mod runner_config;

pub use records_config::RecordsConfig;
pub use runner_config::{RunnerConfig, get_config_manager};
