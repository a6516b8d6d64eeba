use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::food::{RARE_TIER_THRESHOLD, SPECIAL_TIER_THRESHOLD, TIER_ROLL_RANGE, TierThresholds};
use super::obstacles::{MAX_TRIES_PER_WALL, MAX_WALL_LENGTH, MIN_WALL_LENGTH};
use super::rules::ComboPolicy;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SnakeGameSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub initial_snake_length: u32,
    pub base_tick_interval_ms: u32,
    pub min_tick_interval_ms: u32,
    pub speedup_score_step: u32,
    pub speedup_step_ms: u32,
    pub food_refresh_interval_ms: u32,
    pub map_refresh_interval_ms: u32,
    pub food_batch_size: u32,
    pub food_spawn_radius: u32,
    pub rare_tier_threshold: u32,
    pub special_tier_threshold: u32,
    pub obstacle_ratio: f32,
    pub min_wall_length: u32,
    pub max_wall_length: u32,
    pub max_tries_per_wall: u32,
    pub map_refresh_attempts: u32,
    pub combo_policy: ComboPolicy,
}

impl Default for SnakeGameSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 15,
            initial_snake_length: 3,
            base_tick_interval_ms: 200,
            min_tick_interval_ms: 50,
            speedup_score_step: 10,
            speedup_step_ms: 10,
            food_refresh_interval_ms: 5000,
            map_refresh_interval_ms: 10000,
            food_batch_size: 5,
            food_spawn_radius: 5,
            rare_tier_threshold: RARE_TIER_THRESHOLD,
            special_tier_threshold: SPECIAL_TIER_THRESHOLD,
            obstacle_ratio: 0.15,
            min_wall_length: MIN_WALL_LENGTH as u32,
            max_wall_length: MAX_WALL_LENGTH as u32,
            max_tries_per_wall: MAX_TRIES_PER_WALL as u32,
            map_refresh_attempts: 5,
            combo_policy: ComboPolicy::KeepOnMiss,
        }
    }
}

impl Validate for SnakeGameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(5..=100).contains(&self.field_width) || !(5..=100).contains(&self.field_height) {
            return Err("field dimensions must be between 5 and 100".to_string());
        }
        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }
        if self.initial_snake_length > self.field_width / 2 + 1 {
            return Err("initial_snake_length does not fit into the field".to_string());
        }
        if !(20..=5000).contains(&self.base_tick_interval_ms) {
            return Err("base_tick_interval_ms must be between 20 and 5000".to_string());
        }
        if self.min_tick_interval_ms == 0 || self.min_tick_interval_ms > self.base_tick_interval_ms {
            return Err("min_tick_interval_ms must be between 1 and base_tick_interval_ms".to_string());
        }
        if self.speedup_score_step == 0 {
            return Err("speedup_score_step must be at least 1".to_string());
        }
        if self.food_refresh_interval_ms == 0 || self.map_refresh_interval_ms == 0 {
            return Err("refresh intervals must be greater than 0".to_string());
        }
        if self.food_spawn_radius > self.field_width.max(self.field_height) {
            return Err("food_spawn_radius must not exceed the larger field dimension".to_string());
        }
        if self.food_batch_size > 50 {
            return Err("food_batch_size must not exceed 50".to_string());
        }
        if self.rare_tier_threshold > self.special_tier_threshold
            || self.special_tier_threshold > TIER_ROLL_RANGE
        {
            return Err(format!(
                "tier thresholds must satisfy rare <= special <= {}",
                TIER_ROLL_RANGE
            ));
        }
        if !(0.0..=0.5).contains(&self.obstacle_ratio) {
            return Err("obstacle_ratio must be between 0.0 and 0.5".to_string());
        }
        if self.min_wall_length == 0 || self.max_wall_length < self.min_wall_length {
            return Err("wall lengths must satisfy 1 <= min <= max".to_string());
        }
        if self.max_tries_per_wall == 0 || self.map_refresh_attempts == 0 {
            return Err("retry limits must be at least 1".to_string());
        }
        Ok(())
    }
}

impl SnakeGameSettings {
    /// Speeds up by one step for every `speedup_score_step` points.
    pub fn tick_interval_for_score(&self, score: u64) -> Duration {
        let steps = score / u64::from(self.speedup_score_step.max(1));
        let reduction = steps.saturating_mul(u64::from(self.speedup_step_ms));
        let interval_ms = u64::from(self.base_tick_interval_ms)
            .saturating_sub(reduction)
            .max(u64::from(self.min_tick_interval_ms));
        Duration::from_millis(interval_ms)
    }

    pub fn food_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.food_refresh_interval_ms as u64)
    }

    pub fn map_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.map_refresh_interval_ms as u64)
    }

    pub fn obstacle_budget(&self) -> usize {
        let total_cells = self.field_width * self.field_height;
        (total_cells as f32 * self.obstacle_ratio) as usize
    }

    pub fn tier_thresholds(&self) -> TierThresholds {
        TierThresholds {
            rare: self.rare_tier_threshold,
            special: self.special_tier_threshold,
        }
    }
}
