use std::time::Duration;

use super::types::{Direction, Food, GameOverReason, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    Paused,
}

/// Read-only copy of everything a display needs after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub snake: Vec<Point>,
    pub direction: Direction,
    pub foods: Vec<Food>,
    pub obstacle_cells: Vec<Point>,
    pub score: u64,
    pub combo: u32,
    pub high_combo: u32,
    pub state: LoopState,
    pub ticks: u64,
    pub elapsed: Duration,
    pub tick_interval: Duration,
    pub time_until_food_refresh: Duration,
    pub time_until_map_refresh: Duration,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over_reason.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    /// `"hit wall"` and friends, or an empty string while playing.
    pub fn game_over_text(&self) -> String {
        self.game_over_reason
            .map(|reason| reason.to_string())
            .unwrap_or_default()
    }
}
