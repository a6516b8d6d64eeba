use std::sync::{Arc, Mutex};

use common::games::snake::{GameSnapshot, LoopState, SnapshotBroadcaster};
use common::log;
use common::records::GameRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StatusKey {
    score: u64,
    length: usize,
    combo: u32,
    state: LoopState,
}

impl StatusKey {
    fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            score: snapshot.score,
            length: snapshot.snake_length(),
            combo: snapshot.combo,
            state: snapshot.state,
        }
    }
}

/// Logs a status line whenever something a player would notice changes.
#[derive(Clone, Default)]
pub struct LogBroadcaster {
    last_status: Arc<Mutex<Option<StatusKey>>>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn status_changed(&self, snapshot: &GameSnapshot) -> bool {
        let key = StatusKey::from_snapshot(snapshot);
        match self.last_status.lock() {
            Ok(mut last) => last.replace(key) != Some(key),
            Err(_) => true,
        }
    }
}

pub fn format_status(snapshot: &GameSnapshot) -> String {
    let head = snapshot
        .snake
        .first()
        .map(|p| format!("({}, {})", p.x, p.y))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:?} | score: {} | combo: {} | length: {} | head: {} | food: {} | walls: {} | speed: {}ms | food refresh in {:.1}s | map refresh in {:.1}s",
        snapshot.state,
        snapshot.score,
        snapshot.combo,
        snapshot.snake_length(),
        head,
        snapshot.foods.len(),
        snapshot.obstacle_cells.len(),
        snapshot.tick_interval.as_millis(),
        snapshot.time_until_food_refresh.as_secs_f32(),
        snapshot.time_until_map_refresh.as_secs_f32()
    )
}

impl SnapshotBroadcaster for LogBroadcaster {
    async fn broadcast_snapshot(&self, snapshot: GameSnapshot) {
        if self.status_changed(&snapshot) {
            log!("{}", format_status(&snapshot));
        }
    }

    async fn broadcast_game_over(&self, snapshot: GameSnapshot, record: GameRecord) {
        let reason = match snapshot.game_over_text() {
            text if text.is_empty() => "stopped".to_string(),
            text => text,
        };
        log!(
            "Game over ({}). Score: {}, length: {}, time: {:02}:{:02}, best combo: {}",
            reason,
            record.score,
            record.length,
            record.elapsed_seconds / 60,
            record.elapsed_seconds % 60,
            snapshot.high_combo
        );
    }
}
