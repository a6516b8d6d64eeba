use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::games::{Clock, SessionRng, SystemClock};
use crate::log;
use crate::records::GameRecord;
use super::error::GameError;
use super::game_loop::GameLoop;
use super::settings::SnakeGameSettings;
use super::snapshot::GameSnapshot;
use super::types::Direction;

pub trait SnapshotBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_snapshot(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(
        &self,
        snapshot: GameSnapshot,
        record: GameRecord,
    ) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
}

/// Shared handle to one game. The mutex is the single authority over the
/// loop: ticks and commands never interleave mid-update.
pub struct SnakeSessionState<C: Clock = SystemClock> {
    pub session_id: String,
    pub game: Arc<Mutex<GameLoop<C>>>,
}

impl<C: Clock> Clone for SnakeSessionState<C> {
    fn clone(&self) -> Self {
        Self {
            session_id: self.session_id.clone(),
            game: Arc::clone(&self.game),
        }
    }
}

impl<C: Clock> SnakeSessionState<C> {
    pub fn create(
        session_id: impl Into<String>,
        settings: SnakeGameSettings,
        clock: C,
        seed: u64,
    ) -> Result<Self, GameError> {
        let game = GameLoop::new(settings, clock, SessionRng::new(seed))?;
        Ok(Self {
            session_id: session_id.into(),
            game: Arc::new(Mutex::new(game)),
        })
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.lock().await.snapshot()
    }
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives the loop until the game ends or is stopped, re-arming the timer
    /// whenever the score changes the tick interval.
    pub async fn run<C: Clock + 'static>(
        session_state: SnakeSessionState<C>,
        broadcaster: impl SnapshotBroadcaster,
    ) -> GameRecord {
        let mut current_interval = session_state.game.lock().await.tick_interval();
        let mut timer = interval_at(Instant::now() + current_interval, current_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;

            let mut game = session_state.game.lock().await;
            game.tick();
            let snapshot = game.snapshot();

            if game.is_finished() {
                let record = game.record();
                drop(game);
                log!(
                    "[session:{}] Finished. Score: {}, length: {}, time: {}s",
                    session_state.session_id,
                    record.score,
                    record.length,
                    record.elapsed_seconds
                );
                broadcaster.broadcast_game_over(snapshot, record).await;
                return record;
            }

            let next_interval = game.tick_interval();
            drop(game);

            broadcaster.broadcast_snapshot(snapshot).await;

            if next_interval != current_interval {
                log!(
                    "[session:{}] Tick interval {}ms -> {}ms",
                    session_state.session_id,
                    current_interval.as_millis(),
                    next_interval.as_millis()
                );
                current_interval = next_interval;
                timer = interval_at(Instant::now() + current_interval, current_interval);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }
        }
    }

    pub async fn handle_command<C: Clock>(
        session_state: &SnakeSessionState<C>,
        command: SessionCommand,
    ) {
        let mut game = session_state.game.lock().await;
        match command {
            SessionCommand::Turn(direction) => game.request_direction_change(direction),
            SessionCommand::Start => {
                game.start();
            }
            SessionCommand::Pause => {
                game.pause();
            }
            SessionCommand::Resume => {
                game.resume();
            }
            SessionCommand::Stop => game.stop(),
            SessionCommand::Reset => {
                if let Err(e) = game.reset() {
                    log!("[session:{}] Reset failed: {}", session_state.session_id, e);
                }
            }
        }
    }
}
