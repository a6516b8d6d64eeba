pub mod connectivity;
mod error;
mod food;
mod game_loop;
mod obstacles;
mod rules;
mod score;
mod session;
mod settings;
mod snake;
mod snapshot;
mod types;
mod world;

pub use error::GameError;
pub use food::{FoodSpawner, TierThresholds};
pub use game_loop::GameLoop;
pub use obstacles::{ObstacleGenerator, Obstacles, Wall};
pub use rules::{ComboPolicy, RuleEngine, RuleState};
pub use score::ScoreBoard;
pub use session::{SessionCommand, SnakeSession, SnakeSessionState, SnapshotBroadcaster};
pub use settings::SnakeGameSettings;
pub use snake::Snake;
pub use snapshot::{GameSnapshot, LoopState};
pub use types::{Direction, FieldSize, Food, FoodTier, GameOverReason, Point};
pub use world::World;
