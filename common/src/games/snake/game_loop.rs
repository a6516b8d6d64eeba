use std::collections::HashSet;
use std::time::Duration;

use crate::config::Validate;
use crate::games::{Clock, SessionRng, SystemClock};
use crate::log;
use crate::records::GameRecord;
use super::connectivity;
use super::error::GameError;
use super::food::FoodSpawner;
use super::obstacles::{ObstacleGenerator, Obstacles};
use super::rules::RuleEngine;
use super::score::ScoreBoard;
use super::settings::SnakeGameSettings;
use super::snake::Snake;
use super::snapshot::{GameSnapshot, LoopState};
use super::types::{Direction, GameOverReason, Point};
use super::world::World;

pub struct GameLoop<C: Clock = SystemClock> {
    settings: SnakeGameSettings,
    world: World,
    rules: RuleEngine,
    score: ScoreBoard,
    food_spawner: FoodSpawner,
    obstacle_generator: ObstacleGenerator,
    rng: SessionRng,
    clock: C,
    state: LoopState,
    next_direction: Option<Direction>,
    last_food_refresh: Duration,
    last_map_refresh: Duration,
    play_started: Option<Duration>,
    frozen_at: Option<Duration>,
    ticks: u64,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(settings: SnakeGameSettings, clock: C, rng: SessionRng) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;

        let world = build_world(&settings)?;
        let spawn_radius = i32::try_from(settings.food_spawn_radius).unwrap_or(i32::MAX);
        let food_spawner = FoodSpawner::new(spawn_radius, settings.tier_thresholds());
        let obstacle_generator = ObstacleGenerator::new(
            settings.min_wall_length as usize,
            settings.max_wall_length as usize,
            settings.max_tries_per_wall as usize,
        );

        let mut game_loop = Self {
            settings,
            world,
            rules: RuleEngine::new(),
            score: ScoreBoard::new(),
            food_spawner,
            obstacle_generator,
            rng,
            clock,
            state: LoopState::Stopped,
            next_direction: None,
            last_food_refresh: Duration::ZERO,
            last_map_refresh: Duration::ZERO,
            play_started: None,
            frozen_at: None,
            ticks: 0,
        };
        game_loop.populate_world();
        Ok(game_loop)
    }

    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Stopped || self.rules.is_game_over() {
            return false;
        }

        let now = self.clock.now();
        self.play_started = Some(match (self.play_started, self.frozen_at) {
            (Some(started), Some(frozen)) => started + now.saturating_sub(frozen),
            _ => now,
        });
        self.frozen_at = None;
        self.last_food_refresh = now;
        self.last_map_refresh = now;
        self.state = LoopState::Running;
        log!("Game started (seed {})", self.rng.seed());
        true
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if self.frozen_at.is_none() {
            self.frozen_at = Some(self.clock.now());
        }
        self.state = LoopState::Stopped;
        log!("Game stopped at score {}", self.score.score());
    }

    pub fn pause(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.frozen_at = Some(self.clock.now());
        self.state = LoopState::Paused;
        true
    }

    /// Resumes play; refresh countdowns and play time skip the paused span.
    pub fn resume(&mut self) -> bool {
        if self.state != LoopState::Paused {
            return false;
        }
        let now = self.clock.now();
        if let Some(frozen) = self.frozen_at.take() {
            let paused_for = now.saturating_sub(frozen);
            self.last_food_refresh += paused_for;
            self.last_map_refresh += paused_for;
            if let Some(started) = self.play_started.as_mut() {
                *started += paused_for;
            }
        }
        self.state = LoopState::Running;
        true
    }

    pub fn reset(&mut self) -> Result<(), GameError> {
        self.world = build_world(&self.settings)?;
        self.rules.reset();
        self.score.reset();
        self.state = LoopState::Stopped;
        self.next_direction = None;
        self.last_food_refresh = Duration::ZERO;
        self.last_map_refresh = Duration::ZERO;
        self.play_started = None;
        self.frozen_at = None;
        self.ticks = 0;
        self.populate_world();
        log!("Game reset");
        Ok(())
    }

    /// Latches the direction for the next tick; a later request overwrites it.
    pub fn request_direction_change(&mut self, direction: Direction) {
        if !self.rules.is_game_over() {
            self.next_direction = Some(direction);
        }
    }

    /// Advances the simulation by one step. Returns whether the game is still
    /// running afterwards.
    pub fn tick(&mut self) -> bool {
        if self.state != LoopState::Running || self.rules.is_game_over() {
            return false;
        }
        let now = self.clock.now();

        if let Some(direction) = self.next_direction.take()
            && let Some(snake) = self.world.snake_mut()
        {
            snake.change_direction(direction);
        }

        if now.saturating_sub(self.last_food_refresh) >= self.settings.food_refresh_interval() {
            self.refresh_food();
            self.last_food_refresh = now;
        }

        if now.saturating_sub(self.last_map_refresh) >= self.settings.map_refresh_interval() {
            self.refresh_map();
            self.last_map_refresh = now;
        }

        if let Some(snake) = self.world.snake_mut() {
            snake.step();
        }
        self.ticks += 1;

        if let Some(reason) = self.rules.check_collision(&self.world) {
            self.frozen_at = Some(now);
            self.state = LoopState::Stopped;
            log!(
                "Game over after {} ticks: {}. Score: {}",
                self.ticks,
                reason,
                self.score.score()
            );
            return false;
        }

        if let Some(food) =
            self.rules
                .check_food(&mut self.world, &mut self.score, self.settings.combo_policy)
        {
            log!(
                "Ate {} food at ({}, {}). Combo: {}, score: {}",
                food.tier,
                food.position.x,
                food.position.y,
                self.score.combo(),
                self.score.score()
            );
        }

        true
    }

    fn populate_world(&mut self) {
        self.refresh_map();
        self.refresh_food();
    }

    fn refresh_food(&mut self) {
        self.world.clear_foods();
        let spawned = self.food_spawner.spawn_multiple(
            &mut self.world,
            &mut self.rng,
            self.settings.food_batch_size as usize,
        );
        log!("Food refreshed: {} placed", spawned.len());
    }

    /// Swaps in a freshly generated obstacle layout if one passes the
    /// connectivity check within the attempt limit. Otherwise the previous
    /// layout is put back untouched.
    fn refresh_map(&mut self) -> bool {
        let avoid = self.positions_to_avoid();
        let budget = self.settings.obstacle_budget();
        let previous = self.world.set_obstacles(Obstacles::default());

        for attempt in 1..=self.settings.map_refresh_attempts {
            let candidate = self
                .obstacle_generator
                .generate(&self.world, &mut self.rng, budget, &avoid);
            let cell_count = candidate.cell_count();
            self.world.set_obstacles(candidate);

            if connectivity::is_connected(&self.world) {
                log!(
                    "Map refreshed: {} obstacle cells (attempt {})",
                    cell_count,
                    attempt
                );
                return true;
            }
            self.world.set_obstacles(Obstacles::default());
        }

        self.world.set_obstacles(previous);
        log!(
            "Map refresh failed after {} attempts, keeping previous layout",
            self.settings.map_refresh_attempts
        );
        false
    }

    fn positions_to_avoid(&self) -> HashSet<Point> {
        let mut avoid: HashSet<Point> = self
            .world
            .snake()
            .map(|snake| snake.body().copied().collect())
            .unwrap_or_default();
        avoid.extend(self.world.foods().iter().map(|food| food.position));
        avoid
    }

    fn reference_now(&self) -> Duration {
        self.frozen_at.unwrap_or_else(|| self.clock.now())
    }

    fn time_until(&self, last_refresh: Duration, interval: Duration) -> Duration {
        if self.play_started.is_none() {
            return interval;
        }
        interval.saturating_sub(self.reference_now().saturating_sub(last_refresh))
    }

    pub fn time_until_next_food_refresh(&self) -> Duration {
        self.time_until(self.last_food_refresh, self.settings.food_refresh_interval())
    }

    pub fn time_until_next_map_refresh(&self) -> Duration {
        self.time_until(self.last_map_refresh, self.settings.map_refresh_interval())
    }

    /// Play time, not counting pauses.
    pub fn elapsed(&self) -> Duration {
        match self.play_started {
            Some(started) => self.reference_now().saturating_sub(started),
            None => Duration::ZERO,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.settings.tick_interval_for_score(self.score.score())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    /// Over, or stopped after having been started.
    pub fn is_finished(&self) -> bool {
        self.rules.is_game_over()
            || (self.state == LoopState::Stopped && self.play_started.is_some())
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.rules.game_over_reason()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn settings(&self) -> &SnakeGameSettings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            score: self.score.score(),
            length: self.world.snake().map_or(0, Snake::len),
            elapsed_seconds: self.elapsed().as_secs(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut obstacle_cells: Vec<Point> = self.world.obstacles().cells().into_iter().collect();
        obstacle_cells.sort();

        let (snake, direction) = match self.world.snake() {
            Some(snake) => (snake.body().copied().collect(), snake.direction()),
            None => (Vec::new(), Direction::Right),
        };

        GameSnapshot {
            width: self.world.width(),
            height: self.world.height(),
            snake,
            direction,
            foods: self.world.foods().to_vec(),
            obstacle_cells,
            score: self.score.score(),
            combo: self.score.combo(),
            high_combo: self.score.high_combo(),
            state: self.state,
            ticks: self.ticks,
            elapsed: self.elapsed(),
            tick_interval: self.tick_interval(),
            time_until_food_refresh: self.time_until_next_food_refresh(),
            time_until_map_refresh: self.time_until_next_map_refresh(),
            game_over_reason: self.rules.game_over_reason(),
        }
    }

    #[cfg(test)]
    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// Empty field with the snake centred and facing right.
fn build_world(settings: &SnakeGameSettings) -> Result<World, GameError> {
    let mut world = World::new(settings.field_width as i32, settings.field_height as i32)?;
    let start = Point::new(world.width() / 2, world.height() / 2);
    let snake = Snake::new(start, Direction::Right, settings.initial_snake_length as usize)?;

    if let Some(segment) = snake.body().find(|segment| !world.in_bounds(segment)) {
        return Err(GameError::SnakeOutOfBounds { segment: *segment });
    }

    world.set_snake(snake);
    Ok(world)
}
