use serde::{Deserialize, Serialize};

use super::score::ScoreBoard;
use super::types::{Food, GameOverReason};
use super::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleState {
    Playing,
    GameOver,
}

/// What happens to the combo on a tick where nothing was eaten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboPolicy {
    ResetOnMiss,
    #[default]
    KeepOnMiss,
}

#[derive(Clone, Debug)]
pub struct RuleEngine {
    state: RuleState,
    game_over_reason: Option<GameOverReason>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            state: RuleState::Playing,
            game_over_reason: None,
        }
    }

    /// Wall beats self beats obstacle when several apply at once.
    pub fn check_collision(&mut self, world: &World) -> Option<GameOverReason> {
        if self.is_game_over() {
            return None;
        }
        let snake = world.snake()?;
        let head = snake.head();

        let reason = if !world.in_bounds(&head) {
            GameOverReason::HitWall
        } else if snake.head_overlaps_body() {
            GameOverReason::HitSelf
        } else if world.is_obstacle(&head) {
            GameOverReason::HitObstacle
        } else {
            return None;
        };

        self.state = RuleState::GameOver;
        self.game_over_reason = Some(reason);
        Some(reason)
    }

    pub fn check_food(
        &mut self,
        world: &mut World,
        score: &mut ScoreBoard,
        policy: ComboPolicy,
    ) -> Option<Food> {
        if self.is_game_over() {
            return None;
        }
        let head = world.snake()?.head();

        let Some(food) = world.remove_food_at(&head) else {
            if policy == ComboPolicy::ResetOnMiss {
                score.reset_combo();
            }
            return None;
        };

        score.eat_food(food.tier);
        if let Some(snake) = world.snake_mut() {
            snake.grow(food.tier.growth());
        }
        Some(food)
    }

    pub fn state(&self) -> RuleState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == RuleState::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn reset(&mut self) {
        self.state = RuleState::Playing;
        self.game_over_reason = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::obstacles::{Obstacles, Wall};
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::{Direction, FoodTier, Point};

    fn world_with_snake(head: Point, direction: Direction, length: usize) -> World {
        let mut world = World::new(20, 15).unwrap();
        world.set_snake(Snake::new(head, direction, length).unwrap());
        world
    }

    #[test]
    fn test_wall_collision() {
        let mut world = world_with_snake(Point::new(19, 7), Direction::Right, 3);
        world.snake_mut().unwrap().step();
        assert_eq!(world.snake().unwrap().head(), Point::new(20, 7));

        let mut rules = RuleEngine::new();
        assert_eq!(rules.check_collision(&world), Some(GameOverReason::HitWall));
        assert!(rules.is_game_over());
        assert_eq!(rules.game_over_reason().unwrap().to_string(), "hit wall");
    }

    #[test]
    fn test_self_collision() {
        let mut world = world_with_snake(Point::new(5, 5), Direction::Right, 5);
        let snake = world.snake_mut().unwrap();
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            snake.change_direction(direction);
            snake.step();
        }

        let mut rules = RuleEngine::new();
        assert_eq!(rules.check_collision(&world), Some(GameOverReason::HitSelf));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut world = world_with_snake(Point::new(5, 5), Direction::Right, 3);
        let mut obstacles = Obstacles::default();
        obstacles.add_wall(Wall::new(vec![Point::new(6, 4), Point::new(6, 5), Point::new(6, 6)]));
        world.set_obstacles(obstacles);
        world.snake_mut().unwrap().step();

        let mut rules = RuleEngine::new();
        assert_eq!(rules.check_collision(&world), Some(GameOverReason::HitObstacle));
    }

    #[test]
    fn test_no_collision_keeps_playing() {
        let mut world = world_with_snake(Point::new(5, 5), Direction::Right, 3);
        world.snake_mut().unwrap().step();
        let mut rules = RuleEngine::new();
        assert_eq!(rules.check_collision(&world), None);
        assert_eq!(rules.state(), RuleState::Playing);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut world = world_with_snake(Point::new(0, 0), Direction::Left, 1);
        world.snake_mut().unwrap().step();
        let mut rules = RuleEngine::new();
        rules.check_collision(&world);

        world.add_food(Food::new(Point::new(-1, 0), FoodTier::Rare));
        let mut score = ScoreBoard::new();
        assert!(rules.check_food(&mut world, &mut score, ComboPolicy::KeepOnMiss).is_none());
        assert_eq!(score.score(), 0);
        assert_eq!(rules.check_collision(&world), None);
        assert_eq!(rules.game_over_reason(), Some(GameOverReason::HitWall));

        rules.reset();
        assert_eq!(rules.state(), RuleState::Playing);
        assert_eq!(rules.game_over_reason(), None);
    }

    #[test]
    fn test_eating_grows_scores_and_removes_food() {
        let mut world = world_with_snake(Point::new(5, 5), Direction::Right, 3);
        world.add_food(Food::new(Point::new(6, 5), FoodTier::Special));
        world.snake_mut().unwrap().step();

        let mut rules = RuleEngine::new();
        let mut score = ScoreBoard::new();
        let eaten = rules.check_food(&mut world, &mut score, ComboPolicy::KeepOnMiss);
        assert_eq!(eaten.map(|f| f.tier), Some(FoodTier::Special));
        assert_eq!(score.score(), 1);
        assert_eq!(world.snake().unwrap().growth_pending(), 2);
        assert!(world.foods().is_empty());
    }

    #[test]
    fn test_combo_policy_on_miss() {
        let mut world = world_with_snake(Point::new(5, 5), Direction::Right, 3);
        let mut rules = RuleEngine::new();

        let mut score = ScoreBoard::new();
        score.eat_food(FoodTier::Rare);
        rules.check_food(&mut world, &mut score, ComboPolicy::KeepOnMiss);
        assert_eq!(score.combo(), 1);

        rules.check_food(&mut world, &mut score, ComboPolicy::ResetOnMiss);
        assert_eq!(score.combo(), 0);
        assert_eq!(score.last_tier(), None);
    }
}
