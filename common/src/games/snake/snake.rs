use std::collections::VecDeque;

use super::error::GameError;
use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    growth_pending: u32,
}

impl Snake {
    /// Lays the body out backwards from `start`, opposite to `direction`.
    /// Bounds are the caller's concern.
    pub fn new(start: Point, direction: Direction, length: usize) -> Result<Self, GameError> {
        if length == 0 {
            return Err(GameError::InvalidSnakeLength);
        }

        let (dx, dy) = direction.delta();
        let body = (0..length as i32)
            .map(|i| Point::new(start.x - i * dx, start.y - i * dy))
            .collect();

        Ok(Self {
            body,
            direction,
            growth_pending: 0,
        })
    }

    pub fn step(&mut self) {
        let next_head = self.head().offset(self.direction);
        self.body.push_front(next_head);

        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            self.body.pop_back();
        }
    }

    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn grow(&mut self, amount: u32) {
        if amount > 0 {
            self.growth_pending += amount;
        }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body.contains(point)
    }

    /// True when the head shares a cell with any later segment.
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(snake: &Snake) -> Vec<Point> {
        snake.body().copied().collect()
    }

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = Snake::new(Point::new(10, 7), Direction::Right, 3).unwrap();
        assert_eq!(
            body_of(&snake),
            vec![Point::new(10, 7), Point::new(9, 7), Point::new(8, 7)]
        );

        let snake = Snake::new(Point::new(4, 4), Direction::Up, 2).unwrap();
        assert_eq!(body_of(&snake), vec![Point::new(4, 4), Point::new(4, 5)]);
    }

    #[test]
    fn test_new_rejects_zero_length() {
        let result = Snake::new(Point::new(0, 0), Direction::Right, 0);
        assert_eq!(result.unwrap_err(), GameError::InvalidSnakeLength);
    }

    #[test]
    fn test_step_without_growth_keeps_length() {
        let mut snake = Snake::new(Point::new(10, 7), Direction::Right, 3).unwrap();
        snake.step();
        assert_eq!(
            body_of(&snake),
            vec![Point::new(11, 7), Point::new(10, 7), Point::new(9, 7)]
        );
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_step_with_growth_extends_once_per_pending() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Down, 1).unwrap();
        snake.grow(2);

        snake.step();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.growth_pending(), 1);

        snake.step();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.growth_pending(), 0);

        snake.step();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(5, 8));
    }

    #[test]
    fn test_grow_ignores_zero() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Down, 1).unwrap();
        snake.grow(0);
        assert_eq!(snake.growth_pending(), 0);
    }

    #[test]
    fn test_change_direction_rejects_reverse() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 3).unwrap();
        assert!(!snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        assert!(snake.change_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Point::new(5, 5));

        snake.step();
        assert_eq!(snake.head(), Point::new(5, 4));
    }

    #[test]
    fn test_head_overlaps_body_after_tight_turn() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 5).unwrap();
        assert!(!snake.head_overlaps_body());

        snake.change_direction(Direction::Down);
        snake.step();
        snake.change_direction(Direction::Left);
        snake.step();
        snake.change_direction(Direction::Up);
        snake.step();

        assert_eq!(snake.head(), Point::new(4, 5));
        assert!(snake.head_overlaps_body());
    }
}
