use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn neighbors(&self) -> [Point; 4] {
        Direction::ALL.map(|direction| self.offset(direction))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid coordinates; `y` grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoodTier {
    Normal,
    Special,
    Rare,
}

impl FoodTier {
    pub fn growth(&self) -> u32 {
        match self {
            FoodTier::Normal => 1,
            FoodTier::Special => 2,
            FoodTier::Rare => 3,
        }
    }

    pub fn score_for_combo(&self, combo: u32) -> u64 {
        let combo = u64::from(combo);
        match self {
            FoodTier::Normal => 1,
            FoodTier::Special => combo.saturating_mul(combo),
            FoodTier::Rare => combo.saturating_mul(combo).saturating_mul(combo),
        }
    }
}

impl fmt::Display for FoodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodTier::Normal => write!(f, "normal"),
            FoodTier::Special => write!(f, "special"),
            FoodTier::Rare => write!(f, "rare"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub tier: FoodTier,
}

impl Food {
    pub fn new(position: Point, tier: FoodTier) -> Self {
        Self { position, tier }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    HitObstacle,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::HitWall => write!(f, "hit wall"),
            GameOverReason::HitSelf => write!(f, "hit self"),
            GameOverReason::HitObstacle => write!(f, "hit obstacle"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: i32,
    pub height: i32,
}
