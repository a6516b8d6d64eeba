use crate::games::SessionRng;
use super::types::{Food, FoodTier, Point};
use super::world::World;

/// Tier draws are uniform over `0..TIER_ROLL_RANGE`.
pub const TIER_ROLL_RANGE: u32 = 100;
/// Rolls below this value produce rare food.
pub const RARE_TIER_THRESHOLD: u32 = 30;
/// Rolls below this value (and not rare) produce special food.
pub const SPECIAL_TIER_THRESHOLD: u32 = 60;
pub const DEFAULT_SPAWN_RADIUS: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierThresholds {
    pub rare: u32,
    pub special: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            rare: RARE_TIER_THRESHOLD,
            special: SPECIAL_TIER_THRESHOLD,
        }
    }
}

impl TierThresholds {
    pub fn tier_for_roll(&self, roll: u32) -> FoodTier {
        if roll < self.rare {
            FoodTier::Rare
        } else if roll < self.special {
            FoodTier::Special
        } else {
            FoodTier::Normal
        }
    }
}

#[derive(Clone, Debug)]
pub struct FoodSpawner {
    min_distance: i32,
    thresholds: TierThresholds,
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_RADIUS, TierThresholds::default())
    }
}

impl FoodSpawner {
    pub fn new(min_distance: i32, thresholds: TierThresholds) -> Self {
        Self {
            min_distance: min_distance.max(0),
            thresholds,
        }
    }

    /// Picks a free cell near the snake head, falling back to the whole field.
    /// Returns `None` only when the field has no empty cell left.
    pub fn spawn(&self, world: &World, rng: &mut SessionRng) -> Option<Food> {
        let position = self.choose_position(world, rng)?;
        let tier = self.choose_tier(rng);
        Some(Food::new(position, tier))
    }

    pub fn spawn_multiple(&self, world: &mut World, rng: &mut SessionRng, count: usize) -> Vec<Food> {
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(food) = self.spawn(world, rng) {
                world.add_food(food);
                placed.push(food);
            }
        }
        placed
    }

    fn choose_position(&self, world: &World, rng: &mut SessionRng) -> Option<Point> {
        if let Some(snake) = world.snake() {
            let head = snake.head();
            let nearby = world.empty_points_in(
                head.x.saturating_sub(self.min_distance),
                head.y.saturating_sub(self.min_distance),
                head.x.saturating_add(self.min_distance),
                head.y.saturating_add(self.min_distance),
            );
            if !nearby.is_empty() {
                return Some(nearby[rng.random_range(0..nearby.len())]);
            }
        }

        let all = world.all_empty_points();
        if all.is_empty() {
            return None;
        }
        Some(all[rng.random_range(0..all.len())])
    }

    fn choose_tier(&self, rng: &mut SessionRng) -> FoodTier {
        let roll = rng.random_range(0..TIER_ROLL_RANGE);
        self.thresholds.tier_for_roll(roll)
    }
}
