use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::Point;
use super::world::World;

pub const MIN_WALL_LENGTH: usize = 3;
pub const MAX_WALL_LENGTH: usize = 8;
pub const MAX_TRIES_PER_WALL: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wall {
    cells: Vec<Point>,
}

impl Wall {
    pub fn new(cells: Vec<Point>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obstacles {
    walls: Vec<Wall>,
}

impl Obstacles {
    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn cells(&self) -> HashSet<Point> {
        self.walls
            .iter()
            .flat_map(|wall| wall.cells().iter().copied())
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.walls.iter().map(Wall::len).sum()
    }
}

#[derive(Clone, Debug)]
pub struct ObstacleGenerator {
    min_wall_length: usize,
    max_wall_length: usize,
    max_tries_per_wall: usize,
}

impl Default for ObstacleGenerator {
    fn default() -> Self {
        Self::new(MIN_WALL_LENGTH, MAX_WALL_LENGTH, MAX_TRIES_PER_WALL)
    }
}

impl ObstacleGenerator {
    pub fn new(min_wall_length: usize, max_wall_length: usize, max_tries_per_wall: usize) -> Self {
        let min_wall_length = min_wall_length.max(1);
        Self {
            min_wall_length,
            max_wall_length: max_wall_length.max(min_wall_length),
            max_tries_per_wall,
        }
    }

    /// Builds a layout of at most `max_total_cells` wall cells. Every cell is
    /// in bounds, empty in `world`, outside `avoid` and unique in the layout.
    pub fn generate(
        &self,
        world: &World,
        rng: &mut SessionRng,
        max_total_cells: usize,
        avoid: &HashSet<Point>,
    ) -> Obstacles {
        let mut obstacles = Obstacles::default();
        let mut used = HashSet::new();
        let mut remaining = max_total_cells;

        while remaining >= self.min_wall_length {
            let Some(wall) = self.try_generate_wall(world, rng, remaining, avoid, &used) else {
                break;
            };
            remaining -= wall.len();
            used.extend(wall.cells().iter().copied());
            obstacles.add_wall(wall);
        }

        obstacles
    }

    fn try_generate_wall(
        &self,
        world: &World,
        rng: &mut SessionRng,
        remaining: usize,
        avoid: &HashSet<Point>,
        used: &HashSet<Point>,
    ) -> Option<Wall> {
        for _ in 0..self.max_tries_per_wall {
            let horizontal = rng.random_bool();
            let start = Point::new(
                rng.random_range(0..world.width()),
                rng.random_range(0..world.height()),
            );

            let max_length = Self::max_length_from(world, start, horizontal)
                .min(remaining)
                .min(self.max_wall_length);
            if max_length < self.min_wall_length {
                continue;
            }

            let length = rng.random_range(self.min_wall_length..=max_length);
            let cells: Vec<Point> = (0..length as i32)
                .map(|i| {
                    if horizontal {
                        Point::new(start.x + i, start.y)
                    } else {
                        Point::new(start.x, start.y + i)
                    }
                })
                .collect();

            let valid = cells.iter().all(|cell| {
                world.is_empty(cell) && !avoid.contains(cell) && !used.contains(cell)
            });
            if valid {
                return Some(Wall::new(cells));
            }
        }
        None
    }

    fn max_length_from(world: &World, start: Point, horizontal: bool) -> usize {
        if horizontal {
            (world.width() - start.x).max(0) as usize
        } else {
            (world.height() - start.y).max(0) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::{Direction, Food, FoodTier};

    fn assert_layout_valid(world: &World, obstacles: &Obstacles, avoid: &HashSet<Point>) {
        let mut seen = HashSet::new();
        for wall in obstacles.walls() {
            assert!(wall.len() >= MIN_WALL_LENGTH && wall.len() <= MAX_WALL_LENGTH);

            let horizontal = wall.cells().windows(2).all(|w| w[1] == Point::new(w[0].x + 1, w[0].y));
            let vertical = wall.cells().windows(2).all(|w| w[1] == Point::new(w[0].x, w[0].y + 1));
            assert!(horizontal || vertical);

            for cell in wall.cells() {
                assert!(world.in_bounds(cell));
                assert!(world.is_empty(cell));
                assert!(!avoid.contains(cell));
                assert!(seen.insert(*cell), "overlapping wall cell {:?}", cell);
            }
        }
    }

    #[test]
    fn test_generate_respects_bounds_overlap_and_avoid_set() {
        let mut world = World::new(20, 15).unwrap();
        world.set_snake(Snake::new(Point::new(10, 7), Direction::Right, 3).unwrap());
        world.add_food(Food::new(Point::new(3, 3), FoodTier::Normal));

        let avoid: HashSet<Point> = (0..20).map(|x| Point::new(x, 0)).collect();
        let generator = ObstacleGenerator::default();

        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let obstacles = generator.generate(&world, &mut rng, 45, &avoid);
            assert!(obstacles.cell_count() <= 45);
            assert_layout_valid(&world, &obstacles, &avoid);
        }
    }

    #[test]
    fn test_generate_places_walls_on_open_field() {
        let world = World::new(30, 20).unwrap();
        let mut rng = SessionRng::new(7);
        let obstacles = ObstacleGenerator::default().generate(&world, &mut rng, 90, &HashSet::new());
        assert!(!obstacles.walls().is_empty());
        assert_eq!(obstacles.cells().len(), obstacles.cell_count());
    }

    #[test]
    fn test_generate_with_small_budget_is_empty() {
        let world = World::new(20, 15).unwrap();
        let mut rng = SessionRng::new(1);
        let obstacles =
            ObstacleGenerator::default().generate(&world, &mut rng, MIN_WALL_LENGTH - 1, &HashSet::new());
        assert!(obstacles.walls().is_empty());
    }

    #[test]
    fn test_generate_gives_up_when_field_is_blocked() {
        let world = World::new(10, 10).unwrap();
        let avoid: HashSet<Point> = (0..10)
            .flat_map(|x| (0..10).map(move |y| Point::new(x, y)))
            .collect();
        let mut rng = SessionRng::new(3);
        let obstacles = ObstacleGenerator::default().generate(&world, &mut rng, 30, &avoid);
        assert_eq!(obstacles.cell_count(), 0);
    }

    #[test]
    fn test_generate_on_field_too_small_for_walls() {
        let world = World::new(2, 2).unwrap();
        let mut rng = SessionRng::new(3);
        let obstacles = ObstacleGenerator::default().generate(&world, &mut rng, 4, &HashSet::new());
        assert!(obstacles.walls().is_empty());
    }
}
