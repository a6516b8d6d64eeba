use std::collections::{HashSet, VecDeque};

use super::types::Point;
use super::world::World;

pub const MIN_REACHABLE_CELLS: usize = 10;

/// Cells reachable from the snake head over the 4-neighbourhood, head
/// included. Snake and obstacle cells block, food does not.
pub fn reachable_cell_count(world: &World) -> usize {
    let Some(snake) = world.snake() else {
        return 0;
    };
    let head = snake.head();
    if !world.in_bounds(&head) {
        return 0;
    }

    let mut visited = HashSet::from([head]);
    let mut queue = VecDeque::from([head]);
    let mut reachable = 0;

    while let Some(current) = queue.pop_front() {
        reachable += 1;
        for neighbor in current.neighbors() {
            if is_walkable(world, &neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    reachable
}

pub fn is_connected(world: &World) -> bool {
    if world.snake().is_none() {
        return false;
    }
    let required = MIN_REACHABLE_CELLS.min(world.empty_cell_count());
    reachable_cell_count(world) >= required
}

fn is_walkable(world: &World, point: &Point) -> bool {
    if !world.in_bounds(point) || world.is_obstacle(point) {
        return false;
    }
    world.snake().is_none_or(|snake| !snake.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::obstacles::{Obstacles, Wall};
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::{Direction, Food, FoodTier};

    fn boxed_in_world() -> World {
        let mut world = World::new(20, 15).unwrap();
        world.set_snake(Snake::new(Point::new(2, 1), Direction::Right, 2).unwrap());

        let mut obstacles = Obstacles::default();
        obstacles.add_wall(Wall::new((0..5).map(|x| Point::new(x, 2)).collect()));
        obstacles.add_wall(Wall::new((0..2).map(|y| Point::new(4, y)).collect()));
        world.set_obstacles(obstacles);
        world
    }

    #[test]
    fn test_open_field_is_fully_reachable() {
        let mut world = World::new(20, 15).unwrap();
        world.set_snake(Snake::new(Point::new(10, 7), Direction::Right, 3).unwrap());
        assert_eq!(reachable_cell_count(&world), 20 * 15 - 2);
        assert!(is_connected(&world));
    }

    #[test]
    fn test_pocket_below_threshold_is_rejected() {
        let world = boxed_in_world();
        // Pocket: rows 0..=1, columns 0..=3, minus the tail segment at (1, 1).
        assert_eq!(reachable_cell_count(&world), 7);
        assert!(!is_connected(&world));
    }

    #[test]
    fn test_food_does_not_block() {
        let mut world = boxed_in_world();
        world.add_food(Food::new(Point::new(3, 1), FoodTier::Normal));
        world.add_food(Food::new(Point::new(3, 0), FoodTier::Rare));
        assert_eq!(reachable_cell_count(&world), 7);
    }

    #[test]
    fn test_threshold_shrinks_on_nearly_full_field() {
        let mut world = World::new(4, 1).unwrap();
        world.set_snake(Snake::new(Point::new(0, 0), Direction::Right, 1).unwrap());
        assert_eq!(world.empty_cell_count(), 3);
        assert_eq!(reachable_cell_count(&world), 4);
        assert!(is_connected(&world));
    }

    #[test]
    fn test_without_snake_nothing_is_connected() {
        let world = World::new(5, 5).unwrap();
        assert_eq!(reachable_cell_count(&world), 0);
        assert!(!is_connected(&world));
    }
}
