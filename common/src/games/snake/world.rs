use std::collections::HashSet;

use super::error::GameError;
use super::obstacles::Obstacles;
use super::snake::Snake;
use super::types::{FieldSize, Food, Point};

#[derive(Clone, Debug)]
pub struct World {
    field_size: FieldSize,
    snake: Option<Snake>,
    foods: Vec<Food>,
    obstacles: Obstacles,
    obstacle_cells: HashSet<Point>,
}

impl World {
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }

        Ok(Self {
            field_size: FieldSize { width, height },
            snake: None,
            foods: Vec::new(),
            obstacles: Obstacles::default(),
            obstacle_cells: HashSet::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.field_size.width
    }

    pub fn height(&self) -> i32 {
        self.field_size.height
    }

    pub fn field_size(&self) -> &FieldSize {
        &self.field_size
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.x < self.field_size.width
            && point.y >= 0
            && point.y < self.field_size.height
    }

    pub fn is_occupied(&self, point: &Point) -> bool {
        if !self.in_bounds(point) {
            return true;
        }
        if let Some(snake) = &self.snake
            && snake.contains(point)
        {
            return true;
        }
        self.food_at(point).is_some() || self.obstacle_cells.contains(point)
    }

    pub fn is_empty(&self, point: &Point) -> bool {
        self.in_bounds(point) && !self.is_occupied(point)
    }

    /// Empty cells inside the inclusive rectangle, clamped to the field.
    pub fn empty_points_in(&self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Vec<Point> {
        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(self.field_size.width - 1);
        let max_y = max_y.min(self.field_size.height - 1);

        let mut result = Vec::new();
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let point = Point::new(x, y);
                if self.is_empty(&point) {
                    result.push(point);
                }
            }
        }
        result
    }

    pub fn all_empty_points(&self) -> Vec<Point> {
        self.empty_points_in(0, 0, self.field_size.width - 1, self.field_size.height - 1)
    }

    pub fn empty_cell_count(&self) -> usize {
        self.all_empty_points().len()
    }

    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = Some(snake);
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn snake_mut(&mut self) -> Option<&mut Snake> {
        self.snake.as_mut()
    }

    pub fn add_food(&mut self, food: Food) {
        self.foods.push(food);
    }

    pub fn remove_food_at(&mut self, point: &Point) -> Option<Food> {
        let index = self.foods.iter().position(|food| food.position == *point)?;
        Some(self.foods.remove(index))
    }

    pub fn clear_foods(&mut self) {
        self.foods.clear();
    }

    pub fn food_at(&self, point: &Point) -> Option<&Food> {
        self.foods.iter().find(|food| food.position == *point)
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Installs a new layout and hands back the one it replaced.
    pub fn set_obstacles(&mut self, obstacles: Obstacles) -> Obstacles {
        self.obstacle_cells = obstacles.cells();
        std::mem::replace(&mut self.obstacles, obstacles)
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn is_obstacle(&self, point: &Point) -> bool {
        self.obstacle_cells.contains(point)
    }
}
