use super::types::Point;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidDimensions { width: i32, height: i32 },
    InvalidSnakeLength,
    SnakeOutOfBounds { segment: Point },
    InvalidSettings(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidDimensions { width, height } => {
                write!(f, "Invalid field dimensions: {}x{}", width, height)
            }
            GameError::InvalidSnakeLength => write!(f, "Snake length must be at least 1"),
            GameError::SnakeOutOfBounds { segment } => {
                write!(f, "Snake segment ({}, {}) is outside the field", segment.x, segment.y)
            }
            GameError::InvalidSettings(message) => write!(f, "Invalid settings: {}", message),
        }
    }
}

impl std::error::Error for GameError {}
