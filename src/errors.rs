use std::error::Error;
use std::fmt;

/// Reasons a maze cannot be generated from the requested dimensions or prepared grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    /// World width/height or cell diameter is zero, negative or not a finite number.
    InvalidDimensions,
    /// The dimensions are valid numbers but round down to a grid without cells.
    EmptyGrid,
    /// A prepared grid needs exactly one weight per cell.
    WeightsCountMismatch { expected: usize, actual: usize },
    /// The requested start cell is not on the grid.
    StartOutsideGrid,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::InvalidDimensions => {
                write!(f, "maze width, height and cell diameter must be positive finite numbers")
            }
            GenerationError::EmptyGrid => write!(f, "maze dimensions leave no room for a single cell"),
            GenerationError::WeightsCountMismatch { expected, actual } => {
                write!(f, "expected {} cell weights, got {}", expected, actual)
            }
            GenerationError::StartOutsideGrid => write!(f, "maze start cell is outside the grid"),
        }
    }
}

impl Error for GenerationError {}
