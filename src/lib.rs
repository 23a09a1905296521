//! **prims_maze** grows mazes over a grid of randomly weighted cells with a Prim's style
//! algorithm, for games and visualisations that place their own pieces on the opened cells.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod units;
mod utils;

pub use crate::errors::GenerationError;
pub use crate::generators::{generate, Maze, MazeConfig, MazeGrowth, PrimsMazeGenerator};
