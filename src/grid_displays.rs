use itertools::Itertools;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, MazeCell};
use crate::generators::Maze;
use crate::utils::{fnv_hashset, FnvHashSet};

const PASSAGE_EW: &str = "─";
const PASSAGE_NS: &str = " │ ";
const CLOSED_CELL: &str = " · ";

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, cell: &MazeCell, opened: bool) -> String {
        if cell.is_start() {
            String::from(" S ")
        } else if cell.is_end() {
            String::from(" E ")
        } else if opened {
            String::from(" o ")
        } else {
            String::from(CLOSED_CELL)
        }
    }
}

/// Marks the start and end, every other opened cell is an `o`.
#[derive(Debug, Copy, Clone, Default)]
pub struct StartEndPointsDisplay;
impl GridDisplay for StartEndPointsDisplay {}

/// Shows the weight of each opened cell.
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightsDisplay;
impl GridDisplay for WeightsDisplay {
    fn render_cell_body(&self, cell: &MazeCell, opened: bool) -> String {
        if opened {
            format!("{:^3}", cell.weight().value())
        } else {
            String::from(CLOSED_CELL)
        }
    }
}

/// Highlights the cells along a path with `.`, keeping the start and end markers.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, cell: &MazeCell, opened: bool) -> String {
        let on_path = self.on_path_coordinates.contains(&cell.coordinate());
        if on_path && !(cell.is_start() || cell.is_end()) {
            String::from(" . ")
        } else {
            StartEndPointsDisplay.render_cell_body(cell, opened)
        }
    }
}

impl Maze {
    /// Draw the maze as text, top row first.
    ///
    /// Cell bodies come from `displayer`. Passages between cells side by side are drawn as `─`,
    /// passages between rows as `│`.
    pub fn render(&self, displayer: &dyn GridDisplay) -> String {
        let grid = self.grid();
        let rows = grid.iter_row().collect::<Vec<_>>();

        let cell_line = |row: &[Cartesian2DCoordinate]| -> String {
            let mut line = String::new();
            for (index, coord) in row.iter().enumerate() {
                if index > 0 {
                    let west_linked = grid.is_neighbour_linked(*coord, CompassPrimary::West);
                    line.push_str(if west_linked { PASSAGE_EW } else { " " });
                }
                if let Some(cell) = grid.cell(*coord) {
                    line.push_str(&displayer.render_cell_body(cell, self.is_opened(*coord)));
                }
            }
            line
        };

        let passages_below_line = |row: &[Cartesian2DCoordinate]| -> String {
            row.iter()
               .map(|coord| {
                   if grid.is_neighbour_linked(*coord, CompassPrimary::South) {
                       PASSAGE_NS
                   } else {
                       "   "
                   }
               })
               .join(" ")
        };

        let mut output = String::new();
        for (index, row) in rows.iter().enumerate().rev() {
            output.push_str(&cell_line(row));
            output.push('\n');
            if index > 0 {
                output.push_str(&passages_below_line(row));
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(&StartEndPointsDisplay))
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Weight;
    use crate::generators::{MazeConfig, MazeGrowth};
    use crate::grid::MazeGrid;
    use crate::grid_dimensions::RectGridDimensions;
    use crate::units::{ColumnLength, RowLength};

    fn three_by_three_maze() -> Maze {
        let dims = RectGridDimensions::new(RowLength(3), ColumnLength(3)).unwrap();
        let weights = [0, 8, 1,
                       2, 3, 4,
                       5, 6, 7].iter()
                               .map(|&w| Weight::new(w).unwrap())
                               .collect::<Vec<_>>();
        let grid = MazeGrid::with_weights(dims, MazeConfig::default().placement(), &weights).unwrap();
        MazeGrowth::from_grid(grid, Cartesian2DCoordinate::new(0, 0)).unwrap().finish()
    }

    #[test]
    fn start_end_display() {
        let maze = three_by_three_maze();
        let expected = [" o   ·   E ",
                        " │       │ ",
                        " o ─ o ─ o ",
                        " │       │ ",
                        " S   ·   o "];
        assert_eq!(format!("{}", maze), expected.iter().map(|l| format!("{}\n", l)).join(""));
    }

    #[test]
    fn weights_display() {
        let maze = three_by_three_maze();
        let text = maze.render(&WeightsDisplay);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], " 5   ·   7 ");
        assert_eq!(lines[2], " 2 ─ 3 ─ 4 ");
        assert_eq!(lines[4], " 0   ·   1 ");
    }

    #[test]
    fn path_display() {
        let maze = three_by_three_maze();
        let path = maze.solution();
        let text = maze.render(&PathDisplay::new(&path));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], " o   ·   E ");
        assert_eq!(lines[2], " . ─ . ─ . ");
        assert_eq!(lines[4], " S   ·   o ");
    }

    #[test]
    fn single_cell_display() {
        let dims = RectGridDimensions::new(RowLength(1), ColumnLength(1)).unwrap();
        let grid = MazeGrid::with_weights(dims, MazeConfig::default().placement(), &[Weight::new(3).unwrap()]).unwrap();
        let maze = MazeGrowth::from_grid(grid, Cartesian2DCoordinate::new(0, 0)).unwrap().finish();
        // start wins over end
        assert_eq!(format!("{}", maze), " S \n");
    }
}
