use bit_set::BitSet;
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, error, trace};

use crate::cells::{Cartesian2DCoordinate, CoordinateSmallVec, MazeCell, WorldPosition, WEIGHTS_COUNT};
use crate::errors::GenerationError;
use crate::grid::{GridPlacement, MazeGrid};
use crate::grid_dimensions::RectGridDimensions;
use crate::pathing::{shortest_path, Distances};
use crate::units::{CellDiameter, WorldHeight, WorldWidth};

/// A candidate already touching this many opened cells is never opened itself.
pub const MAX_OPEN_NEIGHBOURS: u8 = 2;

/// Size and placement of the maze in the world.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct MazeConfig {
    pub world_width: WorldWidth,
    pub world_height: WorldHeight,
    pub cell_diameter: CellDiameter,
    /// World position of the centre of the maze.
    pub origin: WorldPosition,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::new(10.0, 10.0, 1.0)
    }
}

impl MazeConfig {
    pub fn new(world_width: f32, world_height: f32, cell_diameter: f32) -> MazeConfig {
        MazeConfig {
            world_width: WorldWidth(world_width),
            world_height: WorldHeight(world_height),
            cell_diameter: CellDiameter(cell_diameter),
            origin: WorldPosition::default(),
        }
    }

    /// How many cells fit along each axis of the world area.
    pub fn dimensions(&self) -> Result<RectGridDimensions, GenerationError> {
        RectGridDimensions::from_world_size(self.world_width, self.world_height, self.cell_diameter)
    }

    pub fn placement(&self) -> GridPlacement {
        let (WorldWidth(w), WorldHeight(h)) = (self.world_width, self.world_height);
        GridPlacement {
            bottom_left: WorldPosition::new(self.origin.x - w / 2.0, self.origin.z - h / 2.0),
            cell_diameter: self.cell_diameter,
        }
    }
}

/// Apply the weighted Prim's style growth to a fresh grid one cell at a time.
///
/// Every cell carries a fixed random weight. Cells next to the opened area wait in one FIFO
/// queue per weight, and the lightest waiting cell is always opened next. A waiting cell that
/// already touches `MAX_OPEN_NEIGHBOURS` opened cells is thrown away instead, which keeps
/// the opened cells a tree of mostly long corridors with the odd fork.
///
/// All the randomness (weights and the start cell) is used up by `initialize`; stepping is
/// deterministic from there on, so animating the growth with `step` gives the same maze as
/// `finish`.
#[derive(Debug)]
pub struct MazeGrowth {
    grid: MazeGrid,
    opened: Vec<Cartesian2DCoordinate>,
    opened_set: BitSet,
    queued: BitSet,
    frontier: [VecDeque<Cartesian2DCoordinate>; WEIGHTS_COUNT],
    start: Cartesian2DCoordinate,
    finished: bool,
}

impl MazeGrowth {
    /// Build a random grid for `config` and open a random start cell.
    pub fn initialize<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<MazeGrowth, GenerationError> {
        let dimensions = config.dimensions()?;
        let grid = MazeGrid::random(dimensions, config.placement(), rng)?;
        let start = grid.random_cell(rng);

        debug!(columns = dimensions.columns().0,
               rows = dimensions.rows().0,
               start = ?start,
               "maze grid built");

        MazeGrowth::from_grid(grid, start)
    }

    /// Start growing from `start` on an already built grid.
    pub fn from_grid(mut grid: MazeGrid, start: Cartesian2DCoordinate) -> Result<MazeGrowth, GenerationError> {
        let cells_count = grid.size();
        grid.cell_mut(start)
            .ok_or(GenerationError::StartOutsideGrid)?
            .mark_start();

        let mut growth = MazeGrowth {
            grid,
            opened: Vec::with_capacity(cells_count),
            opened_set: BitSet::with_capacity(cells_count),
            queued: BitSet::with_capacity(cells_count),
            frontier: Default::default(),
            start,
            finished: false,
        };
        growth.open(start);
        Ok(growth)
    }

    /// Open the next cell.
    ///
    /// Returns false, without changing anything, once there is nothing left to open. The first
    /// time that happens the most recently opened cell becomes the end of the maze.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }

        while let Some(candidate) = self.pop_lightest_candidate() {

            let open_count = self.grid.cell(candidate).map_or(u8::MAX, MazeCell::open_count);
            if open_count >= MAX_OPEN_NEIGHBOURS {
                trace!(cell = ?candidate, open_count, "discarded frontier cell");
                continue;
            }

            // A candidate was queued by an opened neighbour and touches fewer than two, so
            // exactly one neighbour is open: the cell this passage grows from. The two are
            // adjacent cells on the grid so carving the passage cannot fail.
            let parent = self.grid
                .neighbours(candidate)
                .iter()
                .cloned()
                .find(|n| self.is_opened(*n));
            if let Some(parent) = parent {
                if let Err(link_error) = self.grid.link(candidate, parent) {
                    error!(cell = ?candidate, from = ?parent, ?link_error, "failed to carve passage");
                }
            }

            self.open(candidate);
            trace!(cell = ?candidate, from = ?parent, "opened cell");
            return true;
        }

        self.finish_growth();
        false
    }

    /// Run the growth to completion and hand over the finished maze.
    pub fn finish(mut self) -> Maze {
        while self.step() {}

        let start = self.start;
        let end = self.opened.last().cloned().unwrap_or(start);
        Maze {
            grid: self.grid,
            opened: self.opened,
            opened_set: self.opened_set,
            start,
            end,
        }
    }

    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Cells opened so far, in the order they were opened.
    #[inline]
    pub fn opened(&self) -> &[Cartesian2DCoordinate] {
        &self.opened
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_opened(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid.grid_coordinate_to_index(coord).map_or(false, |i| self.opened_set.contains(i))
    }

    /// Front of the lowest weight non-empty frontier queue.
    fn pop_lightest_candidate(&mut self) -> Option<Cartesian2DCoordinate> {
        let candidate = self.frontier
            .iter_mut()
            .find(|bucket| !bucket.is_empty())
            .and_then(VecDeque::pop_front);

        if let Some(index) = candidate.and_then(|c| self.grid.grid_coordinate_to_index(c)) {
            self.queued.remove(index);
        }
        candidate
    }

    fn open(&mut self, coord: Cartesian2DCoordinate) {
        let index = match self.grid.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => return,
        };
        self.opened.push(coord);
        self.opened_set.insert(index);

        let neighbours: CoordinateSmallVec = self.grid.neighbours(coord).iter().cloned().collect();
        for neighbour in neighbours {
            let neighbour_index = match self.grid.grid_coordinate_to_index(neighbour) {
                Some(i) => i,
                None => continue,
            };
            let bucket = match self.grid.cell_mut(neighbour) {
                Some(cell) => {
                    cell.increment_open_count();
                    cell.weight().bucket()
                }
                None => continue,
            };

            if !self.opened_set.contains(neighbour_index) && !self.queued.contains(neighbour_index) {
                self.queued.insert(neighbour_index);
                self.frontier[bucket].push_back(neighbour);
            }
        }
    }

    fn finish_growth(&mut self) {
        let end = self.opened.last().cloned().unwrap_or(self.start);
        if let Some(cell) = self.grid.cell_mut(end) {
            cell.mark_end();
        }
        self.finished = true;

        debug!(opened = self.opened.len(),
               cells = self.grid.size(),
               end = ?end,
               "maze growth finished");
    }
}

/// A fully grown maze. Nothing about it changes after generation.
#[derive(Debug)]
pub struct Maze {
    grid: MazeGrid,
    opened: Vec<Cartesian2DCoordinate>,
    opened_set: BitSet,
    start: Cartesian2DCoordinate,
    end: Cartesian2DCoordinate,
}

impl Maze {
    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// The walkable cells in the order they were opened, starting with the start cell.
    #[inline]
    pub fn opened(&self) -> &[Cartesian2DCoordinate] {
        &self.opened
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Cartesian2DCoordinate {
        self.end
    }

    pub fn start_cell(&self) -> &MazeCell {
        self.opened_cell(0)
    }

    pub fn end_cell(&self) -> &MazeCell {
        self.opened_cell(self.opened.len() - 1)
    }

    fn opened_cell(&self, order: usize) -> &MazeCell {
        let coord = self.opened[order];
        let index = coord.y as usize * self.grid.columns().0 + coord.x as usize;
        &self.grid.cells()[index]
    }

    pub fn is_opened(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid.grid_coordinate_to_index(coord).map_or(false, |i| self.opened_set.contains(i))
    }

    /// Walk through the passages from the start cell to the end cell.
    pub fn solution(&self) -> Vec<Cartesian2DCoordinate> {
        Distances::new(&self.grid, self.start)
            .and_then(|distances| shortest_path(&self.grid, &distances, self.end))
            .unwrap_or_default()
    }
}

/// Keeps the maze settings between runs and the most recently generated maze.
#[derive(Debug, Default)]
pub struct PrimsMazeGenerator {
    config: MazeConfig,
    maze: Option<Maze>,
}

impl PrimsMazeGenerator {
    pub fn new(config: MazeConfig) -> PrimsMazeGenerator {
        PrimsMazeGenerator { config, maze: None }
    }

    /// Replace the world size and cell size, forgetting any previously generated maze.
    pub fn configure(&mut self, world_width: f32, world_height: f32, cell_diameter: f32) {
        self.config = MazeConfig {
            origin: self.config.origin,
            ..MazeConfig::new(world_width, world_height, cell_diameter)
        };
        self.maze = None;
    }

    /// World width used by the next `generate`.
    pub fn set_grid_width(&mut self, world_width: f32) {
        self.config.world_width = WorldWidth(world_width);
    }

    /// World height used by the next `generate`.
    pub fn set_grid_height(&mut self, world_height: f32) {
        self.config.world_height = WorldHeight(world_height);
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Result<RectGridDimensions, GenerationError> {
        self.config.dimensions()
    }

    /// Throw away the previous maze and grow a new one.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Maze, GenerationError> {
        self.maze = None;
        let maze = MazeGrowth::initialize(&self.config, rng)?.finish();
        let maze: &Maze = self.maze.insert(maze);
        Ok(maze)
    }

    /// Start a new maze that the caller grows one `step` at a time.
    pub fn growth<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MazeGrowth, GenerationError> {
        MazeGrowth::initialize(&self.config, rng)
    }

    /// The last generated maze, if any.
    #[inline]
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }
}

/// Generate a maze covering a `world_width` by `world_height` area divided into cells of
/// `cell_diameter`.
pub fn generate<R: Rng + ?Sized>(world_width: f32,
                                 world_height: f32,
                                 cell_diameter: f32,
                                 rng: &mut R)
                                 -> Result<Maze, GenerationError> {
    let config = MazeConfig::new(world_width, world_height, cell_diameter);
    MazeGrowth::initialize(&config, rng).map(MazeGrowth::finish)
}
