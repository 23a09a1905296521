use rand::Rng;
use smallvec::SmallVec;
use std::convert::From;

use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, RowIndex, RowLength};

/// Number of distinct cell weights, weights run from 0 up to `WEIGHTS_COUNT - 1`.
pub const WEIGHTS_COUNT: usize = 9;

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Column (`x`) and row (`y`) of a cell. Row 0 is the bottom edge of the maze.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, dimensions: &RectGridDimensions) -> Cartesian2DCoordinate {
        let RowLength(width) = dimensions.row_length();
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// The order neighbours are gathered in before they are sorted by weight.
    /// Sorting is stable so this order decides between neighbours of equal weight.
    pub const NEIGHBOUR_ORDER: [CompassPrimary; 4] =
        [CompassPrimary::West, CompassPrimary::East, CompassPrimary::South, CompassPrimary::North];

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would be negative; the upper grid bounds are not checked here.
    pub fn offset_coordinate(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            CompassPrimary::North => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => {
                if y > 0 {
                    Some(Cartesian2DCoordinate { x, y: y - 1 })
                } else {
                    None
                }
            }
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => {
                if x > 0 {
                    Some(Cartesian2DCoordinate { x: x - 1, y })
                } else {
                    None
                }
            }
        }
    }
}

/// Growth priority of a cell, lower weights are opened first.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Weight(u8);

impl Weight {
    pub fn new(weight: u8) -> Option<Weight> {
        if (weight as usize) < WEIGHTS_COUNT {
            Some(Weight(weight))
        } else {
            None
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Weight {
        Weight(rng.gen_range(0..WEIGHTS_COUNT as u8))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Which frontier bucket cells of this weight are queued in.
    #[inline]
    pub fn bucket(self) -> usize {
        self.0 as usize
    }
}

/// Anchor of a cell's centre on the ground plane of the world the maze is placed in.
#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct WorldPosition {
    pub x: f32,
    pub z: f32,
}

impl WorldPosition {
    pub fn new(x: f32, z: f32) -> WorldPosition {
        WorldPosition { x, z }
    }
}

#[derive(Clone, Debug)]
pub struct MazeCell {
    coordinate: Cartesian2DCoordinate,
    world_position: WorldPosition,
    weight: Weight,
    neighbours: CoordinateSmallVec,
    open_count: u8,
    is_start: bool,
    is_end: bool,
}

impl MazeCell {
    pub fn new(coordinate: Cartesian2DCoordinate, world_position: WorldPosition, weight: Weight) -> MazeCell {
        MazeCell {
            coordinate,
            world_position,
            weight,
            neighbours: CoordinateSmallVec::new(),
            open_count: 0,
            is_start: false,
            is_end: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn world_position(&self) -> WorldPosition {
        self.world_position
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Adjacent cells ordered by ascending weight.
    #[inline]
    pub fn neighbours(&self) -> &[Cartesian2DCoordinate] {
        &self.neighbours
    }

    /// How many of the neighbouring cells have been opened.
    #[inline]
    pub fn open_count(&self) -> u8 {
        self.open_count
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: CoordinateSmallVec) {
        self.neighbours = neighbours;
    }

    pub(crate) fn increment_open_count(&mut self) {
        self.open_count = self.open_count.saturating_add(1);
    }

    pub(crate) fn mark_start(&mut self) {
        self.is_start = true;
    }

    pub(crate) fn mark_end(&mut self) {
        self.is_end = true;
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn weights_out_of_range_are_rejected() {
        assert_eq!(Weight::new(0).map(Weight::value), Some(0));
        assert_eq!(Weight::new(8).map(Weight::value), Some(8));
        assert_eq!(Weight::new(9), None);
        assert_eq!(Weight::new(u8::MAX), None);
    }

    #[test]
    fn random_weights_cover_every_bucket() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let mut seen = [false; WEIGHTS_COUNT];
        for _ in 0..1000 {
            let w = Weight::random(&mut rng);
            assert!(w.bucket() < WEIGHTS_COUNT);
            seen[w.bucket()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn offset_coordinates() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(CompassPrimary::North.offset_coordinate(gc(0, 0)), Some(gc(0, 1)));
        assert_eq!(CompassPrimary::South.offset_coordinate(gc(0, 0)), None);
        assert_eq!(CompassPrimary::East.offset_coordinate(gc(0, 0)), Some(gc(1, 0)));
        assert_eq!(CompassPrimary::West.offset_coordinate(gc(0, 0)), None);
        assert_eq!(CompassPrimary::South.offset_coordinate(gc(3, 3)), Some(gc(3, 2)));
        assert_eq!(CompassPrimary::West.offset_coordinate(gc(3, 3)), Some(gc(2, 3)));
        assert_eq!(CompassPrimary::North.offset_coordinate(gc(0, u32::MAX)), None);
        assert_eq!(CompassPrimary::East.offset_coordinate(gc(u32::MAX, 0)), None);
    }

    #[test]
    fn new_cell_is_closed() {
        let cell = MazeCell::new(Cartesian2DCoordinate::new(2, 1),
                                 WorldPosition::new(0.5, 1.5),
                                 Weight::new(4).unwrap());
        assert_eq!(cell.coordinate(), Cartesian2DCoordinate::new(2, 1));
        assert_eq!(cell.world_position(), WorldPosition::new(0.5, 1.5));
        assert_eq!(cell.weight().value(), 4);
        assert!(cell.neighbours().is_empty());
        assert_eq!(cell.open_count(), 0);
        assert!(!cell.is_start());
        assert!(!cell.is_end());
    }
}
