use std::u32;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::GenerationError;
use crate::units::{CellDiameter, ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength,
                   RowsCount, WorldHeight, WorldWidth};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    /// Dimensions of a grid with `row_width` cells per row and `column_height` cells per column.
    ///
    /// Fails with `EmptyGrid` if either length is 0 and with `InvalidDimensions` if the cell count
    /// cannot be addressed with 32 bit coordinates.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<RectGridDimensions, GenerationError> {
        let (RowLength(w), ColumnLength(h)) = (row_width, column_height);
        if w == 0 || h == 0 {
            return Err(GenerationError::EmptyGrid);
        }
        match w.checked_mul(h) {
            Some(cells) if cells <= u32::MAX as usize => Ok(RectGridDimensions { row_width, column_height }),
            _ => Err(GenerationError::InvalidDimensions),
        }
    }

    /// Divide a world area into cells of `cell_diameter`, rounding each axis to the nearest whole
    /// cell. Halfway cases round to the even count.
    pub fn from_world_size(width: WorldWidth,
                           height: WorldHeight,
                           cell_diameter: CellDiameter)
                           -> Result<RectGridDimensions, GenerationError> {

        let (WorldWidth(w), WorldHeight(h), CellDiameter(d)) = (width, height, cell_diameter);
        let is_positive = |v: f32| v.is_finite() && v > 0.0;
        if !(is_positive(w) && is_positive(h) && is_positive(d)) {
            return Err(GenerationError::InvalidDimensions);
        }

        let cells_across = |length: f32| -> Result<usize, GenerationError> {
            let count = (length / d).round_ties_even();
            if count.is_finite() && count <= u32::MAX as f32 {
                Ok(count as usize)
            } else {
                Err(GenerationError::InvalidDimensions)
            }
        };

        RectGridDimensions::new(RowLength(cells_across(w)?), ColumnLength(cells_across(h)?))
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Node count and an upper bound on the number of passages between adjacent cells.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        let (w, h) = (self.row_width.0, self.column_height.0);
        let edges_count_hint = (w - 1) * h + w * (h - 1);
        (cells_count, EdgesCount(edges_count_hint))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0...size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some((coord.y as usize * self.row_width.0) + coord.x as usize)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn world(w: f32, h: f32, d: f32) -> Result<RectGridDimensions, GenerationError> {
        RectGridDimensions::from_world_size(WorldWidth(w), WorldHeight(h), CellDiameter(d))
    }

    #[test]
    fn world_size_divided_into_cells() {
        let dims = world(10.0, 6.0, 1.0).unwrap();
        assert_eq!(dims.columns(), ColumnsCount(10));
        assert_eq!(dims.rows(), RowsCount(6));
        assert_eq!(dims.size(), NodesCount(60));

        let dims = world(10.0, 10.0, 2.0).unwrap();
        assert_eq!(dims.row_length(), RowLength(5));
        assert_eq!(dims.column_length(), ColumnLength(5));
    }

    #[test]
    fn cell_counts_round_to_nearest_even_on_ties() {
        let dims = world(2.5, 3.5, 1.0).unwrap();
        assert_eq!(dims.row_length(), RowLength(2));
        assert_eq!(dims.column_length(), ColumnLength(4));

        let dims = world(2.6, 3.4, 1.0).unwrap();
        assert_eq!(dims.row_length(), RowLength(3));
        assert_eq!(dims.column_length(), ColumnLength(3));
    }

    #[test]
    fn invalid_world_sizes() {
        assert_eq!(world(0.0, 5.0, 1.0), Err(GenerationError::InvalidDimensions));
        assert_eq!(world(5.0, -1.0, 1.0), Err(GenerationError::InvalidDimensions));
        assert_eq!(world(5.0, 5.0, 0.0), Err(GenerationError::InvalidDimensions));
        assert_eq!(world(std::f32::NAN, 5.0, 1.0), Err(GenerationError::InvalidDimensions));
        assert_eq!(world(5.0, std::f32::INFINITY, 1.0), Err(GenerationError::InvalidDimensions));
        assert_eq!(world(1.0e30, 1.0e30, 1.0e-10), Err(GenerationError::InvalidDimensions));
    }

    #[test]
    fn tiny_world_is_an_empty_grid() {
        assert_eq!(world(0.4, 5.0, 1.0), Err(GenerationError::EmptyGrid));
        assert_eq!(RectGridDimensions::new(RowLength(0), ColumnLength(3)),
                   Err(GenerationError::EmptyGrid));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let dims = RectGridDimensions::new(RowLength(3), ColumnLength(2)).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let indices = [gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1)]
            .iter()
            .map(|c| dims.grid_coordinate_to_index(*c))
            .collect::<Vec<_>>();
        assert_eq!(indices, (0..6).map(Some).collect::<Vec<_>>());

        assert_eq!(dims.grid_coordinate_to_index(gc(3, 0)), None);
        assert_eq!(dims.grid_coordinate_to_index(gc(0, 2)), None);
        assert_eq!(dims.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);

        for i in 0..6 {
            let coord = Cartesian2DCoordinate::from_row_major_index(i, &dims);
            assert_eq!(dims.grid_coordinate_to_index(coord), Some(i));
        }
    }

    #[test]
    fn graph_size_counts_adjacent_pairs() {
        let dims = RectGridDimensions::new(RowLength(3), ColumnLength(2)).unwrap();
        assert_eq!(dims.graph_size(), (NodesCount(6), EdgesCount(7)));
        let single = RectGridDimensions::new(RowLength(1), ColumnLength(1)).unwrap();
        assert_eq!(single.graph_size(), (NodesCount(1), EdgesCount(0)));
    }
}
