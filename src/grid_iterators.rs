use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, ColumnLength, ColumnsCount, RowIndex, RowLength, RowsCount};

/// Visits every coordinate of a grid in row major order, bottom row first.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: RectGridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    &self.dimensions);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
pub enum BatchIterType {
    Row,
    Column,
}

/// Visits a grid one whole row (or column) at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    row_length: RowLength,
    rows_size: RowsCount,
    col_length: ColumnLength,
    cols_size: ColumnsCount,
}

impl BatchIter {
    pub fn new(iter_type: BatchIterType, dimensions: &RectGridDimensions) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            row_length: dimensions.row_length(),
            rows_size: dimensions.rows(),
            col_length: dimensions.column_length(),
            cols_size: dimensions.columns(),
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows_size.0,
            BatchIterType::Column => self.cols_size.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.row_length.0)
                    .map(|i| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i), RowIndex(index)))
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.col_length.0)
                    .map(|i| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(index), RowIndex(i)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn dims(w: usize, h: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowLength(w), ColumnLength(h)).unwrap()
    }

    #[test]
    fn cell_iter() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let iter = CellIter::new(dims(2, 2));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<_>>(), &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn row_iter() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let iter = BatchIter::new(BatchIterType::Row, &dims(3, 2));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<Vec<_>>>(),
                   &[vec![gc(0, 0), gc(1, 0), gc(2, 0)],
                     vec![gc(0, 1), gc(1, 1), gc(2, 1)]]);
    }

    #[test]
    fn column_iter() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let iter = BatchIter::new(BatchIterType::Column, &dims(3, 2));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<Vec<_>>>(),
                   &[vec![gc(0, 0), gc(0, 1)],
                     vec![gc(1, 0), gc(1, 1)],
                     vec![gc(2, 0), gc(2, 1)]]);
    }
}
