use petgraph::{Graph, Undirected};
use petgraph::graph;
use rand::Rng;
use std::fmt;
use std::slice;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec,
                   MazeCell, Weight, WorldPosition};
use crate::errors::GenerationError;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIter, BatchIterType, CellIter};
use crate::units::{CellDiameter, ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// Where the grid sits in the world: the outer bottom left corner and the size of one cell.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct GridPlacement {
    pub bottom_left: WorldPosition,
    pub cell_diameter: CellDiameter,
}

impl GridPlacement {
    /// World anchor at the centre of the cell at `coord`.
    pub fn cell_centre(&self, coord: Cartesian2DCoordinate) -> WorldPosition {
        let CellDiameter(d) = self.cell_diameter;
        let radius = d / 2.0;
        WorldPosition::new(self.bottom_left.x + coord.x as f32 * d + radius,
                           self.bottom_left.z + coord.y as f32 * d + radius)
    }
}

/// The cells of one maze plus the passages carved between them.
///
/// Cells are stored in row major order. Every cell is a node in an undirected graph, an edge
/// is a passage between two adjacent cells.
pub struct MazeGrid {
    graph: Graph<(), (), Undirected, u32>,
    dimensions: RectGridDimensions,
    placement: GridPlacement,
    cells: Vec<MazeCell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: graph: {:?}, rows: {:?}, columns: {:?}",
               self.graph, self.rows(), self.columns())
    }
}

impl MazeGrid {
    /// Build a grid where every cell gets a uniformly random weight.
    ///
    /// Weights are drawn column by column (x outer, y inner).
    pub fn random<R: Rng + ?Sized>(dimensions: RectGridDimensions,
                                   placement: GridPlacement,
                                   rng: &mut R)
                                   -> Result<MazeGrid, GenerationError> {

        let mut drawn = BatchIter::new(BatchIterType::Column, &dimensions)
            .flatten()
            .map(|coord| (coord, Weight::random(rng)))
            .collect::<Vec<_>>();
        drawn.sort_by_key(|&(coord, _)| (coord.y, coord.x));

        let row_major_weights = drawn.into_iter().map(|(_, weight)| weight).collect::<Vec<_>>();
        MazeGrid::with_weights(dimensions, placement, &row_major_weights)
    }

    /// Build a grid with known cell weights, given in row major order.
    pub fn with_weights(dimensions: RectGridDimensions,
                        placement: GridPlacement,
                        row_major_weights: &[Weight])
                        -> Result<MazeGrid, GenerationError> {

        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();
        if row_major_weights.len() != nodes {
            return Err(GenerationError::WeightsCountMismatch {
                expected: nodes,
                actual: row_major_weights.len(),
            });
        }

        let cells = CellIter::new(dimensions)
            .zip(row_major_weights.iter().cloned())
            .map(|(coord, weight)| MazeCell::new(coord, placement.cell_centre(coord), weight))
            .collect();

        let mut grid = MazeGrid {
            graph: Graph::with_capacity(nodes, edges),
            dimensions,
            placement,
            cells,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }
        grid.wire_neighbours();

        Ok(grid)
    }

    /// Give each cell its in-bounds neighbours, lightest first.
    fn wire_neighbours(&mut self) {
        let neighbour_lists = self.iter()
            .map(|coord| {
                let mut neighbours = CompassPrimary::NEIGHBOUR_ORDER
                    .iter()
                    .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                    .collect::<CoordinateSmallVec>();
                // stable, so equal weights keep the direction order
                neighbours.sort_by_key(|n| self.weight_at(*n));
                neighbours
            })
            .collect::<Vec<_>>();

        for (cell, neighbours) in self.cells.iter_mut().zip(neighbour_lists) {
            cell.set_neighbours(neighbours);
        }
    }

    fn weight_at(&self, coord: Cartesian2DCoordinate) -> Option<Weight> {
        self.cell(coord).map(MazeCell::weight)
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn placement(&self) -> &GridPlacement {
        &self.placement
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All cells in row major order, bottom row first.
    #[inline]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&MazeCell> {
        self.grid_coordinate_to_index(coord).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut MazeCell> {
        match self.grid_coordinate_to_index(coord) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// A uniformly random cell, picking the column before the row.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let x = rng.gen_range(0..self.columns().0);
        let y = rng.gen_range(0..self.rows().0);
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    /// Link two adjacent cells with a passage.
    pub(crate) fn link(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if !self.is_neighbour(a, b) {
                    return Err(CellLinkError::NotAdjacent);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {

        self.grid_coordinate_graph_index(coord).map(|graph_node_index| {
            self.graph
                .neighbors(graph_node_index)
                .map(|linked| Cartesian2DCoordinate::from_row_major_index(linked.index(), &self.dimensions))
                .collect()
        })
    }

    /// Cells next to a particular cell, whether linked by a passage or not, lightest first.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> &[Cartesian2DCoordinate] {
        self.cell(coord).map(MazeCell::neighbours).unwrap_or(&[])
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        direction.offset_coordinate(coord)
                 .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.grid_coordinate_to_index(coord)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Row, &self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            dimensions: &self.dimensions,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    fn is_neighbour(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self, coord: Cartesian2DCoordinate) -> Option<graph::NodeIndex<u32>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<u32>::new)
    }
}

pub struct LinksIter<'a> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), u32>>,
    dimensions: &'a RectGridDimensions,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let dimensions = self.dimensions;
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(), dimensions);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(), dimensions);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a> ExactSizeIterator for LinksIter<'a> {} // default impl using size_hint()

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
