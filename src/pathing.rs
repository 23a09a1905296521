use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::MazeGrid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Number of passage steps from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill the passages outwards from `start_coordinate`.
    /// Returns None if the start is not on the grid.
    pub fn new(grid: &MazeGrid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step long, so the first time a cell is reached is also the
        // shortest way there. The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// The cells passed through going from the start of `distances_from_start` to `end_point`,
/// both ends included. None if the end cannot be reached through the passages.
pub fn shortest_path(grid: &MazeGrid,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut current_coord = end_point;
    let mut path = vec![end_point];
    let start = distances_from_start.start();

    while current_coord != start {

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer, the distances do not belong to this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}
