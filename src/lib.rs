//! # grid_astar
//!
//! Shortest paths on a 2D grid of open and blocked cells using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with 8-directional movement, where
//! diagonal moves cost the same as straight ones. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{find_path, Cell, Grid};
//!
//! let grid = Grid::from_rows(&[[0u8, 0, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
//! let path = find_path(&grid, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
//! assert_eq!(path.first(), Some(&Cell::new(0, 0)));
//! assert_eq!(path.last(), Some(&Cell::new(2, 0)));
//! ```
//!
//! Not finding a path is not an error: the returned path is simply empty.
pub mod astar;
pub mod cell;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod pathfinder;

pub use astar::SearchLimits;
pub use cell::Cell;
pub use error::PathError;
pub use grid::{is_valid_path, Grid};
pub use heuristic::Heuristic;
pub use pathfinder::Pathfinder;

/// Computes a path with the default [Pathfinder] configuration: the
/// [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) as heuristic and no
/// search limits.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
    Pathfinder::default().find_path(grid, start, goal)
}
