use log::{debug, info, warn};

use crate::astar::{astar, SearchLimits};
use crate::cell::Cell;
use crate::error::PathError;
use crate::grid::Grid;
use crate::heuristic::Heuristic;

/// Cost of every move, cardinal or diagonal.
pub const MOVE_COST: usize = 1;

/// Finds shortest paths on a [Grid] with 8-directional unit-cost movement. A [Pathfinder] holds
/// only configuration; all search state is local to a call, so one instance can serve any number
/// of grids and threads.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    pub heuristic: Heuristic,
    pub limits: SearchLimits,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Pathfinder {
        self.heuristic = heuristic;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Pathfinder {
        self.limits = limits;
        self
    }

    /// Computes a path from `start` to `goal`, both included. Consecutive cells are one move
    /// apart; diagonal moves may pass between two blocked cells.
    ///
    /// An empty path means there is no way through, which includes a blocked start or goal.
    /// Endpoints outside the grid are an error.
    pub fn find_path(
        &self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
    ) -> Result<Vec<Cell>, PathError> {
        grid.check_bounds(start)?;
        grid.check_bounds(goal)?;
        if grid.is_blocked(start) || grid.is_blocked(goal) {
            info!("No path from {} to {}: an endpoint is blocked", start, goal);
            return Ok(Vec::new());
        }
        let components_fresh = !grid.components_dirty();
        if components_fresh && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(Vec::new());
        }
        let result = astar(
            &start,
            |cell| {
                grid.open_neighbours(*cell)
                    .map(|n| (n, MOVE_COST))
                    .collect::<Vec<_>>()
            },
            |cell| self.heuristic.estimate(cell, &goal),
            |cell| *cell == goal,
            &self.limits,
        )?;
        match result {
            Some((path, cost)) => {
                debug!("Found path from {} to {} of cost {}", start, goal, cost);
                Ok(path)
            }
            None => {
                if components_fresh {
                    warn!(
                        "{} is reachable from {} but could not be pathed to, are the components correct?",
                        goal, start
                    );
                }
                Ok(Vec::new())
            }
        }
    }

    /// Number of moves along a path.
    pub fn path_cost(path: &[Cell]) -> usize {
        path.len().saturating_sub(1) * MOVE_COST
    }
}
