use core::fmt;

use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::cell::Cell;
use crate::error::PathError;

/// [Grid] stores whether each cell is blocked ([true]) or open ([false]) in a [BoolGrid] and
/// maintains information about connected components using a [UnionFind] structure, so that
/// searches between disconnected cells can be rejected without flood-filling the grid.
/// Connectivity uses the same 8-neighbourhood as the search.
///
/// Columns run along the [BoolGrid] width (`x`) and rows along its height (`y`).
#[derive(Clone, Debug)]
pub struct Grid {
    grid: BoolGrid,
    components: UnionFind<usize>,
    components_dirty: bool,
}

/// Checks that a grid of the given size is non-empty and addressable by [Point].
fn check_dimensions(rows: usize, cols: usize) -> Result<usize, PathError> {
    if rows == 0 || cols == 0 {
        return Err(PathError::InvalidGrid(format!(
            "grid must have at least one cell, got {rows}x{cols}"
        )));
    }
    if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
        return Err(PathError::InvalidGrid(format!(
            "grid of {rows}x{cols} exceeds the maximum side length of {}",
            i32::MAX
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        PathError::InvalidGrid(format!("grid of {rows}x{cols} cells is too large"))
    })
}

impl Grid {
    /// Creates a grid in which every cell is either blocked or open.
    pub fn new(rows: usize, cols: usize, blocked: bool) -> Result<Grid, PathError> {
        let size = check_dimensions(rows, cols)?;
        let mut grid = Grid {
            grid: BoolGrid::new(cols, rows, blocked),
            components: UnionFind::new(size),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from rows of cell values where `0` is open and anything else is blocked.
    /// All rows must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid, PathError> {
        let rows = rows.iter().map(|row| row.as_ref()).collect::<Vec<&[u8]>>();
        let Some(first) = rows.first() else {
            return Err(PathError::InvalidGrid("grid has no rows".to_owned()));
        };
        let cols = first.len();
        if cols == 0 {
            return Err(PathError::InvalidGrid("grid has no columns".to_owned()));
        }
        if let Some((ix, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(PathError::InvalidGrid(format!(
                "row {ix} has {} columns, expected {cols}",
                row.len()
            )));
        }
        let size = check_dimensions(rows.len(), cols)?;
        let mut bool_grid = BoolGrid::new(cols, rows.len(), false);
        // Both coordinates fit in an i32 after the dimension check
        for (y, row) in (0i32..).zip(rows.iter()) {
            for (x, &value) in (0i32..).zip(row.iter()) {
                bool_grid.set(x, y, value != 0);
            }
        }
        let mut grid = Grid {
            grid: bool_grid,
            components: UnionFind::new(size),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.grid.height
    }

    pub fn cols(&self) -> usize {
        self.grid.width
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.point(cell).is_some()
    }

    /// Whether the cell can be stepped on. Cells outside the grid are not open.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.point(cell).is_some_and(|p| !self.grid.get_point(p))
    }

    /// Whether the cell is inside the grid and blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.point(cell).is_some_and(|p| self.grid.get_point(p))
    }

    /// Open neighbours of a cell in [MOVES](crate::cell::MOVES) order. Diagonal moves may pass
    /// between two blocked cells.
    pub fn open_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.moore_neighborhood().filter(|n| self.is_open(*n))
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// components are (potentially) broken apart into multiple.
    pub fn set(&mut self, cell: Cell, blocked: bool) -> Result<(), PathError> {
        let p = self.point(cell).ok_or_else(|| self.out_of_bounds(cell))?;
        if blocked {
            if !self.grid.get_point(p) {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.grid.get_ix_point(&p);
            for n in p.moore_neighborhood_smallvec() {
                if self.open_point(n) {
                    let n_ix = self.grid.get_ix_point(&n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        self.grid.set(p.x, p.y, blocked);
        Ok(())
    }

    pub fn check_bounds(&self, cell: Cell) -> Result<(), PathError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(self.out_of_bounds(cell))
        }
    }

    /// True if blocking cells may have split components since they were last generated.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Checks if start and goal are on the same component. Only meaningful while the components
    /// are not dirty.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked and out of bounds cells
    /// reach nothing but themselves.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        match (self.point(*start), self.point(*goal)) {
            (Some(s), Some(g)) => !self
                .components
                .equiv(self.grid.get_ix_point(&s), self.grid.get_ix_point(&g)),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.grid.get_ix_point(&point);
                // The remaining four directions are covered from the other side
                let neighbours = [
                    Point::new(point.x, point.y + 1),
                    Point::new(point.x + 1, point.y - 1),
                    Point::new(point.x + 1, point.y),
                    Point::new(point.x + 1, point.y + 1),
                ]
                .into_iter()
                .filter(|p| self.open_point(*p))
                .map(|p| self.grid.get_ix_point(&p))
                .collect::<Vec<usize>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// The in-bounds [Point] of a cell.
    fn point(&self, cell: Cell) -> Option<Point> {
        cell.to_point()
            .filter(|p| self.grid.index_in_bounds(p.x, p.y))
    }

    fn open_point(&self, p: Point) -> bool {
        self.grid.index_in_bounds(p.x, p.y) && !self.grid.get_point(p)
    }

    fn out_of_bounds(&self, cell: Cell) -> PathError {
        PathError::OutOfBounds {
            cell,
            rows: self.rows(),
            cols: self.cols(),
        }
    }
}

/// Checks that every cell of the path is open and that consecutive cells are one move apart.
pub fn is_valid_path(grid: &Grid, path: &[Cell]) -> bool {
    path.iter().all(|c| grid.is_open(*c))
        && path
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(b))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let values = (0..self.cols())
                .map(|col| self.is_blocked(Cell::new(row, col)) as u8)
                .join(" ");
            writeln!(f, "{}", values)?;
        }
        Ok(())
    }
}
