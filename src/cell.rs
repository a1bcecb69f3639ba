use core::fmt;

use grid_util::point::Point;

/// The eight unit moves, in the order in which neighbours are generated: the four cardinal
/// directions (right, down, left, up) followed by the four diagonals.
pub const MOVES: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// A position on a grid, identified purely by its row and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// The cell as a [Point] with `x` the column and `y` the row, if both fit in an [i32].
    pub fn to_point(&self) -> Option<Point> {
        Some(Point::new(
            i32::try_from(self.col).ok()?,
            i32::try_from(self.row).ok()?,
        ))
    }

    /// The cell at a [Point], if neither coordinate is negative.
    pub fn from_point(point: Point) -> Option<Cell> {
        Some(Cell {
            row: usize::try_from(point.y).ok()?,
            col: usize::try_from(point.x).ok()?,
        })
    }

    /// Shifts the cell by the given offset, returning [None] if either coordinate would become
    /// negative. Upper bounds are the concern of the grid.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Cell> {
        let p = self.to_point()?;
        Cell::from_point(Point::new(p.x.checked_add(d_col)?, p.y.checked_add(d_row)?))
    }

    /// Neighbours in [MOVES] order.
    pub fn moore_neighborhood(&self) -> impl Iterator<Item = Cell> {
        let cell = *self;
        MOVES
            .into_iter()
            .filter_map(move |(d_row, d_col)| cell.offset(d_row, d_col))
    }

    /// Number of 8-directional unit moves between two cells on an empty grid
    /// ([Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance)).
    pub fn move_distance(&self, other: &Cell) -> usize {
        match (self.to_point(), other.to_point()) {
            (Some(a), Some(b)) => a.move_distance(&b) as usize,
            _ => self
                .row
                .abs_diff(other.row)
                .max(self.col.abs_diff(other.col)),
        }
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.move_distance(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
