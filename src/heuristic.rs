use crate::cell::Cell;

/// Estimate of the remaining number of moves to the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `max(|Δrow|, |Δcol|)`. Exact on an empty grid with unit-cost diagonals, hence admissible
    /// and consistent; paths found with it are shortest.
    #[default]
    Chebyshev,
    /// `|Δrow| + |Δcol|`. Overestimates whenever a diagonal shortcut exists.
    Manhattan,
    /// `|(a.row + a.col) - (b.row + b.col)|`. Not admissible for 8-directional movement (a pure
    /// diagonal move changes the sum by 2), so paths may be longer than necessary.
    CoordinateSum,
}

impl Heuristic {
    pub fn estimate(&self, a: &Cell, b: &Cell) -> usize {
        match self {
            Heuristic::Chebyshev => a.move_distance(b),
            Heuristic::Manhattan => a.row.abs_diff(b.row) + a.col.abs_diff(b.col),
            Heuristic::CoordinateSum => (a.row + a.col).abs_diff(b.row + b.col),
        }
    }
}
