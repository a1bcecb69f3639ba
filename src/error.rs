use thiserror::Error;

use crate::cell::Cell;

/// Errors reported before or during a search. Not finding a path is not one of them: that is
/// an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("search stopped after reaching the limit of {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("search deadline passed after {expanded} expansions")]
    DeadlineExceeded { expanded: usize },

    #[error("search cancelled after {expanded} expansions")]
    Cancelled { expanded: usize },
}
