//! Error types returned by the matrix builder and the solver.

use thiserror::Error;

/// The input matrix could not be turned into a dancing links structure.
///
/// These are always detected before any node is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The matrix has no columns at all.
    #[error("matrix must have at least one column")]
    NoColumns,
    /// A dense row does not have the same width as the first row.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the matrix.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A sparse row names a column past the width of the matrix.
    #[error("row {row} names column {column}, but the matrix has {num_columns} columns")]
    ColumnOutOfRange {
        /// Index of the offending row.
        row: usize,
        /// The column index that was out of range.
        column: usize,
        /// Width of the matrix.
        num_columns: usize,
    },
    /// A sparse row names the same column more than once.
    #[error("row {row} names column {column} more than once")]
    DuplicateColumn {
        /// Index of the offending row.
        row: usize,
        /// The repeated column index.
        column: usize,
    },
}

/// A search stopped before it was exhausted because a limit from its
/// [`SearchConfig`](crate::SearchConfig) was reached.
///
/// This is distinct from a search that found no (more) solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchAborted {
    /// The budget of visited nodes ran out.
    #[error("search aborted after visiting {limit} nodes")]
    StepLimit {
        /// The configured budget.
        limit: u64,
    },
    /// The wall clock deadline passed.
    #[error("search aborted, deadline exceeded")]
    Deadline,
    /// The cancellation flag was raised.
    #[error("search cancelled")]
    Cancelled,
}
