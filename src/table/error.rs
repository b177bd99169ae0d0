//! Table error types.

use thiserror::Error;

/// Errors raised while loading or sorting a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The requested column does not exist in the header row.
    #[error("column {column} is out of range (table has {columns} columns)")]
    ColumnOutOfRange {
        /// The requested column index.
        column: usize,
        /// Number of header columns.
        columns: usize,
    },

    /// A body row is too short to hold a value for the requested column.
    #[error("row {row} has no cell for column {column} (row has {len} cells)")]
    CellOutOfRange {
        /// Position of the offending row.
        row: usize,
        /// The requested column index.
        column: usize,
        /// Number of cells in the row.
        len: usize,
    },

    /// The table document could not be read.
    #[error("failed to read table: {0}")]
    Read(#[from] std::io::Error),

    /// The table document is not valid JSON or has the wrong shape.
    #[error("invalid table document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
