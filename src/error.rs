//! Error types for the gridfind library.
//!
//! Every fallible operation returns [`GridFindError`]. Grid validation errors
//! are raised while a [`SearchEngine`](crate::search::SearchEngine) is being
//! constructed and leave nothing behind; execution option errors are raised
//! at the start of a `find` call, before any query is evaluated.
//!
//! # Examples
//!
//! ```
//! use gridfind::error::{GridFindError, Result};
//! use gridfind::search::SearchEngine;
//!
//! fn build(rows: &[&str]) -> Result<SearchEngine> {
//!     SearchEngine::new(rows)
//! }
//!
//! match build(&["ab1"]) {
//!     Err(GridFindError::NonLetterCharacter { character, .. }) => assert_eq!(character, '1'),
//!     _ => panic!("expected a non-letter error"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for gridfind operations.
#[derive(Error, Debug)]
pub enum GridFindError {
    /// The grid itself was not provided.
    #[error("Required parameter was not provided: grid is absent")]
    NullInput,

    /// The number of rows is outside the accepted range.
    #[error("Grid row count must be between {min} and {max}, but it is {count}")]
    RowCountOutOfRange { count: usize, min: usize, max: usize },

    /// A row is absent, has a length outside the accepted range, or differs
    /// in length from the first row.
    #[error("Grid row {row} is invalid: {reason}")]
    RaggedOrInvalidRow { row: usize, reason: String },

    /// A grid cell holds something other than an alphabetic letter.
    #[error("Grid must have only letters, found {character:?} at row {row}, column {column}")]
    NonLetterCharacter {
        row: usize,
        column: usize,
        character: char,
    },

    /// The execution options passed to `find` are out of range.
    #[error("Invalid execution configuration: {0}")]
    InvalidExecutionConfig(String),

    /// I/O errors while reading grid or word files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failures of the worker machinery itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with GridFindError.
pub type Result<T> = std::result::Result<T, GridFindError>;

impl GridFindError {
    /// Create a new row count error.
    pub fn row_count(count: usize, min: usize, max: usize) -> Self {
        GridFindError::RowCountOutOfRange { count, min, max }
    }

    /// Create a new invalid row error.
    pub fn invalid_row<S: Into<String>>(row: usize, reason: S) -> Self {
        GridFindError::RaggedOrInvalidRow {
            row,
            reason: reason.into(),
        }
    }

    /// Create a new invalid execution configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        GridFindError::InvalidExecutionConfig(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        GridFindError::Internal(msg.into())
    }

    /// Whether this error was raised while validating the grid.
    pub fn is_grid_error(&self) -> bool {
        matches!(
            self,
            GridFindError::NullInput
                | GridFindError::RowCountOutOfRange { .. }
                | GridFindError::RaggedOrInvalidRow { .. }
                | GridFindError::NonLetterCharacter { .. }
        )
    }
}
