//! # gridfind
//!
//! Finds which words of a query stream occur in a letter grid and ranks the
//! most frequent ones.
//!
//! ## Features
//!
//! - Horizontal (left to right) and vertical (top to bottom) matching
//! - Prefix index built once per grid, constant per-word lookups
//! - Bounded top-10 ranking of distinct matches
//! - Sequential or pooled evaluation with 1 to 10 workers
//!
//! ```
//! use gridfind::prelude::*;
//!
//! let engine = SearchEngine::new(&["abcdc", "fgwio", "chill", "pqnsd", "uvdxy", "chill", "chill"])?;
//! let found = engine.find(["cold", "wind", "snow", "chill", "wind"], &FindOptions::pooled(3))?;
//!
//! assert_eq!(found[0], "chill");
//! assert!(!found.contains(&"snow".to_string()));
//! # Ok::<(), gridfind::error::GridFindError>(())
//! ```

pub mod cli;
pub mod error;
pub mod grid;
pub mod index;
pub mod search;
pub mod topk;

pub mod prelude {
    pub use crate::error::{GridFindError, Result};
    pub use crate::grid::Grid;
    pub use crate::index::PrefixIndex;
    pub use crate::search::{Aggregation, ExecutionMode, FindOptions, SearchEngine};
    pub use crate::topk::{BoundedTopK, DEFAULT_TOP_K, RankedWord};
}
