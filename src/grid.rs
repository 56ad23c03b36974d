//! Letter grid validation and case folding.

use crate::error::{GridFindError, Result};

/// Smallest accepted number of rows and columns.
pub const MIN_SIDE: usize = 1;

/// Largest accepted number of rows and columns.
pub const MAX_SIDE: usize = 64;

/// Fold a character to the single case used for indexing and lookups.
///
/// Characters whose lowercase mapping is longer than one character are kept
/// as they are, so a grid cell always maps to exactly one indexed character.
pub fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Fold every character of a word.
pub fn fold_word(word: &str) -> Vec<char> {
    word.chars().map(fold_case).collect()
}

/// A validated, case-folded rectangular grid of letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
}

impl Grid {
    /// Validate and fold a grid from rows that are all present.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows: Vec<Option<&str>> = rows.iter().map(|row| Some(row.as_ref())).collect();
        Self::from_optional_rows(Some(rows.as_slice()))
    }

    /// Validate and fold a grid where the sequence or any row may be absent.
    ///
    /// Checks run in a fixed order: absent grid, row count, each row's
    /// presence and length, then the characters themselves.
    pub fn from_optional_rows<S: AsRef<str>>(rows: Option<&[Option<S>]>) -> Result<Self> {
        let rows = rows.ok_or(GridFindError::NullInput)?;

        if !(MIN_SIDE..=MAX_SIDE).contains(&rows.len()) {
            return Err(GridFindError::row_count(rows.len(), MIN_SIDE, MAX_SIDE));
        }

        let mut expected = None;
        let mut chars = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row
                .as_ref()
                .ok_or_else(|| GridFindError::invalid_row(index, "row is absent"))?;
            let row: Vec<char> = row.as_ref().chars().collect();

            if !(MIN_SIDE..=MAX_SIDE).contains(&row.len()) {
                return Err(GridFindError::invalid_row(
                    index,
                    format!(
                        "length must be between {MIN_SIDE} and {MAX_SIDE}, but it is {}",
                        row.len()
                    ),
                ));
            }

            let expected = *expected.get_or_insert(row.len());
            if row.len() != expected {
                return Err(GridFindError::invalid_row(
                    index,
                    format!(
                        "all rows must have equal length, expected {expected} but it is {}",
                        row.len()
                    ),
                ));
            }

            chars.push(row);
        }

        for (row, line) in chars.iter().enumerate() {
            if let Some(column) = line.iter().position(|c| !c.is_alphabetic()) {
                return Err(GridFindError::NonLetterCharacter {
                    row,
                    column,
                    character: line[column],
                });
            }
        }

        let width = expected.unwrap_or_default();
        let cells = chars
            .into_iter()
            .map(|line| line.into_iter().map(fold_case).collect())
            .collect();

        Ok(Grid { cells, width })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The folded rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// The folded columns, left to right, each read top to bottom.
    pub fn columns(&self) -> Vec<Vec<char>> {
        (0..self.width)
            .map(|column| self.cells.iter().map(|row| row[column]).collect())
            .collect()
    }
}
