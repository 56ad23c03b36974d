//! Prefix index over every horizontal and vertical suffix of a grid.
//!
//! Each node counts how many inserted sequences pass through it, so once
//! every suffix of every row and column has been added, the count reached by
//! walking a word is the number of positions where that word starts.
//!
//! ## Complexity
//! For an `L`×`L` grid the build inserts `O(L³)` characters; a lookup is
//! `O(m)` in the length of the query. Space is bounded by the number of
//! inserted characters.
//!
//! ## Thread Safety
//! The index owns no interior mutability. After the build it is only read,
//! so workers share it by reference.

use ahash::AHashMap;

use crate::grid::Grid;

#[derive(Debug, Default, Clone)]
struct PrefixNode {
    children: AHashMap<char, PrefixNode>,
    count: usize,
}

/// A trie of character prefixes with a running occurrence count per node.
///
/// # Examples
///
/// ```
/// use gridfind::index::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// index.add_suffixes(&['a', 'b', 'a']);
///
/// assert_eq!(index.count_with_prefix(&['a']), 2);
/// assert_eq!(index.count_with_prefix(&['a', 'b']), 1);
/// assert_eq!(index.count_with_prefix(&['c']), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct PrefixIndex {
    root: PrefixNode,
    node_count: usize,
    inserted: usize,
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for a grid from every suffix of its rows and columns.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut index = Self::new();

        for row in grid.rows() {
            index.add_suffixes(row);
        }
        for column in grid.columns() {
            index.add_suffixes(&column);
        }

        index
    }

    /// Count one more occurrence of every prefix of `sequence`.
    pub fn add(&mut self, sequence: &[char]) {
        let mut node = &mut self.root;

        for &c in sequence {
            if !node.children.contains_key(&c) {
                self.node_count += 1;
            }
            node = node.children.entry(c).or_default();
            node.count += 1;
        }

        self.inserted += 1;
    }

    /// Insert every suffix of `sequence`, one per starting position.
    pub fn add_suffixes(&mut self, sequence: &[char]) {
        for start in 0..sequence.len() {
            self.add(&sequence[start..]);
        }
    }

    /// Number of inserted sequences that start with `query`.
    ///
    /// Returns 0 as soon as a character has no matching child. The empty
    /// query reaches the root, whose count is never incremented.
    pub fn count_with_prefix(&self, query: &[char]) -> usize {
        let mut node = &self.root;

        for c in query {
            match node.children.get(c) {
                Some(child) => node = child,
                None => return 0,
            }
        }

        node.count
    }

    /// Number of distinct non-empty prefixes stored.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of sequences passed to [`add`](Self::add).
    pub fn inserted_sequences(&self) -> usize {
        self.inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_add_counts_every_prefix() {
        let mut index = PrefixIndex::new();
        index.add(&chars("chill"));
        index.add(&chars("chin"));

        assert_eq!(index.count_with_prefix(&chars("c")), 2);
        assert_eq!(index.count_with_prefix(&chars("chi")), 2);
        assert_eq!(index.count_with_prefix(&chars("chil")), 1);
        assert_eq!(index.count_with_prefix(&chars("chin")), 1);
        assert_eq!(index.count_with_prefix(&chars("chills")), 0);
        assert_eq!(index.count_with_prefix(&chars("x")), 0);
        assert_eq!(index.inserted_sequences(), 2);
        // c, h, i, l, l, n
        assert_eq!(index.node_count(), 6);
    }

    #[test]
    fn test_empty_query_counts_nothing() {
        let mut index = PrefixIndex::new();
        index.add_suffixes(&chars("abc"));
        assert_eq!(index.count_with_prefix(&[]), 0);
    }

    #[test]
    fn test_overlapping_occurrences_counted_separately() {
        let mut index = PrefixIndex::new();
        index.add_suffixes(&chars("aaaa"));

        assert_eq!(index.count_with_prefix(&chars("a")), 4);
        assert_eq!(index.count_with_prefix(&chars("aa")), 3);
        assert_eq!(index.count_with_prefix(&chars("aaa")), 2);
        assert_eq!(index.count_with_prefix(&chars("aaaa")), 1);
        assert_eq!(index.count_with_prefix(&chars("aaaaa")), 0);
    }

    #[test]
    fn test_from_grid_counts_rows_and_columns() {
        let grid = Grid::new(&["ab", "ba"]).unwrap();
        let index = PrefixIndex::from_grid(&grid);

        // "ab" appears in row 0 and column 0.
        assert_eq!(index.count_with_prefix(&chars("ab")), 2);
        assert_eq!(index.count_with_prefix(&chars("ba")), 2);
        assert_eq!(index.count_with_prefix(&chars("a")), 4);
        assert_eq!(index.count_with_prefix(&chars("aa")), 0);
        // 2 rows + 2 columns, 2 suffixes each
        assert_eq!(index.inserted_sequences(), 8);
    }
}
