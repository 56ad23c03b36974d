//! Cross-checks the prefix index against a brute-force scan of random grids.

use gridfind::grid::Grid;
use gridfind::index::PrefixIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_rows(rng: &mut StdRng, height: usize, width: usize, alphabet: &[u8]) -> Vec<String> {
    (0..height)
        .map(|_| {
            (0..width)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
                .collect()
        })
        .collect()
}

/// Count horizontal and vertical starting positions of `word` directly.
fn brute_force_count(rows: &[Vec<char>], word: &[char]) -> usize {
    let height = rows.len();
    let width = rows[0].len();
    let mut count = 0;

    for r in 0..height {
        for c in 0..width {
            if c + word.len() <= width && (0..word.len()).all(|i| rows[r][c + i] == word[i]) {
                count += 1;
            }
            if r + word.len() <= height && (0..word.len()).all(|i| rows[r + i][c] == word[i]) {
                count += 1;
            }
        }
    }

    count
}

#[test]
fn test_counts_match_brute_force_on_random_grids() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..25 {
        let height = rng.random_range(1..=12);
        let width = rng.random_range(1..=12);
        let rows = random_rows(&mut rng, height, width, b"abc");

        let grid = Grid::new(&rows).unwrap();
        let index = PrefixIndex::from_grid(&grid);
        let folded: Vec<Vec<char>> = grid.rows().map(<[char]>::to_vec).collect();

        // Every horizontal and vertical substring, plus a few absent words.
        let mut probes: Vec<Vec<char>> = Vec::new();
        for line in grid.rows().map(<[char]>::to_vec).chain(grid.columns()) {
            for start in 0..line.len() {
                for end in start + 1..=line.len() {
                    probes.push(line[start..end].to_vec());
                }
            }
        }
        probes.push(vec!['d']);
        probes.push(vec!['a'; height.max(width) + 1]);

        for probe in &probes {
            assert_eq!(
                index.count_with_prefix(probe),
                brute_force_count(&folded, probe),
                "grid {rows:?}, probe {probe:?}"
            );
        }
    }
}

#[test]
fn test_index_size_bounded_by_inserted_characters() {
    let mut rng = StdRng::seed_from_u64(42);
    let rows = random_rows(&mut rng, 64, 64, b"abcdefghijklmnopqrstuvwxyz");

    let grid = Grid::new(&rows).unwrap();
    let index = PrefixIndex::from_grid(&grid);

    // 64 rows and 64 columns, 64 suffixes each
    assert_eq!(index.inserted_sequences(), 2 * 64 * 64);

    // Total characters inserted: 128 lines * (64 * 65 / 2)
    assert!(index.node_count() <= 128 * 64 * 65 / 2);
    assert!(index.node_count() > 0);
}

#[test]
fn test_mixed_case_rows_index_like_lowercase() {
    let upper = PrefixIndex::from_grid(&Grid::new(&["ABC", "DEF"]).unwrap());
    let lower = PrefixIndex::from_grid(&Grid::new(&["abc", "def"]).unwrap());

    for probe in ["a", "ab", "abc", "ad", "be", "f", "cf"] {
        let probe: Vec<char> = probe.chars().collect();
        assert_eq!(upper.count_with_prefix(&probe), lower.count_with_prefix(&probe));
    }
}
