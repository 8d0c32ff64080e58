//! Winning-line geometry for a square board of arbitrary side length.
//!
//! Cells are addressed by a flat index in `0..n²`, row-major: cell `i` sits
//! at row `i / n`, column `i % n`. The server never stores a literal grid;
//! the geometry plus the per-player ledgers are enough to decide every
//! outcome.

/// Computes the list of winning cell combinations for an `n`×`n` board.
///
/// Returns rows first, then columns, then the two diagonals (main, then
/// anti), `2n + 2` combinations in total, each of exactly `n` flat indices.
/// The win scan in [`crate::rules::winning_combination`] relies on this
/// construction order.
///
/// The result is computed once when a game is created and frozen on the
/// aggregate; recomputing it mid-game would invalidate in-progress win
/// detection.
///
/// # Examples
///
/// ```
/// use noughts_engine::board::winning_combinations;
///
/// let combos = winning_combinations(3);
/// assert_eq!(combos.len(), 8);
/// assert_eq!(combos[0], vec![0, 1, 2]);          // first row
/// assert_eq!(combos[3], vec![0, 3, 6]);          // first column
/// assert_eq!(combos[6], vec![0, 4, 8]);          // main diagonal
/// assert_eq!(combos[7], vec![2, 4, 6]);          // anti diagonal
/// ```
pub fn winning_combinations(board_size: usize) -> Vec<Vec<usize>> {
    let n = board_size;
    let rows: Vec<Vec<usize>> = (0..n).map(|r| (0..n).map(|c| r * n + c).collect()).collect();
    let columns: Vec<Vec<usize>> = (0..n).map(|c| (0..n).map(|r| r * n + c).collect()).collect();
    let main_diagonal: Vec<usize> = (0..n).map(|i| rows[i][i]).collect();
    let anti_diagonal: Vec<usize> = (0..n).map(|i| rows[i][n - 1 - i]).collect();

    let mut combinations = rows;
    combinations.extend(columns);
    combinations.push(main_diagonal);
    combinations.push(anti_diagonal);
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_size_yields_two_n_plus_two_combinations() {
        for n in 2..=8 {
            let combos = winning_combinations(n);
            assert_eq!(combos.len(), 2 * n + 2, "board size {n}");
            for combo in &combos {
                assert_eq!(combo.len(), n, "board size {n}");
                assert!(combo.iter().all(|&cell| cell < n * n));
            }
        }
    }

    #[test]
    fn combinations_are_distinct() {
        for n in 2..=6 {
            let combos = winning_combinations(n);
            let unique: HashSet<&Vec<usize>> = combos.iter().collect();
            assert_eq!(unique.len(), combos.len(), "board size {n}");
        }
    }

    #[test]
    fn three_by_three_matches_the_classic_lines() {
        let combos = winning_combinations(3);
        let expected: Vec<Vec<usize>> = vec![
            vec![0, 1, 2],
            vec![3, 4, 5],
            vec![6, 7, 8],
            vec![0, 3, 6],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![0, 4, 8],
            vec![2, 4, 6],
        ];
        assert_eq!(combos, expected);
    }
}
