use std::collections::BTreeSet;

/// Finds the first winning combination fully claimed by one player.
///
/// Scans `combinations` in their construction order (rows, columns, then
/// diagonals — see [`crate::board::winning_combinations`]) and returns the
/// first one whose every cell appears in `claimed`. In well-formed play a
/// move can complete at most one fresh combination, but the scan does not
/// assume this; it simply takes the first match and stops.
///
/// # Arguments
///
/// * `combinations` - The frozen geometry computed at game creation
/// * `claimed` - The candidate player's claimed cells, any order
///
/// # Examples
///
/// ```
/// use noughts_engine::board::winning_combinations;
/// use noughts_engine::rules::winning_combination;
///
/// let combos = winning_combinations(3);
/// assert_eq!(
///     winning_combination(&combos, &[2, 0, 1]),
///     Some([0, 1, 2].as_slice())
/// );
/// assert_eq!(winning_combination(&combos, &[0, 1, 5]), None);
/// ```
pub fn winning_combination<'a>(
    combinations: &'a [Vec<usize>],
    claimed: &[usize],
) -> Option<&'a [usize]> {
    combinations
        .iter()
        .map(Vec::as_slice)
        .find(|combo| combo.iter().all(|cell| claimed.contains(cell)))
}

/// Whether the game is tied: every cell claimed and nobody won.
///
/// The caller checks for a win first; this predicate only decides board
/// exhaustion. Cross-player uniqueness and range checks in the ledger make
/// "all cells claimed" equivalent to "the union covers `0..cells`".
pub fn is_tied(all_claimed: &BTreeSet<usize>, cells: usize) -> bool {
    all_claimed.len() == cells
}
