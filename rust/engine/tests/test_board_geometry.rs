use noughts_engine::board::winning_combinations;
use std::collections::HashSet;

#[test]
fn combination_count_is_two_n_plus_two_for_all_sizes() {
    for n in 2..=10 {
        let combos = winning_combinations(n);
        assert_eq!(combos.len(), 2 * n + 2, "board size {n}");
    }
}

#[test]
fn every_combination_has_n_in_range_cells() {
    for n in 2..=10 {
        for combo in winning_combinations(n) {
            assert_eq!(combo.len(), n);
            assert!(combo.iter().all(|&cell| cell < n * n));
            let unique: HashSet<usize> = combo.iter().copied().collect();
            assert_eq!(unique.len(), n, "cells repeat within a combination");
        }
    }
}

#[test]
fn rows_come_first_then_columns_then_diagonals() {
    let n = 4;
    let combos = winning_combinations(n);
    assert_eq!(combos[0], vec![0, 1, 2, 3]);
    assert_eq!(combos[n], vec![0, 4, 8, 12]);
    assert_eq!(combos[2 * n], vec![0, 5, 10, 15]);
    assert_eq!(combos[2 * n + 1], vec![3, 6, 9, 12]);
}

#[test]
fn two_by_two_board_is_the_smallest_supported() {
    let combos = winning_combinations(2);
    assert_eq!(
        combos,
        vec![
            vec![0, 1],
            vec![2, 3],
            vec![0, 2],
            vec![1, 3],
            vec![0, 3],
            vec![1, 2],
        ]
    );
}
