use crate::errors::MoveError;
use crate::game::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Per-player record of claimed board cells.
///
/// One ordered sequence per participant, initially empty. The ledger owns the
/// two cell-level invariants: a cell index appears in at most one player's
/// sequence across the whole game, and every recorded index lies in
/// `0..cells`. Turn order and game-over gating are the aggregate's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveLedger {
    /// Total cell count of the board (`board_size²`), the exclusive upper
    /// bound for valid indices.
    cells: usize,
    moves: HashMap<PlayerId, Vec<usize>>,
}

impl MoveLedger {
    /// Creates a ledger for `cells` board cells with an empty sequence for
    /// every participant.
    pub fn new(cells: usize, participants: &[PlayerId]) -> Self {
        let moves = participants
            .iter()
            .map(|player| (player.clone(), Vec::new()))
            .collect();
        Self { cells, moves }
    }

    /// Appends `cell` to `player`'s sequence.
    ///
    /// Fails with [`MoveError::OutOfRange`] for an index outside the board
    /// and [`MoveError::AlreadyClaimed`] for a cell present in any player's
    /// sequence, the submitter's own included. Callers pass a participant;
    /// an unknown player id would get a fresh sequence.
    pub fn record(&mut self, player: &PlayerId, cell: usize) -> Result<(), MoveError> {
        if cell >= self.cells {
            return Err(MoveError::OutOfRange {
                cell,
                cells: self.cells,
            });
        }
        if self.is_claimed(cell) {
            return Err(MoveError::AlreadyClaimed { cell });
        }
        self.moves.entry(player.clone()).or_default().push(cell);
        Ok(())
    }

    /// Whether any player has claimed `cell`.
    pub fn is_claimed(&self, cell: usize) -> bool {
        self.moves.values().any(|cells| cells.contains(&cell))
    }

    /// Union of every player's claimed cells, for tie detection.
    pub fn all_claimed(&self) -> BTreeSet<usize> {
        self.moves.values().flatten().copied().collect()
    }

    /// The cells `player` has claimed, in the order they were played.
    pub fn cells_for(&self, player: &PlayerId) -> &[usize] {
        self.moves.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of moves `player` has made, for the high-score record.
    pub fn count_for(&self, player: &PlayerId) -> usize {
        self.cells_for(player).len()
    }

    /// Read view of the whole mapping, for state representations.
    pub fn entries(&self) -> &HashMap<PlayerId, Vec<usize>> {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_ledger() -> MoveLedger {
        MoveLedger::new(9, &["alice".to_string(), "bob".to_string()])
    }

    #[test]
    fn starts_with_an_empty_sequence_per_participant() {
        let ledger = two_player_ledger();
        assert_eq!(ledger.entries().len(), 2);
        assert_eq!(ledger.count_for(&"alice".to_string()), 0);
        assert!(ledger.all_claimed().is_empty());
    }

    #[test]
    fn record_enforces_cross_player_uniqueness() {
        let mut ledger = two_player_ledger();
        let alice = "alice".to_string();
        let bob = "bob".to_string();

        ledger.record(&alice, 4).expect("first claim");
        assert_eq!(
            ledger.record(&bob, 4),
            Err(MoveError::AlreadyClaimed { cell: 4 })
        );
        // Rejection is idempotent regardless of who retries.
        assert_eq!(
            ledger.record(&alice, 4),
            Err(MoveError::AlreadyClaimed { cell: 4 })
        );
        assert_eq!(ledger.cells_for(&bob), &[] as &[usize]);
    }

    #[test]
    fn record_rejects_out_of_range_cells() {
        let mut ledger = two_player_ledger();
        assert_eq!(
            ledger.record(&"alice".to_string(), 9),
            Err(MoveError::OutOfRange { cell: 9, cells: 9 })
        );
    }

    #[test]
    fn sequences_keep_play_order() {
        let mut ledger = two_player_ledger();
        let alice = "alice".to_string();
        for cell in [8, 0, 5] {
            ledger.record(&alice, cell).expect("claim");
        }
        assert_eq!(ledger.cells_for(&alice), &[8, 0, 5]);
        assert_eq!(ledger.count_for(&alice), 3);
    }
}
