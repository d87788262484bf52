//! Short-term memory of recently applied swaps.

use std::collections::VecDeque;

use super::types::TabuMove;

/// Default tabu list capacity for a problem of `dimension` slots.
///
/// One tenth of the dimension above 750 slots, one twentieth otherwise,
/// and never less than one.
pub fn tabu_length(dimension: usize) -> usize {
    let length = if dimension > 750 {
        dimension / 10
    } else {
        dimension / 20
    };
    length.max(1)
}

/// Bounded FIFO of [`TabuMove`]s with an attribute-based tabu test.
///
/// A move is tabu when it touches a slot recorded in the list while that
/// slot still holds the facility it held right after the recorded swap.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    moves: VecDeque<TabuMove>,
    capacity: usize,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` moves (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            moves: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Returns `true` if swapping slots `r` and `s` of `solution` is not tabu.
    pub fn is_allowed(&self, r: usize, s: usize, solution: &[usize]) -> bool {
        !self.moves.iter().any(|mv| {
            (mv.i == r && mv.value_at_i == solution[r])
                || (mv.i == s && mv.value_at_i == solution[s])
                || (mv.j == r && mv.value_at_j == solution[r])
                || (mv.j == s && mv.value_at_j == solution[s])
        })
    }

    /// Appends a move, evicting the oldest entries beyond capacity.
    pub fn record(&mut self, mv: TabuMove) {
        self.moves.push_back(mv);
        while self.moves.len() > self.capacity {
            self.moves.pop_front();
        }
    }

    /// Number of moves currently remembered.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if no move is remembered.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Maximum number of remembered moves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Active moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TabuMove> {
        self.moves.iter()
    }
}
