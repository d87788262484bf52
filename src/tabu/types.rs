//! Move descriptors and search events.

/// A swap applied during the tabu phase.
///
/// `value_at_i` and `value_at_j` are the facilities held by slots `i` and
/// `j` right after the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabuMove {
    pub i: usize,
    pub j: usize,
    pub value_at_i: usize,
    pub value_at_j: usize,
}

impl TabuMove {
    /// Records the swap `(i, j)` as already applied to `solution`.
    pub fn applied(solution: &[usize], i: usize, j: usize) -> Self {
        Self {
            i,
            j,
            value_at_i: solution[i],
            value_at_j: solution[j],
        }
    }
}

/// A candidate swap of slots `r` and `s` and the cost it would lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub r: usize,
    pub s: usize,
    pub cost: i64,
}

/// Search phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Best admissible move from a sampled neighbourhood.
    Tabu,
    /// Random walk from the incumbent accepting non-worsening swaps.
    Fallback,
}

/// A new best solution, produced by the engine's iterator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Iteration (1-based) that produced the improvement.
    pub iteration: usize,
    /// Phase the improvement was found in.
    pub phase: Phase,
    /// New best cost.
    pub cost: i64,
    /// New best solution: `solution[slot]` is the facility in `slot`.
    pub solution: Vec<usize>,
}
