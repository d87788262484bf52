//! Immutable problem data consumed by the search engine.

use crate::error::QapError;

/// Partition of facility ids into consecutive groups.
///
/// Group `g` owns the facility ids `[ends[g-1], ends[g])`, with `ends[-1] = 0`.
/// Used to print an assignment as the group of each slot's facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayout {
    ends: Vec<usize>,
}

impl GroupLayout {
    /// Builds a layout from per-group sizes.
    pub fn from_sizes(sizes: &[usize]) -> Self {
        let ends = sizes
            .iter()
            .scan(0usize, |total, &size| {
                *total += size;
                Some(*total)
            })
            .collect();
        Self { ends }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Returns `true` if the layout has no groups.
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Total number of facilities covered by the layout.
    pub fn total(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Group owning `facility`. Empty groups are skipped.
    pub fn group_of(&self, facility: usize) -> usize {
        self.ends.partition_point(|&end| end <= facility)
    }
}

/// A validated QAP instance with sparse slot adjacency.
///
/// The objective of a permutation `p` is
/// `sum over adjacent slots {i, k} of flow[p[i]][p[k]]`.
///
/// # Invariants
///
/// - `dimension >= 1`
/// - `flow` is `dimension x dimension` and symmetric
/// - `k` appears in `adjacency[i]` exactly as often as `i` appears in `adjacency[k]`
/// - no slot is adjacent to itself
#[derive(Debug, Clone)]
pub struct ProblemModel {
    dimension: usize,
    flow: Vec<Vec<i64>>,
    adjacency: Vec<Vec<usize>>,
    groups: Option<GroupLayout>,
}

impl ProblemModel {
    /// Builds a model from a flow matrix and per-slot adjacency lists.
    ///
    /// # Errors
    ///
    /// [`QapError::EmptyDomain`] for a zero-sized flow matrix, and
    /// [`QapError::MalformedProblemData`] when any invariant does not hold.
    pub fn new(flow: Vec<Vec<i64>>, adjacency: Vec<Vec<usize>>) -> Result<Self, QapError> {
        let dimension = flow.len();
        if dimension == 0 {
            return Err(QapError::EmptyDomain);
        }

        for (i, row) in flow.iter().enumerate() {
            if row.len() != dimension {
                return Err(QapError::malformed(format!(
                    "flow row {i} has {} entries, expected {dimension}",
                    row.len()
                )));
            }
        }
        for i in 0..dimension {
            for j in (i + 1)..dimension {
                if flow[i][j] != flow[j][i] {
                    return Err(QapError::malformed(format!(
                        "flow is not symmetric at ({i}, {j}): {} != {}",
                        flow[i][j], flow[j][i]
                    )));
                }
            }
        }

        if adjacency.len() != dimension {
            return Err(QapError::malformed(format!(
                "adjacency covers {} slots, expected {dimension}",
                adjacency.len()
            )));
        }
        for (i, neighbours) in adjacency.iter().enumerate() {
            for &k in neighbours {
                if k >= dimension {
                    return Err(QapError::malformed(format!(
                        "slot {i} lists neighbour {k} outside [0, {dimension})"
                    )));
                }
                if k == i {
                    return Err(QapError::malformed(format!("slot {i} is adjacent to itself")));
                }
            }
        }
        check_adjacency_symmetry(&adjacency)?;

        Ok(Self {
            dimension,
            flow,
            adjacency,
            groups: None,
        })
    }

    /// Builds a model from an undirected edge list.
    pub fn from_edges(flow: Vec<Vec<i64>>, edges: &[(usize, usize)]) -> Result<Self, QapError> {
        let dimension = flow.len();
        let mut adjacency = vec![Vec::new(); dimension];
        for &(a, b) in edges {
            if a >= dimension || b >= dimension {
                return Err(QapError::malformed(format!(
                    "edge ({a}, {b}) outside [0, {dimension})"
                )));
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        Self::new(flow, adjacency)
    }

    /// Attaches a group layout used to label facilities on output.
    pub fn with_groups(mut self, groups: GroupLayout) -> Result<Self, QapError> {
        if groups.total() != self.dimension {
            return Err(QapError::malformed(format!(
                "group sizes sum to {}, expected {}",
                groups.total(),
                self.dimension
            )));
        }
        self.groups = Some(groups);
        Ok(self)
    }

    /// Number of slots (and facilities).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Flow coefficient between facilities `a` and `b`.
    #[inline]
    pub fn flow(&self, a: usize, b: usize) -> i64 {
        self.flow[a][b]
    }

    /// Slots whose pairing with `slot` contributes to the objective.
    #[inline]
    pub fn neighbours(&self, slot: usize) -> &[usize] {
        &self.adjacency[slot]
    }

    /// Number of undirected adjacent pairs.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Output label of a facility: its group id, or the id itself without a layout.
    pub fn label(&self, facility: usize) -> usize {
        match &self.groups {
            Some(groups) => groups.group_of(facility),
            None => facility,
        }
    }
}

fn check_adjacency_symmetry(adjacency: &[Vec<usize>]) -> Result<(), QapError> {
    let sorted: Vec<Vec<usize>> = adjacency
        .iter()
        .map(|neighbours| {
            let mut copy = neighbours.clone();
            copy.sort_unstable();
            copy
        })
        .collect();
    let count = |list: &[usize], value: usize| {
        list.partition_point(|&x| x <= value) - list.partition_point(|&x| x < value)
    };

    for (i, neighbours) in sorted.iter().enumerate() {
        for &k in neighbours {
            if count(neighbours, k) != count(&sorted[k], i) {
                return Err(QapError::malformed(format!(
                    "adjacency is not symmetric between slots {i} and {k}"
                )));
            }
        }
    }
    Ok(())
}
