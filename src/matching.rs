pub mod gabow;
pub mod hungarian;
pub mod kuhn_munkres;

pub use gabow::Gabow;
pub use hungarian::Hungarian;
pub use kuhn_munkres::KuhnMunkres;

/// Edge annotation shared by the matching snapshots. Always recomputed in
/// full from the live match/label arrays before a yield, never patched
/// incrementally.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct MatchEdge {
    /// The edge is part of the current matching.
    pub matched: bool,
    /// The edge was touched by the current search (trail, tree or blossom).
    pub marked: bool,
}

/// Final result of an unweighted matching run.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct MatchingSummary {
    /// Number of matched pairs.
    pub matched: usize,
}

/// Final result of a weighted assignment run.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct AssignmentSummary<W> {
    pub matched: usize,
    pub total: W,
}
