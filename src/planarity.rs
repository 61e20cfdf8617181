pub mod biconnected;
pub mod dmp;
pub mod simplify;

pub use dmp::Dmp;

/// Node annotation for the planarity snapshots.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct PlanarNode {
    pub embedded: bool,
}

/// Edge annotation for the planarity snapshots.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct PlanarEdge {
    pub embedded: bool,
}

/// Final result of a planarity run.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct PlanaritySummary {
    pub planar: bool,
}
