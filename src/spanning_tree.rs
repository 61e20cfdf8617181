pub mod kruskal;
pub mod prim;

pub use kruskal::Kruskal;
pub use prim::Prim;

use crate::graph::{AdjacencyList, Edge, Graph, NodeEdgeList};

/// Node annotation for the spanning-tree snapshots.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct TreeNode {
    pub in_tree: bool,
}

/// Edge annotation; `chosen` marks edges taken into the tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TreeEdge<W> {
    pub weight: W,
    pub chosen: bool,
}

/// Total weight and the edge ids of a minimum spanning forest (one tree per
/// connected component).
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SpanningForestSummary<W> {
    pub total: W,
    pub chosen: Vec<usize>,
}

pub(crate) fn snapshot<W: Copy>(graph: &AdjacencyList<(), W>, in_tree: &[bool], chosen: &[bool]) -> NodeEdgeList<TreeNode, TreeEdge<W>> {
    let nodes = in_tree.iter().map(|&in_tree| TreeNode { in_tree }).collect();
    let edges = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(edge_id, edge)| Edge::new(edge.source, edge.target, TreeEdge { weight: edge.datum, chosen: chosen[edge_id] }))
        .collect();
    NodeEdgeList::new(nodes, edges).unwrap()
}
