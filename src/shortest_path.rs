pub mod bellman_ford;
pub mod dijkstra;

pub use bellman_ford::BellmanFord;
pub use dijkstra::Dijkstra;

use crate::algorithm::{parse_vertex, require_arg, ParameterDescriptor, ParameterKind};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Edge, Graph, NodeEdgeList};

/// Node annotation: the best distance found so far, and whether it is final.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct DistanceNode<W> {
    pub distance: Option<W>,
    pub settled: bool,
}

/// Edge annotation; `tree` marks the predecessor edge of the current
/// shortest-path tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct WeightedEdge<W> {
    pub weight: W,
    pub tree: bool,
}

/// Distances from the source, indexed by node id; None for unreachable nodes.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ShortestPathSummary<W> {
    pub distances: Vec<Option<W>>,
}

pub(crate) const SOURCE_PARAMETER: [ParameterDescriptor; 1] =
    [ParameterDescriptor { name: "source", description: "vertex distances are measured from", kind: ParameterKind::Vertex }];

pub(crate) fn parse_source<G: Graph>(graph: &G, args: &[&str]) -> Result<usize, EngineError> {
    Ok(parse_vertex("source", require_arg("source", args, 0)?, graph.num_nodes())?)
}

pub(crate) fn snapshot<W: Copy>(
    graph: &AdjacencyList<(), W>,
    distances: &[Option<W>],
    settled: &[bool],
    tree_edge: &[Option<usize>],
) -> NodeEdgeList<DistanceNode<W>, WeightedEdge<W>> {
    let nodes = distances
        .iter()
        .enumerate()
        .map(|(u, &distance)| DistanceNode { distance, settled: settled.get(u).copied().unwrap_or(false) })
        .collect();
    let mut tree = vec![false; graph.num_edges()];
    for &predecessor in tree_edge {
        if let Some(edge_id) = predecessor {
            tree[edge_id] = true;
        }
    }
    let edges = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(edge_id, edge)| Edge::new(edge.source, edge.target, WeightedEdge { weight: edge.datum, tree: tree[edge_id] }))
        .collect();
    NodeEdgeList::new(nodes, edges).unwrap()
}
