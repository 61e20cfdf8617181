pub mod bfs;
pub mod dfs;

pub use bfs::Bfs;
pub use dfs::Dfs;

use crate::algorithm::{parse_vertex, require_arg, ParameterDescriptor, ParameterKind};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Edge, Graph, NodeEdgeList};

/// Node annotation for the traversal snapshots.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct VisitNode {
    /// Position in the visit sequence, None while unreached.
    pub order: Option<usize>,
}

/// Edge annotation; `tree` marks the edge the vertex was discovered over.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct VisitEdge {
    pub tree: bool,
}

/// Final result of a traversal: node ids in visit order. Nodes outside the
/// root's component do not appear.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TraversalSummary {
    pub order: Vec<usize>,
}

pub(crate) const ROOT_PARAMETER: [ParameterDescriptor; 1] =
    [ParameterDescriptor { name: "root", description: "vertex the traversal starts from", kind: ParameterKind::Vertex }];

pub(crate) fn parse_root<G: Graph>(graph: &G, args: &[&str]) -> Result<usize, EngineError> {
    Ok(parse_vertex("root", require_arg("root", args, 0)?, graph.num_nodes())?)
}

pub(crate) fn snapshot(graph: &AdjacencyList<(), ()>, order: &[Option<usize>], tree: &[bool]) -> NodeEdgeList<VisitNode, VisitEdge> {
    let nodes = order.iter().map(|&order| VisitNode { order }).collect();
    let edges = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(edge_id, edge)| Edge::new(edge.source, edge.target, VisitEdge { tree: tree[edge_id] }))
        .collect();
    NodeEdgeList::new(nodes, edges).unwrap()
}
