pub mod adjacency_list;
pub mod adjacency_matrix;
pub mod bipartite;
pub mod edge_list;
pub mod node_edge_list;

pub use adjacency_list::AdjacencyList;
pub use adjacency_matrix::AdjacencyMatrix;
pub use bipartite::{BipartiteGraph, BipartiteMatrix, Side};
pub use edge_list::EdgeList;
pub use node_edge_list::NodeEdgeList;

use crate::error::GraphError;

/// A vertex with a dense, 0-based id that never changes after construction.
#[derive(PartialEq, Debug, Clone)]
pub struct Node<N> {
    pub id: usize,
    pub datum: N,
}

/// A directed or undirected connection between two node ids.
#[derive(PartialEq, Debug, Clone)]
pub struct Edge<E> {
    pub source: usize,
    pub target: usize,
    pub datum: E,
}

impl<E> Edge<E> {
    pub fn new(source: usize, target: usize, datum: E) -> Self {
        Edge { source, target, datum }
    }

    /// The endpoint that is not `u`. `u` must be an endpoint.
    #[inline]
    pub fn other(&self, u: usize) -> usize {
        if self.source == u {
            self.target
        } else {
            self.source
        }
    }
}

/// Anything exposing dense nodes and an edge list over them.
///
/// Accessors return owned copies so that snapshots never alias the live
/// workspace of a running algorithm.
pub trait Graph {
    type NodeDatum: Clone;
    type EdgeDatum: Clone;

    fn num_nodes(&self) -> usize;
    fn nodes(&self) -> Vec<Node<Self::NodeDatum>>;
    fn edges(&self) -> Vec<Edge<Self::EdgeDatum>>;

    fn num_edges(&self) -> usize {
        self.edges().len()
    }
}

pub(crate) fn check_edge_range<E>(num_nodes: usize, edges: &[Edge<E>]) -> Result<(), GraphError> {
    for edge in edges {
        if edge.source >= num_nodes || edge.target >= num_nodes {
            return Err(GraphError::NodeOutOfRange { from: edge.source, to: edge.target, num_nodes });
        }
    }
    Ok(())
}
