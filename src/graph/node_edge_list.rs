use crate::error::GraphError;
use crate::graph::{check_edge_range, Edge, Graph, Node};

/// Flat node array plus flat edge array. The representation every Step
/// snapshot is reported in, and the generic passthrough for conversions.
#[derive(PartialEq, Debug, Clone)]
pub struct NodeEdgeList<N, E> {
    nodes: Vec<N>,
    edges: Vec<Edge<E>>,
}

impl<N, E> NodeEdgeList<N, E>
where
    N: Clone,
    E: Clone,
{
    pub fn new(nodes: Vec<N>, edges: Vec<Edge<E>>) -> Result<Self, GraphError> {
        check_edge_range(nodes.len(), &edges)?;
        Ok(NodeEdgeList { nodes, edges })
    }

    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: Graph<NodeDatum = N, EdgeDatum = E>,
    {
        NodeEdgeList {
            nodes: graph.nodes().into_iter().map(|n| n.datum).collect(),
            edges: graph.edges(),
        }
    }
}

impl<N, E> Graph for NodeEdgeList<N, E>
where
    N: Clone,
    E: Clone,
{
    type NodeDatum = N;
    type EdgeDatum = E;

    #[inline]
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self) -> Vec<Node<N>> {
        self.nodes.iter().enumerate().map(|(id, datum)| Node { id, datum: datum.clone() }).collect()
    }

    fn edges(&self) -> Vec<Edge<E>> {
        self.edges.clone()
    }
}
