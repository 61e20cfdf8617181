use crate::error::GraphError;
use crate::graph::{check_edge_range, Edge, Graph, Node};

/// Node count plus edge array; the nodes themselves carry no payload.
/// The input shape for flow networks and Kruskal.
#[derive(PartialEq, Debug, Clone)]
pub struct EdgeList<E> {
    num_nodes: usize,
    edges: Vec<Edge<E>>,
}

impl<E> EdgeList<E>
where
    E: Clone,
{
    pub fn new(num_nodes: usize, edges: Vec<Edge<E>>) -> Result<Self, GraphError> {
        check_edge_range(num_nodes, &edges)?;
        Ok(EdgeList { num_nodes, edges })
    }

    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, E)>,
    {
        Self::new(num_nodes, edges.into_iter().map(|(s, t, d)| Edge::new(s, t, d)).collect())
    }

    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: Graph<EdgeDatum = E>,
    {
        EdgeList { num_nodes: graph.num_nodes(), edges: graph.edges() }
    }

    #[inline]
    pub fn edge(&self, edge_id: usize) -> &Edge<E> {
        &self.edges[edge_id]
    }
}

impl<E> Graph for EdgeList<E>
where
    E: Clone,
{
    type NodeDatum = ();
    type EdgeDatum = E;

    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn nodes(&self) -> Vec<Node<()>> {
        (0..self.num_nodes).map(|id| Node { id, datum: () }).collect()
    }

    fn edges(&self) -> Vec<Edge<E>> {
        self.edges.clone()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
