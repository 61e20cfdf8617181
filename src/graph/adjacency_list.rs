use crate::error::GraphError;
use crate::graph::{check_edge_range, Edge, Graph, Node};

/// Per-node outgoing-edge lists over a positional edge array. The shape the
/// traversal, matching and planarity algorithms work on.
///
/// Edge identity is the index into the edge array; the out lists only hold
/// indices, so an undirected edge appears in both endpoint lists but exists
/// once.
#[derive(PartialEq, Debug, Clone)]
pub struct AdjacencyList<N, E> {
    nodes: Vec<N>,
    edges: Vec<Edge<E>>,
    out: Vec<Vec<usize>>,
    directed: bool,
}

impl<N, E> AdjacencyList<N, E>
where
    N: Clone,
    E: Clone,
{
    pub fn new(nodes: Vec<N>, edges: Vec<Edge<E>>, directed: bool) -> Result<Self, GraphError> {
        check_edge_range(nodes.len(), &edges)?;
        let mut out = vec![Vec::new(); nodes.len()];
        for (edge_id, edge) in edges.iter().enumerate() {
            out[edge.source].push(edge_id);
            if !directed && edge.source != edge.target {
                out[edge.target].push(edge_id);
            }
        }
        Ok(AdjacencyList { nodes, edges, out, directed })
    }

    pub fn from_graph<G>(graph: &G, directed: bool) -> Result<Self, GraphError>
    where
        G: Graph<NodeDatum = N, EdgeDatum = E>,
    {
        Self::new(graph.nodes().into_iter().map(|node| node.datum).collect(), graph.edges(), directed)
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn degree(&self, u: usize) -> usize {
        self.out[u].len()
    }

    #[inline]
    pub fn edge(&self, edge_id: usize) -> &Edge<E> {
        &self.edges[edge_id]
    }

    /// Outgoing `(edge_id, neighbor)` pairs of `u`, in edge-insertion order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.out[u].iter().map(move |&edge_id| (edge_id, self.edges[edge_id].other(u)))
    }
}

impl<N, E> Graph for AdjacencyList<N, E>
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

    fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
