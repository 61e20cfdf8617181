use crate::error::GraphError;
use crate::graph::{Edge, Graph, Node};

/// Dense `n x n` cell matrix with a directed flag. Best for the dense
/// relaxation algorithms (Dijkstra, Bellman-Ford, Prim).
///
/// An edge's identity in this representation is its `(source, target)` cell;
/// converting a multigraph into a matrix therefore fails with
/// `DuplicateEdge` instead of silently dropping data.
#[derive(PartialEq, Debug, Clone)]
pub struct AdjacencyMatrix<N, E> {
    nodes: Vec<N>,
    cells: Vec<Option<E>>, // row-major, n * n
    directed: bool,
}

impl<N, E> AdjacencyMatrix<N, E>
where
    N: Clone,
    E: Clone + PartialEq,
{
    pub fn new(nodes: Vec<N>, rows: Vec<Vec<Option<E>>>, directed: bool) -> Result<Self, GraphError> {
        let n = nodes.len();
        if rows.len() != n {
            return Err(GraphError::NotSquare { rows: rows.len(), cols: n, row: 0 });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::NotSquare { rows: n, cols: row.len(), row: i });
            }
        }
        if !directed {
            for i in 0..n {
                for j in (i + 1)..n {
                    if rows[i][j] != rows[j][i] {
                        return Err(GraphError::Asymmetric { i, j });
                    }
                }
            }
        }
        let cells = rows.into_iter().flatten().collect();
        Ok(AdjacencyMatrix { nodes, cells, directed })
    }

    pub fn from_graph<G>(graph: &G, directed: bool) -> Result<Self, GraphError>
    where
        G: Graph<NodeDatum = N, EdgeDatum = E>,
    {
        let n = graph.num_nodes();
        let mut cells: Vec<Option<E>> = vec![None; n * n];
        for edge in graph.edges() {
            let (s, t) = (edge.source, edge.target);
            if s >= n || t >= n {
                return Err(GraphError::NodeOutOfRange { from: s, to: t, num_nodes: n });
            }
            if cells[s * n + t].is_some() {
                return Err(GraphError::DuplicateEdge { from: s, to: t });
            }
            if !directed && s != t {
                if cells[t * n + s].is_some() {
                    return Err(GraphError::DuplicateEdge { from: s, to: t });
                }
                cells[t * n + s] = Some(edge.datum.clone());
            }
            cells[s * n + t] = Some(edge.datum);
        }
        Ok(AdjacencyMatrix { nodes: graph.nodes().into_iter().map(|node| node.datum).collect(), cells, directed })
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> Option<&E> {
        self.cells[i * self.nodes.len() + j].as_ref()
    }
}

impl<N, E> Graph for AdjacencyMatrix<N, E>
where
    N: Clone,
    E: Clone + PartialEq,
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

    /// Undirected matrices report each stored edge once, with
    /// `source <= target`.
    fn edges(&self) -> Vec<Edge<E>> {
        let n = self.nodes.len();
        let mut edges = Vec::new();
        for i in 0..n {
            let start = if self.directed { 0 } else { i };
            for j in start..n {
                if let Some(datum) = &self.cells[i * n + j] {
                    edges.push(Edge::new(i, j, datum.clone()));
                }
            }
        }
        edges
    }
}
