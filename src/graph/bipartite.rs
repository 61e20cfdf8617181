use crate::error::GraphError;
use crate::graph::{Edge, Graph, Node};

/// Which partition a node of a bipartite representation belongs to.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Side {
    Left,
    Right,
}

/// Two node partitions plus an edge list. Left nodes occupy ids
/// `0..num_left`, right nodes `num_left..num_left + num_right`; any edge
/// joining two nodes of the same side is rejected at construction.
#[derive(PartialEq, Debug, Clone)]
pub struct BipartiteGraph<E> {
    num_left: usize,
    num_right: usize,
    edges: Vec<Edge<E>>,
}

impl<E> BipartiteGraph<E>
where
    E: Clone,
{
    pub fn new(num_left: usize, num_right: usize, edges: Vec<Edge<E>>) -> Result<Self, GraphError> {
        let num_nodes = num_left + num_right;
        for edge in &edges {
            let (s, t) = (edge.source, edge.target);
            if s >= num_nodes || t >= num_nodes {
                return Err(GraphError::NodeOutOfRange { from: s, to: t, num_nodes });
            }
            if (s < num_left) == (t < num_left) {
                return Err(GraphError::SameSide { from: s, to: t });
            }
        }
        Ok(BipartiteGraph { num_left, num_right, edges })
    }

    pub fn from_edges<I>(num_left: usize, num_right: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
        E: Default,
    {
        Self::new(num_left, num_right, edges.into_iter().map(|(s, t)| Edge::new(s, t, E::default())).collect())
    }

    #[inline]
    pub fn num_left(&self) -> usize {
        self.num_left
    }

    #[inline]
    pub fn num_right(&self) -> usize {
        self.num_right
    }

    #[inline]
    pub fn side(&self, u: usize) -> Side {
        if u < self.num_left {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Per-left-node `(edge_id, right_node)` lists, in edge order.
    pub fn left_adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adj = vec![Vec::new(); self.num_left];
        for (edge_id, edge) in self.edges.iter().enumerate() {
            let (left, right) = if edge.source < self.num_left { (edge.source, edge.target) } else { (edge.target, edge.source) };
            adj[left].push((edge_id, right));
        }
        adj
    }
}

impl<E> Graph for BipartiteGraph<E>
where
    E: Clone,
{
    type NodeDatum = Side;
    type EdgeDatum = E;

    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_left + self.num_right
    }

    fn nodes(&self) -> Vec<Node<Side>> {
        (0..self.num_nodes()).map(|id| Node { id, datum: self.side(id) }).collect()
    }

    fn edges(&self) -> Vec<Edge<E>> {
        self.edges.clone()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Dense left x right weight matrix for the assignment problem.
#[derive(PartialEq, Debug, Clone)]
pub struct BipartiteMatrix<W> {
    weights: Vec<Vec<W>>,
}

impl<W> BipartiteMatrix<W>
where
    W: Clone,
{
    pub fn new(weights: Vec<Vec<W>>) -> Result<Self, GraphError> {
        if let Some(expected) = weights.first().map(Vec::len) {
            for (row, cols) in weights.iter().enumerate() {
                if cols.len() != expected {
                    return Err(GraphError::RaggedMatrix { row, cols: cols.len(), expected });
                }
            }
        }
        Ok(BipartiteMatrix { weights })
    }

    #[inline]
    pub fn num_left(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn num_right(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn weight(&self, left: usize, right: usize) -> &W {
        &self.weights[left][right]
    }
}

impl<W> Graph for BipartiteMatrix<W>
where
    W: Clone,
{
    type NodeDatum = Side;
    type EdgeDatum = W;

    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_left() + self.num_right()
    }

    fn nodes(&self) -> Vec<Node<Side>> {
        let num_left = self.num_left();
        (0..self.num_nodes()).map(|id| Node { id, datum: if id < num_left { Side::Left } else { Side::Right } }).collect()
    }

    fn edges(&self) -> Vec<Edge<W>> {
        let num_left = self.num_left();
        let mut edges = Vec::new();
        for (left, row) in self.weights.iter().enumerate() {
            for (right, weight) in row.iter().enumerate() {
                edges.push(Edge::new(left, num_left + right, weight.clone()));
            }
        }
        edges
    }
}
