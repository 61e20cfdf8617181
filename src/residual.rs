use num_traits::NumAssign;

use crate::error::GraphError;
use crate::graph::{Edge, Graph, NodeEdgeList};

/// Sentinel terminating a node's arc chain.
pub const NONE: usize = usize::MAX;

/// Edge payload every flow algorithm consumes.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct FlowDatum<Flow> {
    pub capacity: Flow,
    pub cost: Flow,
}

impl<Flow> FlowDatum<Flow>
where
    Flow: NumAssign + Copy,
{
    pub fn capacity(capacity: Flow) -> Self {
        FlowDatum { capacity, cost: Flow::zero() }
    }

    pub fn with_cost(capacity: Flow, cost: Flow) -> Self {
        FlowDatum { capacity, cost }
    }
}

/// Node annotation in flow snapshots: the BFS level/distance of the most
/// recent search, when the algorithm keeps one.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct ResidualNode {
    pub distance: Option<usize>,
}

/// Per-original-edge view reported by snapshots: the capacity it was built
/// with, the amount currently used (the backward arc's residual), and a
/// tri-state mark (0 untouched, 1/-1 pushed forward/backward since the last
/// snapshot).
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ResidualView<Flow> {
    pub capacity: Flow,
    pub used: Flow,
    pub cost: Flow,
    pub mark: i8,
}

#[derive(PartialEq, Debug)]
pub struct ResidualArc<Flow> {
    pub to: usize,
    pub capacity: Flow,
    pub cost: Flow,
    pub next: usize,
}

/// Paired-edge residual network over a star forward-list: `head[u]` points
/// at the first arc out of `u`, arcs chain through `next`. Forward and
/// backward arcs are allocated as consecutive pairs, so arc `i`'s partner is
/// always `i ^ 1`.
#[derive(Default)]
pub struct ResidualNetwork<Flow> {
    num_nodes: usize,
    head: Vec<usize>,
    arcs: Vec<ResidualArc<Flow>>,
    uppers: Vec<Flow>,
    marks: Vec<i8>,
}

impl<Flow> ResidualNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn with_nodes(num_nodes: usize) -> Self {
        ResidualNetwork { num_nodes, head: vec![NONE; num_nodes], arcs: Vec::new(), uppers: Vec::new(), marks: Vec::new() }
    }

    pub fn from_graph<G>(graph: &G) -> Result<Self, GraphError>
    where
        G: Graph<EdgeDatum = FlowDatum<Flow>>,
    {
        let mut net = Self::with_nodes(graph.num_nodes());
        for edge in graph.edges() {
            net.add_edge(edge.source, edge.target, edge.datum.capacity, edge.datum.cost)?;
        }
        Ok(net)
    }

    /// Returns the new edge id. Self-loops make residual reasoning
    /// ill-defined and are rejected here.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Flow, cost: Flow) -> Result<usize, GraphError> {
        if from >= self.num_nodes || to >= self.num_nodes {
            return Err(GraphError::NodeOutOfRange { from, to, num_nodes: self.num_nodes });
        }
        if from == to {
            return Err(GraphError::SelfLoop { node: from });
        }

        let forward = self.arcs.len();
        self.arcs.push(ResidualArc { to, capacity, cost, next: self.head[from] });
        self.head[from] = forward;
        self.arcs.push(ResidualArc { to: from, capacity: Flow::zero(), cost: Flow::zero() - cost, next: self.head[to] });
        self.head[to] = forward + 1;

        self.uppers.push(capacity);
        self.marks.push(0);
        Ok(forward >> 1)
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.uppers.len()
    }

    #[inline]
    pub fn first_arc(&self, u: usize) -> usize {
        self.head[u]
    }

    #[inline]
    pub fn arc(&self, arc_id: usize) -> &ResidualArc<Flow> {
        &self.arcs[arc_id]
    }

    /// Net flow currently routed over original edge `edge_id`.
    #[inline]
    pub fn used(&self, edge_id: usize) -> Flow {
        self.arcs[2 * edge_id + 1].capacity
    }

    /// Move `amount` of residual capacity from an arc to its partner and
    /// record the direction against the originating edge.
    pub fn push(&mut self, arc_id: usize, amount: Flow) {
        debug_assert!(amount <= self.arcs[arc_id].capacity);
        self.arcs[arc_id].capacity -= amount;
        self.arcs[arc_id ^ 1].capacity += amount;
        self.marks[arc_id >> 1] = if arc_id & 1 == 0 { 1 } else { -1 };
    }

    /// Total cost of the flow currently routed (sum over original edges).
    pub fn total_cost(&self) -> Flow {
        (0..self.num_edges()).fold(Flow::zero(), |acc, edge_id| acc + self.used(edge_id) * self.arcs[2 * edge_id].cost)
    }

    pub fn snapshot(&mut self) -> NodeEdgeList<ResidualNode, ResidualView<Flow>> {
        self.snapshot_with_distances(&[])
    }

    /// Report one view per original edge and clear the marks for the next
    /// round. `distances` uses `num_nodes` as the unreachable sentinel; pass
    /// an empty slice when the algorithm keeps no levels.
    pub fn snapshot_with_distances(&mut self, distances: &[usize]) -> NodeEdgeList<ResidualNode, ResidualView<Flow>> {
        let nodes = (0..self.num_nodes)
            .map(|u| ResidualNode { distance: distances.get(u).copied().filter(|&d| d < self.num_nodes) })
            .collect();
        let edges = (0..self.num_edges())
            .map(|edge_id| {
                let forward = &self.arcs[2 * edge_id];
                let backward = &self.arcs[2 * edge_id + 1];
                Edge::new(
                    backward.to,
                    forward.to,
                    ResidualView { capacity: self.uppers[edge_id], used: backward.capacity, cost: forward.cost, mark: self.marks[edge_id] },
                )
            })
            .collect();
        self.marks.fill(0);
        NodeEdgeList::new(nodes, edges).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn arcs_are_paired() {
        let mut net = ResidualNetwork::<i64>::with_nodes(3);
        let e0 = net.add_edge(0, 1, 4, 2).unwrap();
        let e1 = net.add_edge(1, 2, 3, 5).unwrap();
        assert_eq!((e0, e1), (0, 1));

        assert_eq!(net.arc(0).to, 1);
        assert_eq!(net.arc(1).to, 0);
        assert_eq!(net.arc(1).capacity, 0);
        assert_eq!(net.arc(1).cost, -2);
        assert_eq!(net.arc(2).to, 2);
        assert_eq!(net.arc(3).cost, -5);
    }

    #[test]
    fn rejects_self_loop() {
        let mut net = ResidualNetwork::<i64>::with_nodes(2);
        assert_eq!(net.add_edge(1, 1, 4, 0), Err(GraphError::SelfLoop { node: 1 }));
    }

    #[test]
    fn push_and_marks() {
        let mut net = ResidualNetwork::<i64>::with_nodes(2);
        net.add_edge(0, 1, 4, 1).unwrap();

        net.push(0, 3);
        assert_eq!(net.used(0), 3);
        assert_eq!(net.arc(0).capacity, 1);

        let snap = net.snapshot();
        let view = snap.edges()[0].datum;
        assert_eq!((view.capacity, view.used, view.mark), (4, 3, 1));

        // marks cleared by the snapshot
        let snap = net.snapshot();
        assert_eq!(snap.edges()[0].datum.mark, 0);

        net.push(1, 2);
        let snap = net.snapshot();
        let view = snap.edges()[0].datum;
        assert_eq!((view.used, view.mark), (1, -1));
    }
}
