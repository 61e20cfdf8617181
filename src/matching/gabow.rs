use std::collections::VecDeque;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::{EngineError, PreconditionError};
use crate::graph::{AdjacencyList, Edge, Graph, NodeEdgeList};
use crate::matching::{MatchEdge, MatchingSummary};
use crate::step::{Aborted, Emitter, Run};

const ID: &str = "gabow";

const NONE: usize = usize::MAX;

/// Search label of a vertex in the current alternating tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BlossomLabel {
    Unseen,
    Odd,
    Even,
}

/// Node annotation: the label plus the base of the blossom the vertex is
/// currently (virtually) contracted into.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct BlossomNode {
    pub label: BlossomLabel,
    pub base: usize,
}

/// General-graph maximum matching. One BFS alternating-tree search per
/// exposed vertex; odd cycles are contracted virtually by re-pointing the
/// `base` of every involved vertex at the cycle's base instead of
/// materializing a contracted graph, and augmenting paths are reconstructed
/// through blossoms by re-threading the parent pointers along both arms.
///
/// Preconditions: undirected input with no self-loops and no parallel
/// edges (both make the blossom bookkeeping ill-defined).
#[derive(Default)]
pub struct Gabow;

impl Algorithm for Gabow {
    type Graph = AdjacencyList<(), ()>;
    type NodeDatum = BlossomNode;
    type EdgeDatum = MatchEdge;
    type Output = MatchingSummary;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    fn run(&self, graph: Self::Graph, _args: &[&str]) -> Result<Run<BlossomNode, MatchEdge, MatchingSummary>, EngineError> {
        check_simple(&graph)?;

        Ok(Run::spawn(move |emitter: &Emitter<BlossomNode, MatchEdge>| {
            let n = graph.num_nodes();
            let adjacency: Vec<Vec<usize>> = (0..n).map(|u| graph.neighbors(u).map(|(_, v)| v).collect()).collect();

            let mut ws = Workspace {
                edges: graph.edges(),
                adjacency,
                n,
                mate: vec![NONE; n],
                parent: vec![NONE; n],
                base: (0..n).collect(),
                even: vec![false; n],
                in_blossom: vec![false; n],
            };

            emitter.emit_at(ws.snapshot(), ID, 1)?;

            let mut matched = 0;
            for root in 0..n {
                if ws.mate[root] == NONE && ws.search(root, emitter)? {
                    matched += 1;
                    emitter.emit_at(ws.snapshot(), ID, 4)?;
                }
            }

            emitter.emit_at(ws.snapshot(), ID, 5)?;
            Ok(MatchingSummary { matched })
        }))
    }
}

fn check_simple(graph: &AdjacencyList<(), ()>) -> Result<(), EngineError> {
    let n = graph.num_nodes();
    let mut seen = vec![false; n * n];
    for edge in graph.edges() {
        let (u, v) = (edge.source, edge.target);
        if u == v {
            return Err(PreconditionError::SelfLoop { node: u }.into());
        }
        let key = u.min(v) * n + u.max(v);
        if seen[key] {
            return Err(PreconditionError::ParallelEdge { from: u, to: v }.into());
        }
        seen[key] = true;
    }
    Ok(())
}

struct Workspace {
    edges: Vec<Edge<()>>,
    adjacency: Vec<Vec<usize>>,
    n: usize,
    mate: Vec<usize>,
    /// Parent pointers of odd vertices; re-threaded during contraction.
    parent: Vec<usize>,
    base: Vec<usize>,
    /// Even label: vertex is an outer (reachable at even depth) vertex.
    even: Vec<bool>,
    in_blossom: Vec<bool>,
}

impl Workspace {
    /// Grow one alternating tree from `root`; true when an augmenting path
    /// was found and flipped.
    fn search(&mut self, root: usize, emitter: &Emitter<BlossomNode, MatchEdge>) -> Result<bool, Aborted> {
        self.even.fill(false);
        self.parent.fill(NONE);
        for u in 0..self.n {
            self.base[u] = u;
        }

        self.even[root] = true;
        let mut queue = VecDeque::from([root]);

        while let Some(v) = queue.pop_front() {
            for i in 0..self.adjacency[v].len() {
                let to = self.adjacency[v][i];
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                if to == root || (self.mate[to] != NONE && self.parent[self.mate[to]] != NONE) {
                    // two even vertices meet: contract the odd cycle
                    self.contract(v, to, &mut queue);
                    emitter.emit_at(self.snapshot(), ID, 2)?;
                } else if self.parent[to] == NONE {
                    self.parent[to] = v;
                    if self.mate[to] == NONE {
                        self.augment(to);
                        return Ok(true);
                    }
                    // to is odd; its mate joins the tree as even
                    self.even[self.mate[to]] = true;
                    queue.push_back(self.mate[to]);
                    emitter.emit_at(self.snapshot(), ID, 3)?;
                }
            }
        }
        Ok(false)
    }

    fn contract(&mut self, v: usize, to: usize, queue: &mut VecDeque<usize>) {
        let cycle_base = self.lowest_common_base(v, to);
        self.in_blossom.fill(false);
        self.mark_arm(v, cycle_base, to);
        self.mark_arm(to, cycle_base, v);
        for u in 0..self.n {
            if self.in_blossom[self.base[u]] {
                self.base[u] = cycle_base;
                if !self.even[u] {
                    self.even[u] = true;
                    queue.push_back(u);
                }
            }
        }
    }

    /// Walk both arms' base chain to find the common blossom base.
    fn lowest_common_base(&self, a: usize, b: usize) -> usize {
        let mut on_path = vec![false; self.n];
        let mut u = self.base[a];
        loop {
            on_path[u] = true;
            if self.mate[u] == NONE {
                break; // reached the root
            }
            u = self.base[self.parent[self.mate[u]]];
        }
        let mut u = self.base[b];
        loop {
            if on_path[u] {
                return u;
            }
            u = self.base[self.parent[self.mate[u]]];
        }
    }

    /// Mark the blossom bases along one arm and re-thread parent pointers so
    /// a later augmentation can run through the contracted cycle either way.
    fn mark_arm(&mut self, mut v: usize, cycle_base: usize, mut child: usize) {
        while self.base[v] != cycle_base {
            self.in_blossom[self.base[v]] = true;
            self.in_blossom[self.base[self.mate[v]]] = true;
            self.parent[v] = child;
            child = self.mate[v];
            v = self.parent[self.mate[v]];
        }
    }

    fn augment(&mut self, mut v: usize) {
        while v != NONE {
            let pv = self.parent[v];
            let next = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = next;
        }
    }

    fn snapshot(&self) -> NodeEdgeList<BlossomNode, MatchEdge> {
        let nodes = (0..self.n)
            .map(|u| {
                let label = if self.even[u] {
                    BlossomLabel::Even
                } else if self.parent[u] != NONE {
                    BlossomLabel::Odd
                } else {
                    BlossomLabel::Unseen
                };
                BlossomNode { label, base: self.base[u] }
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|edge| {
                let (u, v) = (edge.source, edge.target);
                let matched = self.mate[u] == v;
                let marked = self.parent[u] == v || self.parent[v] == u;
                Edge::new(u, v, MatchEdge { matched, marked })
            })
            .collect();
        NodeEdgeList::new(nodes, edges).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> AdjacencyList<(), ()> {
        let edges = edges.iter().map(|&(s, t)| Edge::new(s, t, ())).collect();
        AdjacencyList::new(vec![(); n], edges, false).unwrap()
    }

    #[test]
    fn perfect_matching_on_chorded_cycle() {
        // 16-cycle plus chords
        let mut edges: Vec<(usize, usize)> = (0..16).map(|u| (u, (u + 1) % 16)).collect();
        edges.extend([(0, 8), (2, 10), (4, 12), (6, 14)]);
        let run = Gabow.run(adjacency(16, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), MatchingSummary { matched: 8 });
    }

    #[test]
    fn blossom_is_contracted_and_crossed() {
        // triangle with a pendant: the odd cycle forces a contraction
        let run = Gabow.run(adjacency(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]), &[]).unwrap();
        assert_eq!(run.into_result(), MatchingSummary { matched: 2 });
    }

    #[test]
    fn petersen_like_odd_components() {
        // two triangles joined by a bridge: perfect matching exists
        let run = Gabow.run(adjacency(6, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]), &[]).unwrap();
        assert_eq!(run.into_result(), MatchingSummary { matched: 3 });
    }

    #[test]
    fn rejects_self_loop() {
        let err = Gabow.run(adjacency(2, &[(0, 0)]), &[]).unwrap_err();
        assert_eq!(err, EngineError::Precondition(PreconditionError::SelfLoop { node: 0 }));
    }

    #[test]
    fn rejects_parallel_edges() {
        let err = Gabow.run(adjacency(2, &[(0, 1), (1, 0)]), &[]).unwrap_err();
        assert!(matches!(err, EngineError::Precondition(PreconditionError::ParallelEdge { .. })));
    }
}
