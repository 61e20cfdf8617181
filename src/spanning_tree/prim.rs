use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Graph};
use crate::spanning_tree::{snapshot, SpanningForestSummary, TreeEdge, TreeNode};
use crate::step::{Aborted, Emitter, Run};

const ID: &str = "prim";

/// Minimum spanning forest by growing one tree per component from its
/// lowest-numbered vertex; lazy-deletion binary heap over the frontier
/// edges. One Step per vertex pulled into the forest.
#[derive(Default)]
pub struct Prim<W> {
    _weight: PhantomData<W>,
}

impl<W> Algorithm for Prim<W>
where
    W: NumAssign + Ord + Copy + Send + 'static,
{
    type Graph = AdjacencyList<(), W>;
    type NodeDatum = TreeNode;
    type EdgeDatum = TreeEdge<W>;
    type Output = SpanningForestSummary<W>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    fn run(&self, graph: Self::Graph, _args: &[&str]) -> Result<Run<TreeNode, TreeEdge<W>, SpanningForestSummary<W>>, EngineError> {
        Ok(Run::spawn(move |emitter: &Emitter<TreeNode, TreeEdge<W>>| {
            let n = graph.num_nodes();
            let mut ws = Workspace {
                in_tree: vec![false; n],
                chosen_flags: vec![false; graph.num_edges()],
                chosen: Vec::new(),
                total: W::zero(),
                graph,
            };

            emitter.emit_at(snapshot(&ws.graph, &ws.in_tree, &ws.chosen_flags), ID, 1)?;
            for root in 0..n {
                if !ws.in_tree[root] {
                    ws.grow(root, emitter)?;
                }
            }
            emitter.emit_at(snapshot(&ws.graph, &ws.in_tree, &ws.chosen_flags), ID, 3)?;
            Ok(SpanningForestSummary { total: ws.total, chosen: ws.chosen })
        }))
    }
}

struct Workspace<W> {
    graph: AdjacencyList<(), W>,
    in_tree: Vec<bool>,
    chosen_flags: Vec<bool>,
    chosen: Vec<usize>,
    total: W,
}

impl<W> Workspace<W>
where
    W: NumAssign + Ord + Copy,
{
    fn grow(&mut self, root: usize, emitter: &Emitter<TreeNode, TreeEdge<W>>) -> Result<(), Aborted> {
        let mut heap = BinaryHeap::new();
        self.absorb(root, None, &mut heap);
        emitter.emit_at(snapshot(&self.graph, &self.in_tree, &self.chosen_flags), ID, 2)?;

        while let Some(Reverse((_, edge_id, v))) = heap.pop() {
            if self.in_tree[v] {
                continue; // stale frontier entry
            }
            self.absorb(v, Some(edge_id), &mut heap);
            emitter.emit_at(snapshot(&self.graph, &self.in_tree, &self.chosen_flags), ID, 2)?;
        }
        Ok(())
    }

    fn absorb(&mut self, v: usize, over: Option<usize>, heap: &mut BinaryHeap<Reverse<(W, usize, usize)>>) {
        self.in_tree[v] = true;
        if let Some(edge_id) = over {
            self.chosen_flags[edge_id] = true;
            self.chosen.push(edge_id);
            self.total += self.graph.edge(edge_id).datum;
        }
        for (edge_id, to) in self.graph.neighbors(v) {
            if !self.in_tree[to] {
                heap.push(Reverse((self.graph.edge(edge_id).datum, edge_id, to)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn weighted(n: usize, edges: &[(usize, usize, i64)]) -> AdjacencyList<(), i64> {
        let edges = edges.iter().map(|&(s, t, w)| Edge::new(s, t, w)).collect();
        AdjacencyList::new(vec![(); n], edges, false).unwrap()
    }

    #[test]
    fn skips_the_heavy_cycle_edge() {
        let graph = weighted(4, &[(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 0, 10), (0, 2, 4)]);
        let run = Prim::<i64>::default().run(graph, &[]).unwrap();
        assert_eq!(run.into_result().total, 6);
    }

    #[test]
    fn forest_spans_each_component() {
        let graph = weighted(5, &[(0, 1, 2), (1, 2, 2), (0, 2, 5), (3, 4, 7)]);
        let run = Prim::<i64>::default().run(graph, &[]).unwrap();
        let summary = run.into_result();
        assert_eq!(summary.total, 11);
        assert_eq!(summary.chosen.len(), 3);
    }

    #[test]
    fn one_step_per_absorbed_vertex() {
        let graph = weighted(3, &[(0, 1, 1), (1, 2, 1)]);
        let steps: Vec<_> = Prim::<i64>::default().run(graph, &[]).unwrap().collect();
        // initial + three absorptions + final
        assert_eq!(steps.len(), 5);
    }
}
