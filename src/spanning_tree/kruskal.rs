use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::disjoint_sets::DisjointSets;
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Graph};
use crate::spanning_tree::{snapshot, SpanningForestSummary, TreeEdge, TreeNode};
use crate::step::{Emitter, Run};

const ID: &str = "kruskal";

/// Minimum spanning forest by sorting edges and uniting components; ties
/// break on the lower edge id, so runs are deterministic. One Step per edge
/// taken into the forest.
#[derive(Default)]
pub struct Kruskal<W> {
    _weight: PhantomData<W>,
}

impl<W> Algorithm for Kruskal<W>
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
            let edges = graph.edges();
            let mut order: Vec<usize> = (0..edges.len()).collect();
            order.sort_by_key(|&edge_id| edges[edge_id].datum);

            let mut sets = DisjointSets::new(n);
            let mut in_tree = vec![false; n];
            let mut chosen_flags = vec![false; edges.len()];
            let mut chosen = Vec::new();
            let mut total = W::zero();

            emitter.emit_at(snapshot(&graph, &in_tree, &chosen_flags), ID, 1)?;

            for edge_id in order {
                let edge = &edges[edge_id];
                if edge.source != edge.target && sets.unite(edge.source, edge.target) {
                    chosen_flags[edge_id] = true;
                    chosen.push(edge_id);
                    in_tree[edge.source] = true;
                    in_tree[edge.target] = true;
                    total += edge.datum;
                    emitter.emit_at(snapshot(&graph, &in_tree, &chosen_flags), ID, 2)?;
                }
            }

            emitter.emit_at(snapshot(&graph, &in_tree, &chosen_flags), ID, 3)?;
            Ok(SpanningForestSummary { total, chosen })
        }))
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
        let run = Kruskal::<i64>::default().run(graph, &[]).unwrap();
        let summary = run.into_result();
        assert_eq!(summary.total, 6);
        assert_eq!(summary.chosen, vec![0, 1, 2]);
    }

    #[test]
    fn forest_spans_each_component() {
        let graph = weighted(5, &[(0, 1, 2), (1, 2, 2), (0, 2, 5), (3, 4, 7)]);
        let run = Kruskal::<i64>::default().run(graph, &[]).unwrap();
        let summary = run.into_result();
        assert_eq!(summary.total, 11);
        assert_eq!(summary.chosen.len(), 3);
    }

    #[test]
    fn ties_break_on_edge_id() {
        let graph = weighted(3, &[(0, 1, 1), (1, 2, 1), (0, 2, 1)]);
        let run = Kruskal::<i64>::default().run(graph, &[]).unwrap();
        assert_eq!(run.into_result().chosen, vec![0, 1]);
    }
}
