use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Graph};
use crate::shortest_path::{parse_source, snapshot, DistanceNode, WeightedEdge, SOURCE_PARAMETER};
use crate::step::{Emitter, Run};

const ID: &str = "bellman_ford";

/// Distances plus whether a negative cycle is reachable from the source;
/// distances are not meaningful when one is.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct BellmanFordSummary<W> {
    pub distances: Vec<Option<W>>,
    pub negative_cycle: bool,
}

/// Single-source shortest paths by edge relaxation rounds; handles negative
/// weights and reports reachable negative cycles. One Step per round.
#[derive(Default)]
pub struct BellmanFord<W> {
    _weight: PhantomData<W>,
}

impl<W> Algorithm for BellmanFord<W>
where
    W: NumAssign + Ord + Copy + Send + 'static,
{
    type Graph = AdjacencyList<(), W>;
    type NodeDatum = DistanceNode<W>;
    type EdgeDatum = WeightedEdge<W>;
    type Output = BellmanFordSummary<W>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &SOURCE_PARAMETER
    }

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<DistanceNode<W>, WeightedEdge<W>, BellmanFordSummary<W>>, EngineError> {
        let source = parse_source(&graph, args)?;

        Ok(Run::spawn(move |emitter: &Emitter<DistanceNode<W>, WeightedEdge<W>>| {
            let n = graph.num_nodes();
            let mut arcs: Vec<(usize, usize, usize, W)> = Vec::new();
            for (edge_id, edge) in graph.edges().iter().enumerate() {
                arcs.push((edge_id, edge.source, edge.target, edge.datum));
                if !graph.is_directed() && edge.source != edge.target {
                    arcs.push((edge_id, edge.target, edge.source, edge.datum));
                }
            }

            let mut distances: Vec<Option<W>> = vec![None; n];
            let mut tree_edge: Vec<Option<usize>> = vec![None; n];
            let settled = vec![false; n];
            distances[source] = Some(W::zero());
            emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 1)?;

            for _ in 1..n.max(1) {
                let mut relaxed = false;
                for &(edge_id, u, v, weight) in &arcs {
                    if let Some(from) = distances[u] {
                        let candidate = from + weight;
                        if distances[v].map_or(true, |best| candidate < best) {
                            distances[v] = Some(candidate);
                            tree_edge[v] = Some(edge_id);
                            relaxed = true;
                        }
                    }
                }
                emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 2)?;
                if !relaxed {
                    break;
                }
            }

            // one more round; any improvement exposes a negative cycle
            let negative_cycle = arcs.iter().any(|&(_, u, v, weight)| match (distances[u], distances[v]) {
                (Some(from), Some(best)) => from + weight < best,
                (Some(_), None) => true,
                _ => false,
            });

            emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 3)?;
            Ok(BellmanFordSummary { distances, negative_cycle })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn weighted(n: usize, edges: &[(usize, usize, i64)]) -> AdjacencyList<(), i64> {
        let edges = edges.iter().map(|&(s, t, w)| Edge::new(s, t, w)).collect();
        AdjacencyList::new(vec![(); n], edges, true).unwrap()
    }

    #[test]
    fn negative_edges_are_fine_without_a_cycle() {
        let graph = weighted(4, &[(0, 1, 5), (1, 2, -3), (0, 2, 4), (2, 3, 1)]);
        let run = BellmanFord::<i64>::default().run(graph, &["0"]).unwrap();
        let summary = run.into_result();
        assert_eq!(summary.distances, vec![Some(0), Some(5), Some(2), Some(3)]);
        assert!(!summary.negative_cycle);
    }

    #[test]
    fn reports_a_reachable_negative_cycle() {
        let graph = weighted(3, &[(0, 1, 1), (1, 2, -2), (2, 1, 1)]);
        let run = BellmanFord::<i64>::default().run(graph, &["0"]).unwrap();
        assert!(run.into_result().negative_cycle);
    }

    #[test]
    fn unreachable_negative_cycle_is_ignored() {
        let graph = weighted(4, &[(0, 1, 1), (2, 3, -5), (3, 2, 1)]);
        let run = BellmanFord::<i64>::default().run(graph, &["0"]).unwrap();
        let summary = run.into_result();
        assert!(!summary.negative_cycle);
        assert_eq!(summary.distances, vec![Some(0), Some(1), None, None]);
    }

    #[test]
    fn stops_early_once_stable() {
        let graph = weighted(5, &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1)]);
        let steps: Vec<_> = BellmanFord::<i64>::default().run(graph, &["0"]).unwrap().collect();
        // the arc order relaxes the whole chain in the first round
        assert_eq!(steps.len(), 4);
    }
}
