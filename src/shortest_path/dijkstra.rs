use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::{EngineError, PreconditionError};
use crate::graph::{AdjacencyList, Graph};
use crate::shortest_path::{parse_source, snapshot, DistanceNode, ShortestPathSummary, WeightedEdge, SOURCE_PARAMETER};
use crate::step::{Emitter, Run};

const ID: &str = "dijkstra";

/// Single-source shortest paths on non-negative weights; lazy-deletion
/// binary heap, one Step per settled vertex.
///
/// Precondition: no negative edge weight.
#[derive(Default)]
pub struct Dijkstra<W> {
    _weight: PhantomData<W>,
}

impl<W> Algorithm for Dijkstra<W>
where
    W: NumAssign + Ord + Copy + Send + 'static,
{
    type Graph = AdjacencyList<(), W>;
    type NodeDatum = DistanceNode<W>;
    type EdgeDatum = WeightedEdge<W>;
    type Output = ShortestPathSummary<W>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &SOURCE_PARAMETER
    }

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<DistanceNode<W>, WeightedEdge<W>, ShortestPathSummary<W>>, EngineError> {
        let source = parse_source(&graph, args)?;
        for edge in graph.edges() {
            if edge.datum < W::zero() {
                return Err(PreconditionError::NegativeWeight { from: edge.source, to: edge.target }.into());
            }
        }

        Ok(Run::spawn(move |emitter: &Emitter<DistanceNode<W>, WeightedEdge<W>>| {
            let n = graph.num_nodes();
            let mut distances: Vec<Option<W>> = vec![None; n];
            let mut settled = vec![false; n];
            let mut tree_edge: Vec<Option<usize>> = vec![None; n];

            distances[source] = Some(W::zero());
            let mut heap = BinaryHeap::from([Reverse((W::zero(), source))]);
            emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 1)?;

            while let Some(Reverse((distance, u))) = heap.pop() {
                if settled[u] {
                    continue; // stale heap entry
                }
                settled[u] = true;

                for (edge_id, v) in graph.neighbors(u) {
                    let candidate = distance + graph.edge(edge_id).datum;
                    if distances[v].map_or(true, |best| candidate < best) {
                        distances[v] = Some(candidate);
                        tree_edge[v] = Some(edge_id);
                        heap.push(Reverse((candidate, v)));
                    }
                }
                emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 2)?;
            }

            emitter.emit_at(snapshot(&graph, &distances, &settled, &tree_edge), ID, 3)?;
            Ok(ShortestPathSummary { distances })
        }))
    }
}
