use std::collections::VecDeque;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Graph};
use crate::step::{Emitter, Run};
use crate::traversal::{parse_root, snapshot, TraversalSummary, VisitEdge, VisitNode, ROOT_PARAMETER};

const ID: &str = "bfs";

/// Breadth-first traversal from a root vertex; yields a Step every time a
/// vertex is taken out of the queue.
#[derive(Default)]
pub struct Bfs;

impl Algorithm for Bfs {
    type Graph = AdjacencyList<(), ()>;
    type NodeDatum = VisitNode;
    type EdgeDatum = VisitEdge;
    type Output = TraversalSummary;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &ROOT_PARAMETER
    }

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<VisitNode, VisitEdge, TraversalSummary>, EngineError> {
        let root = parse_root(&graph, args)?;

        Ok(Run::spawn(move |emitter: &Emitter<VisitNode, VisitEdge>| {
            let n = graph.num_nodes();
            let mut order: Vec<Option<usize>> = vec![None; n];
            let mut tree = vec![false; graph.num_edges()];
            let mut sequence = Vec::new();

            order[root] = Some(0);
            sequence.push(root);
            let mut queue = VecDeque::from([root]);
            emitter.emit_at(snapshot(&graph, &order, &tree), ID, 1)?;

            while let Some(u) = queue.pop_front() {
                for (edge_id, v) in graph.neighbors(u) {
                    if order[v].is_none() {
                        order[v] = Some(sequence.len());
                        sequence.push(v);
                        tree[edge_id] = true;
                        queue.push_back(v);
                    }
                }
                emitter.emit_at(snapshot(&graph, &order, &tree), ID, 2)?;
            }

            emitter.emit_at(snapshot(&graph, &order, &tree), ID, 3)?;
            Ok(TraversalSummary { order: sequence })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParameterError;
    use crate::graph::Edge;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> AdjacencyList<(), ()> {
        let edges = edges.iter().map(|&(s, t)| Edge::new(s, t, ())).collect();
        AdjacencyList::new(vec![(); n], edges, false).unwrap()
    }

    #[test]
    fn visits_level_by_level() {
        // star plus a tail: 0-{1,2,3}, 3-4
        let graph = adjacency(5, &[(0, 1), (0, 2), (0, 3), (3, 4)]);
        let run = Bfs.run(graph, &["0"]).unwrap();
        assert_eq!(run.into_result(), TraversalSummary { order: vec![0, 1, 2, 3, 4] });
    }

    #[test]
    fn stays_inside_the_root_component() {
        let graph = adjacency(4, &[(0, 1), (2, 3)]);
        let run = Bfs.run(graph, &["2"]).unwrap();
        assert_eq!(run.into_result(), TraversalSummary { order: vec![2, 3] });
    }

    #[test]
    fn one_step_per_dequeue() {
        let graph = adjacency(3, &[(0, 1), (1, 2)]);
        let steps: Vec<_> = Bfs.run(graph, &["0"]).unwrap().collect();
        // initial + three dequeues + final
        assert_eq!(steps.len(), 5);
        assert_eq!(steps.last().unwrap().graph.edges().iter().filter(|e| e.datum.tree).count(), 2);
    }

    #[test]
    fn rejects_missing_root() {
        let err = Bfs.run(adjacency(2, &[(0, 1)]), &[]).unwrap_err();
        assert_eq!(err, EngineError::Parameter(ParameterError::Missing { name: "root" }));
    }
}
