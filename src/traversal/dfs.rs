use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Graph};
use crate::step::{Aborted, Emitter, Run};
use crate::traversal::{parse_root, snapshot, TraversalSummary, VisitEdge, VisitNode, ROOT_PARAMETER};

const ID: &str = "dfs";

/// Depth-first preorder traversal from a root vertex; yields a Step at every
/// discovery.
#[derive(Default)]
pub struct Dfs;

impl Algorithm for Dfs {
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
            let mut ws = Workspace {
                order: vec![None; graph.num_nodes()],
                tree: vec![false; graph.num_edges()],
                sequence: Vec::new(),
                graph,
            };

            emitter.emit_at(snapshot(&ws.graph, &ws.order, &ws.tree), ID, 1)?;
            ws.visit(root, None, emitter)?;
            emitter.emit_at(snapshot(&ws.graph, &ws.order, &ws.tree), ID, 3)?;
            Ok(TraversalSummary { order: ws.sequence })
        }))
    }
}

struct Workspace {
    graph: AdjacencyList<(), ()>,
    order: Vec<Option<usize>>,
    tree: Vec<bool>,
    sequence: Vec<usize>,
}

impl Workspace {
    fn visit(&mut self, u: usize, over: Option<usize>, emitter: &Emitter<VisitNode, VisitEdge>) -> Result<(), Aborted> {
        self.order[u] = Some(self.sequence.len());
        self.sequence.push(u);
        if let Some(edge_id) = over {
            self.tree[edge_id] = true;
        }
        emitter.emit_at(snapshot(&self.graph, &self.order, &self.tree), ID, 2)?;

        let neighbors: Vec<(usize, usize)> = self.graph.neighbors(u).collect();
        for (edge_id, v) in neighbors {
            if self.order[v].is_none() {
                self.visit(v, Some(edge_id), emitter)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> AdjacencyList<(), ()> {
        let edges = edges.iter().map(|&(s, t)| Edge::new(s, t, ())).collect();
        AdjacencyList::new(vec![(); n], edges, false).unwrap()
    }

    #[test]
    fn dives_before_it_widens() {
        // 0-{1,3}, 1-2: depth first reaches 2 before 3
        let graph = adjacency(4, &[(0, 1), (0, 3), (1, 2)]);
        let run = Dfs.run(graph, &["0"]).unwrap();
        assert_eq!(run.into_result(), TraversalSummary { order: vec![0, 1, 2, 3] });
    }

    #[test]
    fn tree_edges_span_the_component() {
        let graph = adjacency(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let steps: Vec<_> = Dfs.run(graph, &["0"]).unwrap().collect();
        let last = steps.last().unwrap();
        assert_eq!(last.graph.edges().iter().filter(|e| e.datum.tree).count(), 3);
    }

    #[test]
    fn rejects_root_out_of_range() {
        assert!(Dfs.run(adjacency(2, &[(0, 1)]), &["2"]).is_err());
    }
}
