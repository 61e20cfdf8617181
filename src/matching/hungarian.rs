use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{BipartiteGraph, Edge, Graph, NodeEdgeList, Side};
use crate::matching::{MatchEdge, MatchingSummary};
use crate::step::{Emitter, Run};

const ID: &str = "hungarian";

/// Node annotation for the bipartite matching snapshots.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct MatchNode {
    pub side: Side,
    /// Visited by the augmenting attempt published in this Step.
    pub visited: bool,
}

/// Unweighted maximum bipartite matching by recursive reassignment DFS: for
/// each left vertex, try every unvisited right neighbor, recursively evicting
/// its current partner when possible. Yields one Step per augmenting attempt.
#[derive(Default)]
pub struct Hungarian;

impl Algorithm for Hungarian {
    type Graph = BipartiteGraph<()>;
    type NodeDatum = MatchNode;
    type EdgeDatum = MatchEdge;
    type Output = MatchingSummary;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    fn run(&self, graph: Self::Graph, _args: &[&str]) -> Result<Run<MatchNode, MatchEdge, MatchingSummary>, EngineError> {
        Ok(Run::spawn(move |emitter: &Emitter<MatchNode, MatchEdge>| {
            let num_nodes = graph.num_nodes();
            let num_left = graph.num_left();
            let adjacency = graph.left_adjacency();
            let edges = graph.edges();
            let sides: Vec<Side> = (0..num_nodes).map(|u| graph.side(u)).collect();

            let mut mate: Vec<Option<usize>> = vec![None; num_nodes];
            let mut matched = 0;

            emitter.emit_at(snapshot(&sides, &edges, &mate, &[], &[]), ID, 1)?;

            for left in 0..num_left {
                let mut visited = vec![false; num_nodes];
                let mut trail = vec![false; edges.len()];
                if try_augment(left, &adjacency, &mut mate, &mut visited, &mut trail) {
                    matched += 1;
                }
                emitter.emit_at(snapshot(&sides, &edges, &mate, &visited, &trail), ID, 2)?;
            }

            emitter.emit_at(snapshot(&sides, &edges, &mate, &[], &[]), ID, 3)?;
            Ok(MatchingSummary { matched })
        }))
    }
}

fn try_augment(left: usize, adjacency: &[Vec<(usize, usize)>], mate: &mut [Option<usize>], visited: &mut [bool], trail: &mut [bool]) -> bool {
    for &(edge_id, right) in &adjacency[left] {
        if visited[right] {
            continue;
        }
        visited[right] = true;
        trail[edge_id] = true;

        let free = match mate[right] {
            None => true,
            Some(current) => try_augment(current, adjacency, mate, visited, trail),
        };
        if free {
            mate[right] = Some(left);
            mate[left] = Some(right);
            return true;
        }
    }
    false
}

fn snapshot(sides: &[Side], edges: &[Edge<()>], mate: &[Option<usize>], visited: &[bool], trail: &[bool]) -> NodeEdgeList<MatchNode, MatchEdge> {
    let nodes = sides
        .iter()
        .enumerate()
        .map(|(u, &side)| MatchNode { side, visited: visited.get(u).copied().unwrap_or(false) })
        .collect();
    let annotated = edges
        .iter()
        .enumerate()
        .map(|(edge_id, edge)| {
            let matched = mate[edge.source] == Some(edge.target);
            Edge::new(edge.source, edge.target, MatchEdge { matched, marked: trail.get(edge_id).copied().unwrap_or(false) })
        })
        .collect();
    NodeEdgeList::new(nodes, annotated).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> BipartiteGraph<()> {
        let edges = [(0, 6), (0, 7), (1, 6), (3, 9), (3, 10), (4, 9), (4, 11), (5, 10)];
        BipartiteGraph::from_edges(6, 6, edges).unwrap()
    }

    #[test]
    fn matches_five_pairs() {
        let run = Hungarian.run(fixture(), &[]).unwrap();
        assert_eq!(run.into_result(), MatchingSummary { matched: 5 });
    }

    #[test]
    fn one_step_per_attempt() {
        let steps: Vec<_> = Hungarian.run(fixture(), &[]).unwrap().collect();
        // initial + one per left vertex + final
        assert_eq!(steps.len(), 8);
        let last = steps.last().unwrap();
        assert_eq!(last.graph.edges().iter().filter(|e| e.datum.matched).count(), 5);
    }

    #[test]
    fn reassignment_frees_a_partner() {
        // 0 grabs 2's only neighbor first and must be evicted through DFS
        let graph = BipartiteGraph::from_edges(2, 2, [(0, 2), (0, 3), (1, 2)]).unwrap();
        let run = Hungarian.run(graph, &[]).unwrap();
        assert_eq!(run.into_result(), MatchingSummary { matched: 2 });
    }

    #[test]
    fn rejects_same_side_edge() {
        assert!(BipartiteGraph::<()>::from_edges(2, 2, [(0, 1)]).is_err());
    }
}
