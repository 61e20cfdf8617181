use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ops::Neg;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{EdgeList, Graph};
use crate::minimum_cost_flow::{parse_cost_flow_args, CostFlowSummary, COST_FLOW_PARAMETERS};
use crate::residual::{FlowDatum, ResidualNetwork, ResidualNode, ResidualView, NONE};
use crate::step::{Emitter, Run};

const ID: &str = "zkw";

/// Zkw-style min-cost flow: one SPFA pass seeds node potentials, then DFS
/// augments along zero-reduced-cost arcs only; when the DFS gets stuck, a
/// relabel pass raises the potentials of the vertices the DFS reached by the
/// minimum reduced cost across the cut. Amortizes the cost-shortest-path
/// search over many augmentations.
#[derive(Default)]
pub struct Zkw<Flow> {
    _flow: PhantomData<Flow>,
}

impl<Flow> Algorithm for Zkw<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Send + std::str::FromStr + 'static,
{
    type Graph = EdgeList<FlowDatum<Flow>>;
    type NodeDatum = ResidualNode;
    type EdgeDatum = ResidualView<Flow>;
    type Output = CostFlowSummary<Flow>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &COST_FLOW_PARAMETERS
    }

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<ResidualNode, ResidualView<Flow>, CostFlowSummary<Flow>>, EngineError> {
        let (source, sink, mut limit) = parse_cost_flow_args::<Flow>(args, graph.num_nodes())?;
        let mut net = ResidualNetwork::from_graph(&graph)?;

        Ok(Run::spawn(move |emitter: &Emitter<ResidualNode, ResidualView<Flow>>| {
            emitter.emit_at(net.snapshot(), ID, 1)?;

            let num_nodes = net.num_nodes();
            let mut potentials = match initial_potentials(&net, source, sink) {
                Some(potentials) => potentials,
                None => {
                    // sink unreachable; nothing to route
                    emitter.emit_at(net.snapshot(), ID, 5)?;
                    return Ok(CostFlowSummary { flow: Flow::zero(), cost: Flow::zero() });
                }
            };
            emitter.emit_at(net.snapshot(), ID, 2)?;

            let mut flow = Flow::zero();
            let mut visited = vec![false; num_nodes];
            'phases: loop {
                // push as much as the zero-reduced-cost subgraph admits
                loop {
                    if limit.exhausted() {
                        break 'phases;
                    }
                    visited.fill(false);
                    let upper = limit.cap(source_bound(&net, source));
                    if upper == Flow::zero() {
                        break 'phases;
                    }
                    let delta = dfs(&mut net, source, sink, upper, &mut visited, &potentials);
                    if delta == Flow::zero() {
                        break;
                    }
                    flow += delta;
                    limit.consume(delta);
                    emitter.emit_at(net.snapshot(), ID, 3)?;
                }

                // refresh potentials across the cut the failed DFS exposed:
                // raising the unvisited side by the minimum crossing reduced
                // cost turns the cheapest crossing arcs tight
                match relabel_delta(&net, &visited, &potentials) {
                    Some(delta) => {
                        for u in 0..num_nodes {
                            if !visited[u] {
                                potentials[u] += delta;
                            }
                        }
                        emitter.emit_at(net.snapshot(), ID, 4)?;
                    }
                    None => break,
                }
            }

            let cost = net.total_cost();
            emitter.emit_at(net.snapshot(), ID, 5)?;
            Ok(CostFlowSummary { flow, cost })
        }))
    }
}

fn source_bound<Flow>(net: &ResidualNetwork<Flow>, source: usize) -> Flow
where
    Flow: NumAssign + Ord + Copy,
{
    let mut bound = Flow::zero();
    let mut arc_id = net.first_arc(source);
    while arc_id != NONE {
        bound += net.arc(arc_id).capacity;
        arc_id = net.arc(arc_id).next;
    }
    bound
}

/// SPFA distances by cost from the source; None when the sink is
/// unreachable. Unreachable vertices keep potential zero, which is safe
/// because no residual arc can reach them.
fn initial_potentials<Flow>(net: &ResidualNetwork<Flow>, source: usize, sink: usize) -> Option<Vec<Flow>>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    let num_nodes = net.num_nodes();
    let mut dist: Vec<Option<Flow>> = vec![None; num_nodes];
    let mut in_queue = vec![false; num_nodes];

    dist[source] = Some(Flow::zero());
    let mut queue = VecDeque::from([source]);
    in_queue[source] = true;

    while let Some(u) = queue.pop_front() {
        in_queue[u] = false;
        let du = dist[u].unwrap();

        let mut arc_id = net.first_arc(u);
        while arc_id != NONE {
            let arc = net.arc(arc_id);
            if arc.capacity > Flow::zero() {
                let candidate = du + arc.cost;
                if dist[arc.to].map_or(true, |d| candidate < d) {
                    dist[arc.to] = Some(candidate);
                    if !in_queue[arc.to] {
                        in_queue[arc.to] = true;
                        queue.push_back(arc.to);
                    }
                }
            }
            arc_id = arc.next;
        }
    }

    dist[sink]?;
    Some(dist.into_iter().map(|d| d.unwrap_or_else(Flow::zero)).collect())
}

#[inline]
fn reduced_cost<Flow>(potentials: &[Flow], u: usize, to: usize, cost: Flow) -> Flow
where
    Flow: NumAssign + Copy,
{
    cost + potentials[u] - potentials[to]
}

/// Single-path DFS restricted to residual arcs with zero reduced cost.
fn dfs<Flow>(net: &mut ResidualNetwork<Flow>, u: usize, sink: usize, upper: Flow, visited: &mut [bool], potentials: &[Flow]) -> Flow
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    if u == sink {
        return upper;
    }
    visited[u] = true;

    let mut arc_id = net.first_arc(u);
    while arc_id != NONE {
        let (to, residual, cost, next) = {
            let arc = net.arc(arc_id);
            (arc.to, arc.capacity, arc.cost, arc.next)
        };
        if !visited[to] && residual > Flow::zero() && reduced_cost(potentials, u, to, cost) == Flow::zero() {
            let delta = dfs(net, to, sink, upper.min(residual), visited, potentials);
            if delta > Flow::zero() {
                net.push(arc_id, delta);
                return delta;
            }
        }
        arc_id = next;
    }
    Flow::zero()
}

/// Minimum reduced cost over residual arcs leaving the visited set.
fn relabel_delta<Flow>(net: &ResidualNetwork<Flow>, visited: &[bool], potentials: &[Flow]) -> Option<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    let mut best: Option<Flow> = None;
    for u in 0..net.num_nodes() {
        if !visited[u] {
            continue;
        }
        let mut arc_id = net.first_arc(u);
        while arc_id != NONE {
            let arc = net.arc(arc_id);
            if arc.capacity > Flow::zero() && !visited[arc.to] {
                let reduced = reduced_cost(potentials, u, arc.to, arc.cost);
                debug_assert!(reduced >= Flow::zero());
                best = Some(best.map_or(reduced, |b: Flow| b.min(reduced)));
            }
            arc_id = arc.next;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeList;

    fn fixture() -> EdgeList<FlowDatum<i64>> {
        let edges = [(0, 1, 1, 2), (0, 2, 4, 6), (1, 2, 1, 2), (1, 3, 4, 6), (2, 3, 1, 2)];
        EdgeList::from_edges(4, edges.iter().map(|&(s, t, c, w)| (s, t, FlowDatum::with_cost(c, w)))).unwrap()
    }

    #[test]
    fn limited_to_one_unit() {
        let run = Zkw::<i64>::default().run(fixture(), &["0", "3", "1"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 1, cost: 6 });
    }

    #[test]
    fn agrees_with_successive_shortest_path_when_unlimited() {
        let run = Zkw::<i64>::default().run(fixture(), &["0", "3", "infinity"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 2, cost: 16 });
    }

    #[test]
    fn unreachable_sink() {
        let graph = EdgeList::from_edges(3, [(0, 1, FlowDatum::with_cost(2i64, 1))]).unwrap();
        let run = Zkw::<i64>::default().run(graph, &["0", "2", "inf"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 0, cost: 0 });
    }
}
