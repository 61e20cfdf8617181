use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ops::Neg;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{EdgeList, Graph};
use crate::minimum_cost_flow::{parse_cost_flow_args, path_bottleneck, push_along_path, CostFlowSummary, COST_FLOW_PARAMETERS};
use crate::residual::{FlowDatum, ResidualNetwork, ResidualNode, ResidualView, NONE};
use crate::step::{Emitter, Run};

const ID: &str = "successive_shortest_path";

/// Classical min-cost flow: each round finds a cheapest augmenting path on
/// the residual graph with SPFA (backward arcs carry negated costs, so a
/// label-correcting search is required) and augments along it, bounded by
/// the optional total-flow limit.
#[derive(Default)]
pub struct SuccessiveShortestPath<Flow> {
    _flow: PhantomData<Flow>,
}

impl<Flow> Algorithm for SuccessiveShortestPath<Flow>
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

            let mut flow = Flow::zero();
            while !limit.exhausted() {
                let prev = match cheapest_path(&net, source, sink) {
                    Some(prev) => prev,
                    None => break,
                };

                let delta = limit.cap(path_bottleneck(&net, &prev, source, sink));
                if delta == Flow::zero() {
                    break;
                }
                push_along_path(&mut net, &prev, source, sink, delta);
                flow += delta;
                limit.consume(delta);
                emitter.emit_at(net.snapshot(), ID, 2)?;
            }

            let cost = net.total_cost();
            emitter.emit_at(net.snapshot(), ID, 3)?;
            Ok(CostFlowSummary { flow, cost })
        }))
    }
}

/// SPFA by cost over residual arcs; returns the predecessor-arc chain of a
/// cheapest source-sink path, or None when the sink is unreachable.
fn cheapest_path<Flow>(net: &ResidualNetwork<Flow>, source: usize, sink: usize) -> Option<Vec<usize>>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    let num_nodes = net.num_nodes();
    let mut dist: Vec<Option<Flow>> = vec![None; num_nodes];
    let mut prev = vec![NONE; num_nodes];
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
                    prev[arc.to] = arc_id;
                    if !in_queue[arc.to] {
                        in_queue[arc.to] = true;
                        queue.push_back(arc.to);
                    }
                }
            }
            arc_id = arc.next;
        }
    }

    dist[sink].map(|_| prev)
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
        let run = SuccessiveShortestPath::<i64>::default().run(fixture(), &["0", "3", "1"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 1, cost: 6 });
    }

    #[test]
    fn unlimited_fills_the_network() {
        // second unit has to undo the cheap 1->2 detour through a backward arc
        let run = SuccessiveShortestPath::<i64>::default().run(fixture(), &["0", "3", "inf"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 2, cost: 16 });
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let run = SuccessiveShortestPath::<i64>::default().run(fixture(), &["0", "3", "0"]).unwrap();
        assert_eq!(run.into_result(), CostFlowSummary { flow: 0, cost: 0 });
    }
}
