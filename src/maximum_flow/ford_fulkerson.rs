use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{EdgeList, Graph};
use crate::maximum_flow::{parse_source_sink, FlowSummary, SOURCE_SINK_PARAMETERS};
use crate::residual::{FlowDatum, ResidualNetwork, ResidualNode, ResidualView, NONE};
use crate::step::{Emitter, Run};

const ID: &str = "ford_fulkerson";

/// Maximum flow by repeated DFS augmentation with per-round visited marking.
/// Yields a Step after the residual build and after every augmenting path.
#[derive(Default)]
pub struct FordFulkerson<Flow> {
    _flow: PhantomData<Flow>,
}

impl<Flow> Algorithm for FordFulkerson<Flow>
where
    Flow: NumAssign + Ord + Copy + Send + 'static,
{
    type Graph = EdgeList<FlowDatum<Flow>>;
    type NodeDatum = ResidualNode;
    type EdgeDatum = ResidualView<Flow>;
    type Output = FlowSummary<Flow>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &SOURCE_SINK_PARAMETERS
    }

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<ResidualNode, ResidualView<Flow>, FlowSummary<Flow>>, EngineError> {
        let (source, sink) = parse_source_sink(args, graph.num_nodes())?;
        let mut net = ResidualNetwork::from_graph(&graph)?;

        Ok(Run::spawn(move |emitter: &Emitter<ResidualNode, ResidualView<Flow>>| {
            emitter.emit_at(net.snapshot(), ID, 1)?;

            let mut flow = Flow::zero();
            let bound = max_bound(&net, source);
            let mut visited = vec![false; net.num_nodes()];
            loop {
                visited.fill(false);
                match dfs(&mut net, source, sink, bound, &mut visited) {
                    Some(delta) if delta > Flow::zero() => {
                        flow += delta;
                        emitter.emit_at(net.snapshot(), ID, 2)?;
                    }
                    _ => break,
                }
            }

            emitter.emit_at(net.snapshot(), ID, 3)?;
            Ok(FlowSummary { flow })
        }))
    }
}

/// Sum of residual capacity leaving the source bounds any augmentation.
fn max_bound<Flow>(net: &ResidualNetwork<Flow>, source: usize) -> Flow
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

fn dfs<Flow>(net: &mut ResidualNetwork<Flow>, u: usize, sink: usize, flow: Flow, visited: &mut [bool]) -> Option<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    if u == sink {
        return Some(flow);
    }
    visited[u] = true;

    let mut arc_id = net.first_arc(u);
    while arc_id != NONE {
        let (to, residual, next) = {
            let arc = net.arc(arc_id);
            (arc.to, arc.capacity, arc.next)
        };
        if !visited[to] && residual > Flow::zero() {
            if let Some(delta) = dfs(net, to, sink, flow.min(residual), visited) {
                net.push(arc_id, delta);
                return Some(delta);
            }
        }
        arc_id = next;
    }
    None
}
