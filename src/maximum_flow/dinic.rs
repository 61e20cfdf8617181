use std::collections::VecDeque;
use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{EdgeList, Graph};
use crate::maximum_flow::{parse_source_sink, FlowSummary, SOURCE_SINK_PARAMETERS};
use crate::residual::{FlowDatum, ResidualNetwork, ResidualNode, ResidualView, NONE};
use crate::step::{Emitter, Run};

const ID: &str = "dinic";

/// Maximum flow alternating BFS level-graph construction (distance to the
/// sink) with a current-arc DFS that only follows level-decreasing arcs.
/// Yields after each level build, each augmenting path, and each phase.
#[derive(Default)]
pub struct Dinic<Flow> {
    _flow: PhantomData<Flow>,
}

struct Workspace<Flow> {
    net: ResidualNetwork<Flow>,
    distances: Vec<usize>, // distance to sink, num_nodes = unreachable
    current_arc: Vec<usize>,
}

impl<Flow> Algorithm for Dinic<Flow>
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
        let net = ResidualNetwork::from_graph(&graph)?;

        Ok(Run::spawn(move |emitter: &Emitter<ResidualNode, ResidualView<Flow>>| {
            let num_nodes = net.num_nodes();
            let mut ws = Workspace { net, distances: vec![num_nodes; num_nodes], current_arc: vec![NONE; num_nodes] };
            emitter.emit_at(ws.net.snapshot(), ID, 1)?;

            let mut flow = Flow::zero();
            loop {
                update_distances(&mut ws, source, sink);
                emitter.emit_at(ws.net.snapshot_with_distances(&ws.distances), ID, 2)?;

                // no s-t path left
                if ws.distances[source] >= num_nodes {
                    break;
                }

                for u in 0..num_nodes {
                    ws.current_arc[u] = ws.net.first_arc(u);
                }

                let bound = source_bound(&ws.net, source);
                let mut phase_flow = Flow::zero();
                while let Some(delta) = dfs(&mut ws, source, sink, bound) {
                    if delta == Flow::zero() {
                        break;
                    }
                    phase_flow += delta;
                    emitter.emit_at(ws.net.snapshot_with_distances(&ws.distances), ID, 3)?;
                }

                flow += phase_flow;
                emitter.emit_at(ws.net.snapshot_with_distances(&ws.distances), ID, 4)?;
            }

            emitter.emit_at(ws.net.snapshot(), ID, 5)?;
            Ok(FlowSummary { flow })
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

/// BFS from the sink over reversed residual arcs.
fn update_distances<Flow>(ws: &mut Workspace<Flow>, source: usize, sink: usize)
where
    Flow: NumAssign + Ord + Copy,
{
    let num_nodes = ws.net.num_nodes();
    ws.distances.fill(num_nodes);
    ws.distances[sink] = 0;

    let mut queue = VecDeque::from([sink]);
    while let Some(v) = queue.pop_front() {
        let mut arc_id = ws.net.first_arc(v);
        while arc_id != NONE {
            let arc = ws.net.arc(arc_id);
            // the partner arc runs arc.to -> v
            if ws.net.arc(arc_id ^ 1).capacity > Flow::zero() && ws.distances[arc.to] == num_nodes {
                ws.distances[arc.to] = ws.distances[v] + 1;
                if arc.to != source {
                    queue.push_back(arc.to);
                }
            }
            arc_id = arc.next;
        }
    }
}

/// Find one augmenting path through the level graph, advancing each node's
/// current-arc cursor past dead arcs so a phase never rescans them.
fn dfs<Flow>(ws: &mut Workspace<Flow>, u: usize, sink: usize, upper: Flow) -> Option<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    if u == sink {
        return Some(upper);
    }

    while ws.current_arc[u] != NONE {
        let arc_id = ws.current_arc[u];
        let (to, residual, next) = {
            let arc = ws.net.arc(arc_id);
            (arc.to, arc.capacity, arc.next)
        };
        if residual > Flow::zero() && ws.distances[u] == ws.distances[to] + 1 {
            if let Some(delta) = dfs(ws, to, sink, upper.min(residual)) {
                ws.net.push(arc_id, delta);
                return Some(delta);
            }
        }
        ws.current_arc[u] = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeList;
    use crate::step::Step;

    fn textbook() -> EdgeList<FlowDatum<i64>> {
        let edges = [(0, 1, 1), (0, 3, 1), (1, 4, 1), (2, 5, 1), (3, 2, 1), (3, 4, 1), (4, 5, 1)];
        EdgeList::from_edges(6, edges.iter().map(|&(s, t, c)| (s, t, FlowDatum::capacity(c)))).unwrap()
    }

    #[test]
    fn textbook_network() {
        let run = Dinic::<i64>::default().run(textbook(), &["0", "5"]).unwrap();
        assert_eq!(run.into_result(), FlowSummary { flow: 2 });
    }

    #[test]
    fn level_snapshots_carry_distances() {
        let steps: Vec<Step<_, _>> = Dinic::<i64>::default().run(textbook(), &["0", "5"]).unwrap().collect();
        let level_step = &steps[1]; // first snapshot after a level build
        let nodes = level_step.graph.nodes();
        assert_eq!(nodes[5].datum.distance, Some(0));
        assert_eq!(nodes[4].datum.distance, Some(1));
        assert_eq!(nodes[0].datum.distance, Some(3));
    }

    #[test]
    fn wide_network() {
        // two disjoint unit paths plus a cross edge
        let edges = [(0, 1, 2), (0, 2, 1), (1, 3, 1), (1, 2, 1), (2, 3, 2)];
        let graph = EdgeList::from_edges(4, edges.iter().map(|&(s, t, c)| (s, t, FlowDatum::capacity(c)))).unwrap();
        let run = Dinic::<i64>::default().run(graph, &["0", "3"]).unwrap();
        assert_eq!(run.into_result(), FlowSummary { flow: 3 });
    }
}
