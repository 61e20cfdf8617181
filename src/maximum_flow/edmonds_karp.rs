use std::collections::VecDeque;
use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::EngineError;
use crate::graph::{EdgeList, Graph};
use crate::maximum_flow::{parse_source_sink, FlowSummary, SOURCE_SINK_PARAMETERS};
use crate::residual::{FlowDatum, ResidualNetwork, ResidualNode, ResidualView, NONE};
use crate::step::{Emitter, Run};

const ID: &str = "edmonds_karp";

/// Maximum flow by shortest (fewest-arc) augmenting paths found with BFS,
/// which bounds the number of augmentations polynomially.
#[derive(Default)]
pub struct EdmondsKarp<Flow> {
    _flow: PhantomData<Flow>,
}

impl<Flow> Algorithm for EdmondsKarp<Flow>
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

            let num_nodes = net.num_nodes();
            let mut flow = Flow::zero();
            let mut prev = vec![NONE; num_nodes]; // arc that discovered each node
            let mut visited = vec![false; num_nodes];

            loop {
                prev.fill(NONE);
                visited.fill(false);
                visited[source] = true;

                let mut queue = VecDeque::from([source]);
                while let Some(u) = queue.pop_front() {
                    if u == sink {
                        break;
                    }
                    let mut arc_id = net.first_arc(u);
                    while arc_id != NONE {
                        let arc = net.arc(arc_id);
                        if !visited[arc.to] && arc.capacity > Flow::zero() {
                            visited[arc.to] = true;
                            prev[arc.to] = arc_id;
                            queue.push_back(arc.to);
                        }
                        arc_id = arc.next;
                    }
                }

                if !visited[sink] {
                    break;
                }

                // bottleneck along the predecessor chain
                let mut delta = net.arc(prev[sink]).capacity;
                let mut v = sink;
                while v != source {
                    let arc_id = prev[v];
                    delta = delta.min(net.arc(arc_id).capacity);
                    v = net.arc(arc_id ^ 1).to;
                }

                let mut v = sink;
                while v != source {
                    let arc_id = prev[v];
                    net.push(arc_id, delta);
                    v = net.arc(arc_id ^ 1).to;
                }

                flow += delta;
                emitter.emit_at(net.snapshot(), ID, 2)?;
            }

            emitter.emit_at(net.snapshot(), ID, 3)?;
            Ok(FlowSummary { flow })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeList;

    fn textbook() -> EdgeList<FlowDatum<i64>> {
        let edges = [(0, 1, 1), (0, 3, 1), (1, 4, 1), (2, 5, 1), (3, 2, 1), (3, 4, 1), (4, 5, 1)];
        EdgeList::from_edges(6, edges.iter().map(|&(s, t, c)| (s, t, FlowDatum::capacity(c)))).unwrap()
    }

    #[test]
    fn textbook_network() {
        let run = EdmondsKarp::<i64>::default().run(textbook(), &["0", "5"]).unwrap();
        assert_eq!(run.into_result(), FlowSummary { flow: 2 });
    }

    #[test]
    fn disconnected_sink_keeps_zero_flow() {
        let graph = EdgeList::from_edges(3, [(0, 1, FlowDatum::capacity(5i64))]).unwrap();
        let run = EdmondsKarp::<i64>::default().run(graph, &["0", "2"]).unwrap();
        assert_eq!(run.into_result(), FlowSummary { flow: 0 });
    }
}
