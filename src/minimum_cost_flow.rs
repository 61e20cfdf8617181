pub mod successive_shortest_path;
pub mod zkw;

pub use successive_shortest_path::SuccessiveShortestPath;
pub use zkw::Zkw;

use num_traits::NumAssign;

use crate::algorithm::{parse_limit, require_arg, Limit, ParameterDescriptor, ParameterKind};
use crate::error::EngineError;
use crate::maximum_flow::parse_source_sink;
use crate::residual::ResidualNetwork;

/// Final result of a min-cost-flow run.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct CostFlowSummary<Flow> {
    pub flow: Flow,
    pub cost: Flow,
}

pub(crate) const COST_FLOW_PARAMETERS: [ParameterDescriptor; 3] = [
    ParameterDescriptor { name: "source", description: "vertex the flow originates from", kind: ParameterKind::Vertex },
    ParameterDescriptor { name: "sink", description: "vertex the flow drains into", kind: ParameterKind::Vertex },
    ParameterDescriptor { name: "limit", description: "bound on total flow, or inf", kind: ParameterKind::Amount },
];

pub(crate) fn parse_cost_flow_args<Flow>(args: &[&str], num_nodes: usize) -> Result<(usize, usize, Limit<Flow>), EngineError>
where
    Flow: std::str::FromStr + num_traits::Zero + PartialOrd,
{
    let (source, sink) = parse_source_sink(args, num_nodes)?;
    let limit = parse_limit("limit", require_arg("limit", args, 2)?)?;
    Ok((source, sink, limit))
}

/// Residual bottleneck along a predecessor-arc chain ending at `sink`.
pub(crate) fn path_bottleneck<Flow>(net: &ResidualNetwork<Flow>, prev: &[usize], source: usize, sink: usize) -> Flow
where
    Flow: NumAssign + Ord + Copy,
{
    let mut delta = net.arc(prev[sink]).capacity;
    let mut v = sink;
    while v != source {
        let arc_id = prev[v];
        delta = delta.min(net.arc(arc_id).capacity);
        v = net.arc(arc_id ^ 1).to;
    }
    delta
}

pub(crate) fn push_along_path<Flow>(net: &mut ResidualNetwork<Flow>, prev: &[usize], source: usize, sink: usize, delta: Flow)
where
    Flow: NumAssign + Ord + Copy,
{
    let mut v = sink;
    while v != source {
        let arc_id = prev[v];
        net.push(arc_id, delta);
        v = net.arc(arc_id ^ 1).to;
    }
}
