pub mod dinic;
pub mod edmonds_karp;
pub mod ford_fulkerson;

pub use dinic::Dinic;
pub use edmonds_karp::EdmondsKarp;
pub use ford_fulkerson::FordFulkerson;

use crate::algorithm::{parse_vertex, require_arg, ParameterDescriptor, ParameterKind};
use crate::error::{EngineError, PreconditionError};

/// Final result of a maximum-flow run, consistent with the last snapshot's
/// `used` annotations.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct FlowSummary<Flow> {
    pub flow: Flow,
}

pub(crate) const SOURCE_SINK_PARAMETERS: [ParameterDescriptor; 2] = [
    ParameterDescriptor { name: "source", description: "vertex the flow originates from", kind: ParameterKind::Vertex },
    ParameterDescriptor { name: "sink", description: "vertex the flow drains into", kind: ParameterKind::Vertex },
];

pub(crate) fn parse_source_sink(args: &[&str], num_nodes: usize) -> Result<(usize, usize), EngineError> {
    if num_nodes == 0 {
        return Err(PreconditionError::EmptyGraph.into());
    }
    let source = parse_vertex("source", require_arg("source", args, 0)?, num_nodes)?;
    let sink = parse_vertex("sink", require_arg("sink", args, 1)?, num_nodes)?;
    if source == sink {
        return Err(PreconditionError::SourceIsSink.into());
    }
    Ok((source, sink))
}
