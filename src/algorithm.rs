use num_traits::Zero;

use crate::error::{EngineError, ParameterError};
use crate::step::Run;

/// What kind of input field a runtime parameter wants.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ParameterKind {
    /// An integer node id in `[0, num_nodes)`.
    Vertex,
    /// A non-negative amount, or one of the tokens `inf`, `infty`, `infinity`.
    Amount,
}

/// Declares one runtime parameter of an algorithm for the caller/UI.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
}

/// The uniform contract every algorithm in the engine implements.
///
/// `run` parses `args` against the declared descriptors, checks its
/// preconditions synchronously, and only then spawns the lazy Step sequence;
/// nothing about a bad input ever surfaces inside the sequence itself.
pub trait Algorithm {
    type Graph;
    type NodeDatum: Clone + Send + 'static;
    type EdgeDatum: Clone + Send + 'static;
    type Output: Send + 'static;

    /// Stable key identifying this algorithm.
    fn id(&self) -> &'static str;

    fn parameters(&self) -> &'static [ParameterDescriptor];

    fn run(&self, graph: Self::Graph, args: &[&str]) -> Result<Run<Self::NodeDatum, Self::EdgeDatum, Self::Output>, EngineError>;
}

/// An optional bound on total flow. Keeps the infinity sentinel out of flow
/// arithmetic entirely; no amount is ever added to it.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Limit<Flow> {
    Finite(Flow),
    Infinite,
}

impl<Flow> Limit<Flow>
where
    Flow: Zero + Ord + Copy + std::ops::Sub<Output = Flow>,
{
    /// Clamp `amount` to what the limit still allows.
    pub fn cap(&self, amount: Flow) -> Flow {
        match self {
            Limit::Finite(remaining) => amount.min(*remaining),
            Limit::Infinite => amount,
        }
    }

    pub fn consume(&mut self, amount: Flow) {
        if let Limit::Finite(remaining) = self {
            debug_assert!(amount <= *remaining);
            *remaining = *remaining - amount;
        }
    }

    pub fn exhausted(&self) -> bool {
        matches!(self, Limit::Finite(remaining) if remaining.is_zero())
    }
}

pub(crate) fn require_arg<'a>(name: &'static str, args: &[&'a str], index: usize) -> Result<&'a str, ParameterError> {
    args.get(index).copied().ok_or(ParameterError::Missing { name })
}

/// Parse an integer node id in `[0, num_nodes)`.
pub fn parse_vertex(name: &'static str, text: &str, num_nodes: usize) -> Result<usize, ParameterError> {
    let value: usize = text.trim().parse().map_err(|_| ParameterError::NotAnInteger { name, text: text.to_string() })?;
    if value >= num_nodes {
        return Err(ParameterError::VertexOutOfRange { name, value, num_nodes });
    }
    Ok(value)
}

/// Parse a non-negative flow amount; `inf`, `infty` and `infinity` (any
/// case) denote no bound.
pub fn parse_limit<Flow>(name: &'static str, text: &str) -> Result<Limit<Flow>, ParameterError>
where
    Flow: std::str::FromStr + Zero + PartialOrd,
{
    match text.trim().to_ascii_lowercase().as_str() {
        "inf" | "infty" | "infinity" => Ok(Limit::Infinite),
        trimmed => {
            let value: Flow = trimmed.parse().map_err(|_| ParameterError::NotAnAmount { name, text: text.to_string() })?;
            if value < Flow::zero() {
                return Err(ParameterError::NotAnAmount { name, text: text.to_string() });
            }
            Ok(Limit::Finite(value))
        }
    }
}
