use thiserror::Error;

/// Representation invariant violated while constructing or converting a graph.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("matrix is not square: {rows} rows, {cols} columns in row {row}")]
    NotSquare { rows: usize, cols: usize, row: usize },

    #[error("undirected matrix is asymmetric at ({i}, {j})")]
    Asymmetric { i: usize, j: usize },

    // thiserror reserves the field name `source` for causes, hence from/to
    #[error("edge ({from}, {to}) references a node outside 0..{num_nodes}")]
    NodeOutOfRange { from: usize, to: usize, num_nodes: usize },

    #[error("self-loop at node {node} is not allowed in this representation")]
    SelfLoop { node: usize },

    #[error("second edge between {from} and {to} collides in this representation")]
    DuplicateEdge { from: usize, to: usize },

    #[error("edge ({from}, {to}) joins two nodes on the same side of the bipartition")]
    SameSide { from: usize, to: usize },

    #[error("weight matrix rows have unequal lengths: row {row} has {cols}, expected {expected}")]
    RaggedMatrix { row: usize, cols: usize, expected: usize },
}

/// A runtime parameter failed to parse or validate against its descriptor.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterError {
    #[error("{name}: missing argument")]
    Missing { name: &'static str },

    #[error("{name}: expected an integer, got {text:?}")]
    NotAnInteger { name: &'static str, text: String },

    #[error("{name}: vertex {value} is outside 0..{num_nodes}")]
    VertexOutOfRange { name: &'static str, value: usize, num_nodes: usize },

    #[error("{name}: expected a non-negative amount or inf/infty/infinity, got {text:?}")]
    NotAnAmount { name: &'static str, text: String },
}

/// The graph handed to `run` does not satisfy the algorithm's preconditions.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PreconditionError {
    #[error("self-loop at node {node}")]
    SelfLoop { node: usize },

    #[error("parallel edge between {from} and {to}")]
    ParallelEdge { from: usize, to: usize },

    #[error("weight matrix is {rows}x{cols}, expected square")]
    NonSquareWeights { rows: usize, cols: usize },

    #[error("source and sink must be distinct")]
    SourceIsSink,

    #[error("negative weight on edge ({from}, {to})")]
    NegativeWeight { from: usize, to: usize },

    #[error("graph has no nodes")]
    EmptyGraph,
}

/// Umbrella error for everything that can go wrong before the first Step.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}
