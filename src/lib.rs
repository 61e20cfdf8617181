//! Classical graph algorithms that expose their internal progress as a lazy,
//! ordered, replayable sequence of graph snapshots.
//!
//! Every algorithm implements [`algorithm::Algorithm`]: `run` validates the
//! graph and its textual arguments up front, then hands back a [`step::Run`],
//! an iterator of [`step::Step`] snapshots that ends in a typed result. The
//! producer only advances when the consumer pulls, so even exponential-size
//! traces cost nothing until they are read, and dropping the iterator stops
//! the work.

pub mod algorithm;
mod disjoint_sets;
pub mod error;
pub mod graph;
pub mod matching;
pub mod maximum_flow;
pub mod minimum_cost_flow;
pub mod planarity;
pub mod residual;
pub mod shortest_path;
pub mod spanning_tree;
pub mod step;
pub mod traversal;

/// Stable ids of every algorithm in the engine, grouped by family.
pub const ALGORITHM_IDS: [&str; 15] = [
    "bfs",
    "dfs",
    "dijkstra",
    "bellman_ford",
    "prim",
    "kruskal",
    "ford_fulkerson",
    "edmonds_karp",
    "dinic",
    "successive_shortest_path",
    "zkw",
    "hungarian",
    "kuhn_munkres",
    "gabow",
    "dmp",
];
