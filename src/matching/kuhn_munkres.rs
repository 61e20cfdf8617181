use std::marker::PhantomData;

use num_traits::NumAssign;

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::error::{EngineError, PreconditionError};
use crate::graph::{BipartiteMatrix, Edge, NodeEdgeList, Side};
use crate::matching::AssignmentSummary;
use crate::step::{Aborted, Emitter, Run};

const ID: &str = "kuhn_munkres";

/// Node annotation: the vertex's current label and whether it sits in the
/// alternating tree (S on the left, T on the right).
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct KmNode<W> {
    pub side: Side,
    pub label: W,
    pub in_tree: bool,
}

/// Edge annotation for the weighted snapshots; `tight` flags edges with
/// `lx[x] + ly[y] == w[x][y]`, the only ones the tree may use.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct KmEdge {
    pub matched: bool,
    pub marked: bool,
    pub tight: bool,
}

/// Kuhn-Munkres weighted perfect matching (assignment) on a square weight
/// matrix. Grows a BFS alternating tree over tight edges, relabeling with
/// the global minimum slack whenever the tree is stuck; yields a Step after
/// each relabel and after each augmenting flip.
#[derive(Default)]
pub struct KuhnMunkres<W> {
    _weight: PhantomData<W>,
}

impl<W> Algorithm for KuhnMunkres<W>
where
    W: NumAssign + Ord + Copy + Send + 'static,
{
    type Graph = BipartiteMatrix<W>;
    type NodeDatum = KmNode<W>;
    type EdgeDatum = KmEdge;
    type Output = AssignmentSummary<W>;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    fn run(&self, graph: Self::Graph, _args: &[&str]) -> Result<Run<KmNode<W>, KmEdge, AssignmentSummary<W>>, EngineError> {
        let (rows, cols) = (graph.num_left(), graph.num_right());
        if rows != cols {
            return Err(PreconditionError::NonSquareWeights { rows, cols }.into());
        }

        Ok(Run::spawn(move |emitter: &Emitter<KmNode<W>, KmEdge>| {
            let n = graph.num_left();
            let weights: Vec<Vec<W>> = (0..n).map(|x| (0..n).map(|y| *graph.weight(x, y)).collect()).collect();

            let mut ws = Workspace {
                n,
                lx: weights.iter().map(|row| row.iter().copied().reduce(W::max).unwrap_or_else(W::zero)).collect(),
                ly: vec![W::zero(); n],
                match_x: vec![None; n],
                match_y: vec![None; n],
                in_s: vec![false; n],
                in_t: vec![false; n],
                slack: vec![None; n],
                slack_from: vec![0; n],
                parent: vec![0; n],
                weights,
            };

            emitter.emit_at(ws.snapshot(), ID, 1)?;

            for root in 0..n {
                ws.grow_tree_and_flip(root, emitter)?;
            }

            let total = (0..n).fold(W::zero(), |acc, x| acc + ws.weights[x][ws.match_x[x].unwrap()]);
            emitter.emit_at(ws.snapshot(), ID, 4)?;
            Ok(AssignmentSummary { matched: n, total })
        }))
    }
}

struct Workspace<W> {
    weights: Vec<Vec<W>>,
    n: usize,
    lx: Vec<W>,
    ly: Vec<W>,
    match_x: Vec<Option<usize>>,
    match_y: Vec<Option<usize>>,
    in_s: Vec<bool>,
    in_t: Vec<bool>,
    /// Minimum `lx + ly - w` over S, per right vertex outside T.
    slack: Vec<Option<W>>,
    slack_from: Vec<usize>,
    /// The S vertex a T vertex was reached from, frozen on entry.
    parent: Vec<usize>,
}

impl<W> Workspace<W>
where
    W: NumAssign + Ord + Copy,
{
    fn add_to_s(&mut self, x: usize) {
        self.in_s[x] = true;
        for y in 0..self.n {
            if self.in_t[y] {
                continue;
            }
            let gap = self.lx[x] + self.ly[y] - self.weights[x][y];
            if self.slack[y].map_or(true, |s| gap < s) {
                self.slack[y] = Some(gap);
                self.slack_from[y] = x;
            }
        }
    }

    fn grow_tree_and_flip(&mut self, root: usize, emitter: &Emitter<KmNode<W>, KmEdge>) -> Result<(), Aborted> {
        self.in_s.fill(false);
        self.in_t.fill(false);
        self.slack.fill(None);
        self.add_to_s(root);

        loop {
            let tight = (0..self.n).find(|&y| !self.in_t[y] && self.slack[y] == Some(W::zero()));
            let y = match tight {
                Some(y) => y,
                None => {
                    self.relabel();
                    emitter.emit_at(self.snapshot(), ID, 2)?;
                    continue;
                }
            };

            self.in_t[y] = true;
            self.parent[y] = self.slack_from[y];
            match self.match_y[y] {
                Some(x2) => self.add_to_s(x2),
                None => {
                    self.flip(y);
                    emitter.emit_at(self.snapshot(), ID, 3)?;
                    return Ok(());
                }
            }
        }
    }

    /// Tighten by the global minimum slack outside T. Labels on S drop and
    /// labels on T rise by the same amount, so matched and tree edges stay
    /// tight while at least one new edge becomes usable.
    fn relabel(&mut self) {
        let delta = (0..self.n).filter(|&y| !self.in_t[y]).filter_map(|y| self.slack[y]).min().unwrap();
        for x in 0..self.n {
            if self.in_s[x] {
                self.lx[x] -= delta;
            }
        }
        for y in 0..self.n {
            if self.in_t[y] {
                self.ly[y] += delta;
            } else if let Some(slack) = self.slack[y].as_mut() {
                *slack -= delta;
            }
        }
        self.debug_check_labels();
    }

    /// `lx[x] + ly[y] >= w[x][y]` must hold for every pair; a breach after
    /// a relabel is an algorithm bug, not bad input.
    fn debug_check_labels(&self) {
        if cfg!(debug_assertions) {
            for x in 0..self.n {
                for y in 0..self.n {
                    debug_assert!(self.lx[x] + self.ly[y] >= self.weights[x][y]);
                }
            }
        }
    }

    /// Augment along the alternating path ending in the exposed `y`.
    fn flip(&mut self, mut y: usize) {
        loop {
            let x = self.parent[y];
            let previous = self.match_x[x];
            self.match_x[x] = Some(y);
            self.match_y[y] = Some(x);
            match previous {
                Some(py) => y = py,
                None => break,
            }
        }
    }

    fn snapshot(&self) -> NodeEdgeList<KmNode<W>, KmEdge> {
        let mut nodes = Vec::with_capacity(2 * self.n);
        for x in 0..self.n {
            nodes.push(KmNode { side: Side::Left, label: self.lx[x], in_tree: self.in_s[x] });
        }
        for y in 0..self.n {
            nodes.push(KmNode { side: Side::Right, label: self.ly[y], in_tree: self.in_t[y] });
        }
        let mut edges = Vec::with_capacity(self.n * self.n);
        for x in 0..self.n {
            for y in 0..self.n {
                let tight = self.lx[x] + self.ly[y] == self.weights[x][y];
                edges.push(Edge::new(
                    x,
                    self.n + y,
                    KmEdge { matched: self.match_x[x] == Some(y), marked: self.in_s[x] && self.in_t[y], tight },
                ));
            }
        }
        NodeEdgeList::new(nodes, edges).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn five_by_five_optimum() {
        let weights = vec![
            vec![3, 4, 6, 4, 9],
            vec![6, 4, 5, 3, 8],
            vec![7, 5, 3, 4, 2],
            vec![6, 3, 2, 2, 5],
            vec![8, 4, 5, 4, 7],
        ];
        let graph = BipartiteMatrix::new(weights).unwrap();
        let run = KuhnMunkres::<i64>::default().run(graph, &[]).unwrap();
        let summary = run.into_result();
        assert_eq!(summary.matched, 5);
        assert_eq!(summary.total, 29);
    }

    #[test]
    fn identity_is_optimal_on_diagonal_matrix() {
        let graph = BipartiteMatrix::new(vec![vec![5, 0], vec![0, 5]]).unwrap();
        let run = KuhnMunkres::<i64>::default().run(graph, &[]).unwrap();
        assert_eq!(run.into_result().total, 10);
    }

    #[test]
    fn rejects_non_square_matrix() {
        let graph = BipartiteMatrix::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let err = KuhnMunkres::<i64>::default().run(graph, &[]).unwrap_err();
        assert_eq!(err, EngineError::Precondition(PreconditionError::NonSquareWeights { rows: 2, cols: 3 }));
    }

    #[test]
    fn final_snapshot_matches_summary() {
        let graph = BipartiteMatrix::new(vec![vec![2, 1], vec![1, 2]]).unwrap();
        let mut run = KuhnMunkres::<i64>::default().run(graph, &[]).unwrap();
        let last = run.by_ref().last().unwrap();
        assert_eq!(last.graph.edges().iter().filter(|e| e.datum.matched).count(), 2);
        assert_eq!(run.into_result().total, 4);
    }
}
