use std::collections::BTreeSet;

/// Reduce a graph to a planarity-equivalent core: drop self-loops and
/// parallel edges, then repeatedly delete vertices of degree zero or one and
/// contract vertices of degree two, until nothing changes. Surviving
/// vertices are renumbered densely; the result is `(num_nodes, edges)` with
/// every edge stored as `source < target`.
pub fn simplify(num_nodes: usize, edges: &[(usize, usize)]) -> (usize, Vec<(usize, usize)>) {
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); num_nodes];
    for &(u, v) in edges {
        if u != v {
            adjacency[u].insert(v);
            adjacency[v].insert(u);
        }
    }

    let mut alive = vec![true; num_nodes];
    let mut changed = true;
    while changed {
        changed = false;
        for v in 0..num_nodes {
            if !alive[v] {
                continue;
            }
            match adjacency[v].len() {
                0 | 1 => {
                    remove(&mut adjacency, &mut alive, v);
                    changed = true;
                }
                2 => {
                    let mut ends = adjacency[v].iter();
                    let (a, b) = (*ends.next().unwrap(), *ends.next().unwrap());
                    remove(&mut adjacency, &mut alive, v);
                    // contracting onto an existing edge just drops the parallel copy
                    adjacency[a].insert(b);
                    adjacency[b].insert(a);
                    changed = true;
                }
                _ => {}
            }
        }
    }

    let mut renumber = vec![usize::MAX; num_nodes];
    let mut next = 0;
    for v in 0..num_nodes {
        if alive[v] {
            renumber[v] = next;
            next += 1;
        }
    }

    let mut reduced = Vec::new();
    for u in 0..num_nodes {
        for &v in &adjacency[u] {
            if u < v {
                reduced.push((renumber[u], renumber[v]));
            }
        }
    }
    (next, reduced)
}

fn remove(adjacency: &mut [BTreeSet<usize>], alive: &mut [bool], v: usize) {
    let neighbors: Vec<usize> = adjacency[v].iter().copied().collect();
    for w in neighbors {
        adjacency[w].remove(&v);
    }
    adjacency[v].clear();
    alive[v] = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_vanishes() {
        let (n, edges) = simplify(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]);
        assert_eq!(n, 0);
        assert!(edges.is_empty());
    }

    #[test]
    fn cycle_contracts_away() {
        // every vertex of a plain cycle has degree two
        let (n, _) = simplify(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        assert_eq!(n, 0);
    }

    #[test]
    fn subdivision_contracts_to_the_original() {
        // K4 with every edge subdivided once: 4 + 6 vertices, 12 edges
        let branch = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut edges = Vec::new();
        for (i, &(u, v)) in branch.iter().enumerate() {
            let mid = 4 + i;
            edges.push((u, mid));
            edges.push((mid, v));
        }
        let (n, reduced) = simplify(10, &edges);
        assert_eq!(n, 4);
        assert_eq!(reduced.len(), 6);
    }

    #[test]
    fn self_loops_and_parallels_are_dropped() {
        let (n, reduced) = simplify(4, &[(0, 0), (0, 1), (1, 0), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(n, 4);
        assert_eq!(reduced.len(), 6);
    }
}
