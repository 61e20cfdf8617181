const NONE: usize = usize::MAX;

/// Split a simple undirected graph into its biconnected components, each
/// returned as a list of edges. Lowpoint DFS with an edge stack; every edge
/// lands in exactly one component.
pub fn biconnected_components(num_nodes: usize, edges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); num_nodes];
    for (edge_id, &(u, v)) in edges.iter().enumerate() {
        adjacency[u].push((edge_id, v));
        adjacency[v].push((edge_id, u));
    }

    let mut state = State {
        adjacency,
        order: vec![NONE; num_nodes],
        low: vec![NONE; num_nodes],
        counter: 0,
        stack: Vec::new(),
        components: Vec::new(),
    };
    for root in 0..num_nodes {
        if state.order[root] == NONE {
            state.dfs(root, NONE);
        }
    }

    state.components.into_iter().map(|ids| ids.into_iter().map(|edge_id| edges[edge_id]).collect()).collect()
}

struct State {
    adjacency: Vec<Vec<(usize, usize)>>,
    order: Vec<usize>,
    low: Vec<usize>,
    counter: usize,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl State {
    fn dfs(&mut self, u: usize, parent_edge: usize) {
        self.order[u] = self.counter;
        self.low[u] = self.counter;
        self.counter += 1;

        for i in 0..self.adjacency[u].len() {
            let (edge_id, v) = self.adjacency[u][i];
            if edge_id == parent_edge {
                continue;
            }
            if self.order[v] == NONE {
                self.stack.push(edge_id);
                self.dfs(v, edge_id);
                self.low[u] = self.low[u].min(self.low[v]);
                if self.low[v] >= self.order[u] {
                    // u is an articulation point (or the root): pop one component
                    let mut component = Vec::new();
                    while let Some(popped) = self.stack.pop() {
                        component.push(popped);
                        if popped == edge_id {
                            break;
                        }
                    }
                    self.components.push(component);
                }
            } else if self.order[v] < self.order[u] {
                self.stack.push(edge_id);
                self.low[u] = self.low[u].min(self.order[v]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_separates_two_triangles() {
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)];
        let mut components = biconnected_components(6, &edges);
        components.sort_by_key(|c| c.len());
        assert_eq!(components.len(), 3);
        assert_eq!(components[0], vec![(2, 3)]);
        assert_eq!(components[1].len(), 3);
        assert_eq!(components[2].len(), 3);
    }

    #[test]
    fn biconnected_graph_is_one_component() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)];
        let components = biconnected_components(4, &edges);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 5);
    }

    #[test]
    fn isolated_vertices_produce_nothing() {
        assert!(biconnected_components(3, &[]).is_empty());
    }
}
