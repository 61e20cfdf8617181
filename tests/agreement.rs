use proptest::prelude::*;

use graph_step_engine::algorithm::Algorithm;
use graph_step_engine::graph::{AdjacencyList, Edge};
use graph_step_engine::shortest_path::{BellmanFord, Dijkstra};
use graph_step_engine::spanning_tree::{Kruskal, Prim};

fn weighted(n: usize, raw: Vec<(usize, usize, i64)>, directed: bool) -> AdjacencyList<(), i64> {
    let edges = raw.into_iter().map(|(u, v, w)| Edge::new(u % n, v % n, w)).collect();
    AdjacencyList::new(vec![(); n], edges, directed).unwrap()
}

proptest! {
    #[test]
    fn prim_and_kruskal_agree_on_the_forest_weight(
        n in 1usize..10,
        raw in prop::collection::vec((0usize..10, 0usize..10, 1i64..50), 0..30),
    ) {
        let prim = Prim::<i64>::default().run(weighted(n, raw.clone(), false), &[]).unwrap().into_result();
        let kruskal = Kruskal::<i64>::default().run(weighted(n, raw, false), &[]).unwrap().into_result();
        prop_assert_eq!(prim.total, kruskal.total);
        prop_assert_eq!(prim.chosen.len(), kruskal.chosen.len());
    }

    #[test]
    fn dijkstra_and_bellman_ford_agree_on_non_negative_weights(
        n in 1usize..10,
        raw in prop::collection::vec((0usize..10, 0usize..10, 0i64..50), 0..30),
        source in 0usize..10,
    ) {
        let source = source % n;
        let dijkstra = Dijkstra::<i64>::default()
            .run(weighted(n, raw.clone(), true), &[&source.to_string()])
            .unwrap()
            .into_result();
        let bellman_ford = BellmanFord::<i64>::default()
            .run(weighted(n, raw, true), &[&source.to_string()])
            .unwrap()
            .into_result();
        prop_assert_eq!(dijkstra.distances, bellman_ford.distances);
        prop_assert!(!bellman_ford.negative_cycle);
    }
}
