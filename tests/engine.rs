use rstest::rstest;

use graph_step_engine::algorithm::Algorithm;
use graph_step_engine::graph::{EdgeList, Graph};
use graph_step_engine::maximum_flow::{Dinic, EdmondsKarp, FlowSummary, FordFulkerson};
use graph_step_engine::minimum_cost_flow::{CostFlowSummary, SuccessiveShortestPath, Zkw};
use graph_step_engine::residual::{FlowDatum, ResidualNode, ResidualView};

type FlowAlgorithm = dyn Algorithm<
    Graph = EdgeList<FlowDatum<i64>>,
    NodeDatum = ResidualNode,
    EdgeDatum = ResidualView<i64>,
    Output = FlowSummary<i64>,
>;

type CostFlowAlgorithm = dyn Algorithm<
    Graph = EdgeList<FlowDatum<i64>>,
    NodeDatum = ResidualNode,
    EdgeDatum = ResidualView<i64>,
    Output = CostFlowSummary<i64>,
>;

fn unit_network() -> EdgeList<FlowDatum<i64>> {
    let edges = [(0, 1, 1), (0, 3, 1), (1, 4, 1), (2, 5, 1), (3, 2, 1), (3, 4, 1), (4, 5, 1)];
    EdgeList::from_edges(6, edges.iter().map(|&(s, t, c)| (s, t, FlowDatum::capacity(c)))).unwrap()
}

fn cost_network() -> EdgeList<FlowDatum<i64>> {
    let edges = [(0, 1, 1, 2), (0, 2, 4, 6), (1, 2, 1, 2), (1, 3, 4, 6), (2, 3, 1, 2)];
    EdgeList::from_edges(4, edges.iter().map(|&(s, t, c, w)| (s, t, FlowDatum::with_cost(c, w)))).unwrap()
}

#[rstest]
#[case::ford_fulkerson(&FordFulkerson::<i64>::default())]
#[case::edmonds_karp(&EdmondsKarp::<i64>::default())]
#[case::dinic(&Dinic::<i64>::default())]
fn every_flow_algorithm_agrees_on_the_unit_network(#[case] algorithm: &FlowAlgorithm) {
    let run = algorithm.run(unit_network(), &["0", "5"]).unwrap();
    assert_eq!(run.into_result(), FlowSummary { flow: 2 });
}

#[rstest]
#[case::ford_fulkerson(&FordFulkerson::<i64>::default())]
#[case::edmonds_karp(&EdmondsKarp::<i64>::default())]
#[case::dinic(&Dinic::<i64>::default())]
fn final_snapshot_conserves_flow_at_the_source(#[case] algorithm: &FlowAlgorithm) {
    let last = algorithm.run(unit_network(), &["0", "5"]).unwrap().last().unwrap();
    let leaving: i64 = last.graph.edges().iter().filter(|e| e.source == 0).map(|e| e.datum.used).sum();
    assert_eq!(leaving, 2);
}

#[rstest]
#[case::successive_shortest_path(&SuccessiveShortestPath::<i64>::default())]
#[case::zkw(&Zkw::<i64>::default())]
fn cost_flow_respects_the_limit(#[case] algorithm: &CostFlowAlgorithm) {
    let run = algorithm.run(cost_network(), &["0", "3", "1"]).unwrap();
    assert_eq!(run.into_result(), CostFlowSummary { flow: 1, cost: 6 });
}

#[rstest]
#[case::successive_shortest_path(&SuccessiveShortestPath::<i64>::default())]
#[case::zkw(&Zkw::<i64>::default())]
fn unlimited_cost_flow_saturates_the_network(#[case] algorithm: &CostFlowAlgorithm) {
    let run = algorithm.run(cost_network(), &["0", "3", "inf"]).unwrap();
    assert_eq!(run.into_result(), CostFlowSummary { flow: 2, cost: 16 });
}

#[rstest]
#[case::ford_fulkerson(&FordFulkerson::<i64>::default())]
#[case::edmonds_karp(&EdmondsKarp::<i64>::default())]
#[case::dinic(&Dinic::<i64>::default())]
fn replaying_a_run_yields_identical_steps(#[case] algorithm: &FlowAlgorithm) {
    let first: Vec<_> = algorithm.run(unit_network(), &["0", "5"]).unwrap().collect();
    let second: Vec<_> = algorithm.run(unit_network(), &["0", "5"]).unwrap().collect();
    assert_eq!(first, second);
}

#[rstest]
#[case::ford_fulkerson(&FordFulkerson::<i64>::default())]
#[case::dinic(&Dinic::<i64>::default())]
fn abandoned_runs_do_not_leak_workers(#[case] algorithm: &FlowAlgorithm) {
    for pulls in 0..3 {
        let mut run = algorithm.run(unit_network(), &["0", "5"]).unwrap();
        for _ in 0..pulls {
            let _ = run.next();
        }
        // dropping here must join the worker without hanging
    }
}

#[test]
fn steps_are_deep_copies() {
    let mut run = Dinic::<i64>::default().run(unit_network(), &["0", "5"]).unwrap();
    let first = run.next().unwrap();
    let before = first.graph.clone();
    run.by_ref().for_each(drop);
    // exhausting the run must not mutate an already-published snapshot
    assert_eq!(first.graph, before);
    assert_eq!(run.result(), Some(&FlowSummary { flow: 2 }));
}
