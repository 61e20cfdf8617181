use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::algorithm::{Algorithm, ParameterDescriptor};
use crate::disjoint_sets::DisjointSets;
use crate::error::EngineError;
use crate::graph::{AdjacencyList, Edge, Graph, NodeEdgeList};
use crate::planarity::biconnected::biconnected_components;
use crate::planarity::simplify::simplify;
use crate::planarity::{PlanarEdge, PlanarNode, PlanaritySummary};
use crate::step::{Aborted, Emitter, Run};

const ID: &str = "dmp";

const NONE: usize = usize::MAX;

/// Demoucron-Malgrange-Pertuiset planarity test.
///
/// The input is first reduced to a planarity-equivalent core (no self-loops,
/// no parallel edges, no vertices of degree below three) and split into
/// biconnected components, each tested on its own. A component starts from
/// one embedded cycle bounding two faces; the remaining edges fall apart
/// into fragments, and each round draws a path of some fragment across an
/// admissible face, splitting it in two. A fragment with no admissible face
/// proves nonplanarity; embedding every edge proves planarity.
///
/// Snapshots track the working graph of the current stage, so node counts
/// shrink when the reduction removes vertices.
#[derive(Default)]
pub struct Dmp;

impl Algorithm for Dmp {
    type Graph = AdjacencyList<(), ()>;
    type NodeDatum = PlanarNode;
    type EdgeDatum = PlanarEdge;
    type Output = PlanaritySummary;

    fn id(&self) -> &'static str {
        ID
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    fn run(&self, graph: Self::Graph, _args: &[&str]) -> Result<Run<PlanarNode, PlanarEdge, PlanaritySummary>, EngineError> {
        Ok(Run::spawn(move |emitter: &Emitter<PlanarNode, PlanarEdge>| {
            let n = graph.num_nodes();
            let input: Vec<(usize, usize)> = graph.edges().iter().map(|e| (e.source, e.target)).collect();

            emitter.emit_at(stage_snapshot(n, &input, &[], &[]), ID, 1)?;

            let (core_n, core_edges) = simplify(n, &input);
            emitter.emit_at(stage_snapshot(core_n, &core_edges, &[], &[]), ID, 2)?;

            let mut embedded_edge = vec![false; core_edges.len()];
            let mut embedded_vertex = vec![false; core_n];
            let edge_ids: BTreeMap<(usize, usize), usize> =
                core_edges.iter().enumerate().map(|(edge_id, &(u, v))| ((u, v), edge_id)).collect();

            for component in biconnected_components(core_n, &core_edges) {
                if component.len() < 3 {
                    continue; // a bridge
                }
                let ids: Vec<usize> = component.iter().map(|&(u, v)| edge_ids[&(u, v)]).collect();
                let vertices: BTreeSet<usize> = component.iter().flat_map(|&(u, v)| [u, v]).collect();
                let planar = component.len() <= 3 * vertices.len() - 6
                    && embed(core_n, &core_edges, &ids, vertices.len(), &mut embedded_edge, &mut embedded_vertex, emitter)?;
                if !planar {
                    emitter.emit_at(stage_snapshot(core_n, &core_edges, &embedded_edge, &embedded_vertex), ID, 5)?;
                    return Ok(PlanaritySummary { planar: false });
                }
            }

            emitter.emit_at(stage_snapshot(core_n, &core_edges, &embedded_edge, &embedded_vertex), ID, 6)?;
            Ok(PlanaritySummary { planar: true })
        }))
    }
}

/// A maximal part of the not-yet-embedded graph, hanging off the partial
/// embedding at its contact vertices.
#[derive(Default)]
struct Fragment {
    edges: Vec<usize>,
    contacts: BTreeSet<usize>,
}

/// Embed one biconnected component; false when some fragment has no
/// admissible face left.
fn embed(
    num_nodes: usize,
    all_edges: &[(usize, usize)],
    component: &[usize],
    component_vertices: usize,
    embedded_edge: &mut [bool],
    embedded_vertex: &mut [bool],
    emitter: &Emitter<PlanarNode, PlanarEdge>,
) -> Result<bool, Aborted> {
    // a cut vertex embedded by an earlier component is a plain vertex here,
    // so fragment bookkeeping uses its own per-component array
    let mut attached = vec![false; num_nodes];
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); num_nodes];
    for &edge_id in component {
        let (u, v) = all_edges[edge_id];
        adjacency[u].push((edge_id, v));
        adjacency[v].push((edge_id, u));
    }
    let edge_between: BTreeMap<(usize, usize), usize> = component
        .iter()
        .map(|&edge_id| {
            let (u, v) = all_edges[edge_id];
            ((u.min(v), u.max(v)), edge_id)
        })
        .collect();

    let cycle = find_cycle(all_edges[component[0]].0, &adjacency, num_nodes);
    for i in 0..cycle.len() {
        let (u, v) = (cycle[i], cycle[(i + 1) % cycle.len()]);
        embedded_edge[edge_between[&(u.min(v), u.max(v))]] = true;
        embedded_vertex[u] = true;
        attached[u] = true;
    }
    let mut faces: Vec<Vec<usize>> = vec![cycle.clone(), cycle.clone()];
    let mut remaining = component.len() - cycle.len();
    emitter.emit_at(stage_snapshot(num_nodes, all_edges, embedded_edge, embedded_vertex), ID, 3)?;

    while remaining > 0 {
        let mut fragments = collect_fragments(component, all_edges, &adjacency, embedded_edge, &attached);

        // prefer a fragment with a forced face; any fragment without one
        // can wait, any fragment with none kills the embedding
        let mut pick = None;
        for (index, fragment) in fragments.iter().enumerate() {
            let admissible: Vec<usize> = faces
                .iter()
                .enumerate()
                .filter(|(_, face)| fragment.contacts.iter().all(|c| face.contains(c)))
                .map(|(face_id, _)| face_id)
                .collect();
            match admissible.len() {
                0 => return Ok(false),
                1 => {
                    pick = Some((index, admissible[0]));
                    break;
                }
                _ => {
                    if pick.is_none() {
                        pick = Some((index, admissible[0]));
                    }
                }
            }
        }
        let (fragment_index, face_id) = pick.unwrap();
        let fragment = fragments.swap_remove(fragment_index);

        let path = path_across(&fragment, &adjacency, &attached, num_nodes);
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            embedded_edge[edge_between[&(u.min(v), u.max(v))]] = true;
        }
        for &v in &path[1..path.len() - 1] {
            embedded_vertex[v] = true;
            attached[v] = true;
        }
        remaining -= path.len() - 1;

        split_face(&mut faces, face_id, &path);
        emitter.emit_at(stage_snapshot(num_nodes, all_edges, embedded_edge, embedded_vertex), ID, 4)?;
    }

    debug_assert_eq!(faces.len(), component.len() - component_vertices + 2);
    Ok(true)
}

/// Group the not-yet-embedded component edges into fragments: two edges
/// belong together when they share a vertex not yet attached to this
/// component's partial embedding.
fn collect_fragments(
    component: &[usize],
    all_edges: &[(usize, usize)],
    adjacency: &[Vec<(usize, usize)>],
    embedded_edge: &[bool],
    attached: &[bool],
) -> Vec<Fragment> {
    let mut sets = DisjointSets::new(embedded_edge.len());
    for (v, incident) in adjacency.iter().enumerate() {
        if attached[v] {
            continue;
        }
        let mut first = None;
        for &(edge_id, _) in incident {
            if embedded_edge[edge_id] {
                continue;
            }
            match first {
                None => first = Some(edge_id),
                Some(anchor) => {
                    sets.unite(anchor, edge_id);
                }
            }
        }
    }

    let mut grouped: BTreeMap<usize, Fragment> = BTreeMap::new();
    for &edge_id in component {
        if embedded_edge[edge_id] {
            continue;
        }
        let fragment = grouped.entry(sets.find(edge_id)).or_default();
        fragment.edges.push(edge_id);
        let (u, v) = all_edges[edge_id];
        for endpoint in [u, v] {
            if attached[endpoint] {
                fragment.contacts.insert(endpoint);
            }
        }
    }
    grouped.into_values().collect()
}

/// Shortest path through the fragment from one contact vertex to another;
/// every interior vertex is outside the embedding.
fn path_across(fragment: &Fragment, adjacency: &[Vec<(usize, usize)>], attached: &[bool], num_nodes: usize) -> Vec<usize> {
    let member: BTreeSet<usize> = fragment.edges.iter().copied().collect();

    let start = *fragment.contacts.iter().next().unwrap();
    let mut previous = vec![NONE; num_nodes];
    let mut seen = vec![false; num_nodes];
    seen[start] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(x) = queue.pop_front() {
        for &(edge_id, y) in &adjacency[x] {
            if !member.contains(&edge_id) || seen[y] {
                continue;
            }
            seen[y] = true;
            previous[y] = x;
            if attached[y] {
                let mut path = vec![y];
                let mut v = x;
                while v != NONE {
                    path.push(v);
                    v = previous[v];
                }
                path.reverse();
                return path;
            }
            queue.push_back(y);
        }
    }
    unreachable!("a fragment of a biconnected component has two contact vertices");
}

/// Replace the face with the two faces bounded by the drawn path.
fn split_face(faces: &mut Vec<Vec<usize>>, face_id: usize, path: &[usize]) {
    let face = faces[face_id].clone();
    let (a, b) = (path[0], path[path.len() - 1]);
    let i = face.iter().position(|&x| x == a).unwrap();
    let j = face.iter().position(|&x| x == b).unwrap();
    let interior = &path[1..path.len() - 1];

    let mut first = Vec::new();
    let mut k = i;
    loop {
        first.push(face[k]);
        if k == j {
            break;
        }
        k = (k + 1) % face.len();
    }
    first.extend(interior.iter().rev());

    let mut second = Vec::new();
    let mut k = j;
    loop {
        second.push(face[k]);
        if k == i {
            break;
        }
        k = (k + 1) % face.len();
    }
    second.extend(interior.iter());

    faces[face_id] = first;
    faces.push(second);
}

/// Any cycle through `start`, as its vertex sequence.
fn find_cycle(start: usize, adjacency: &[Vec<(usize, usize)>], num_nodes: usize) -> Vec<usize> {
    let mut parent = vec![NONE; num_nodes];
    let mut visited = vec![false; num_nodes];
    let mut cycle = Vec::new();
    close_cycle(start, NONE, adjacency, &mut visited, &mut parent, &mut cycle);
    debug_assert!(cycle.len() >= 3);
    cycle
}

fn close_cycle(
    x: usize,
    parent_edge: usize,
    adjacency: &[Vec<(usize, usize)>],
    visited: &mut [bool],
    parent: &mut [usize],
    out: &mut Vec<usize>,
) -> bool {
    visited[x] = true;
    for &(edge_id, y) in &adjacency[x] {
        if edge_id == parent_edge {
            continue;
        }
        if !visited[y] {
            parent[y] = x;
            if close_cycle(y, edge_id, adjacency, visited, parent, out) {
                return true;
            }
        } else {
            // back edge: y is an ancestor of x
            let mut v = x;
            while v != y {
                out.push(v);
                v = parent[v];
            }
            out.push(y);
            return true;
        }
    }
    false
}

fn stage_snapshot(num_nodes: usize, edges: &[(usize, usize)], embedded_edge: &[bool], embedded_vertex: &[bool]) -> NodeEdgeList<PlanarNode, PlanarEdge> {
    let nodes = (0..num_nodes)
        .map(|v| PlanarNode { embedded: embedded_vertex.get(v).copied().unwrap_or(false) })
        .collect();
    let annotated = edges
        .iter()
        .enumerate()
        .map(|(edge_id, &(u, v))| Edge::new(u, v, PlanarEdge { embedded: embedded_edge.get(edge_id).copied().unwrap_or(false) }))
        .collect();
    NodeEdgeList::new(nodes, annotated).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> AdjacencyList<(), ()> {
        let edges = edges.iter().map(|&(s, t)| Edge::new(s, t, ())).collect();
        AdjacencyList::new(vec![(); n], edges, false).unwrap()
    }

    fn complete(n: usize) -> Vec<(usize, usize)> {
        (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))).collect()
    }

    #[test]
    fn k5_is_not_planar() {
        let run = Dmp.run(adjacency(5, &complete(5)), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: false });
    }

    #[test]
    fn k33_is_not_planar() {
        let edges: Vec<(usize, usize)> = (0..3).flat_map(|u| (3..6).map(move |v| (u, v))).collect();
        let run = Dmp.run(adjacency(6, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: false });
    }

    #[test]
    fn subdivided_k33_is_not_planar() {
        // put one extra vertex on every edge of K3,3
        let branch: Vec<(usize, usize)> = (0..3).flat_map(|u| (3..6).map(move |v| (u, v))).collect();
        let mut edges = Vec::new();
        for (i, &(u, v)) in branch.iter().enumerate() {
            let mid = 6 + i;
            edges.push((u, mid));
            edges.push((mid, v));
        }
        let run = Dmp.run(adjacency(15, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: false });
    }

    #[test]
    fn k4_is_planar() {
        let run = Dmp.run(adjacency(4, &complete(4)), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: true });
    }

    #[test]
    fn octahedron_is_planar() {
        // K2,2,2, a maximal planar graph with 3n - 6 edges
        let edges: Vec<(usize, usize)> = complete(6)
            .into_iter()
            .filter(|&(u, v)| !(u / 2 == v / 2 && u % 2 == 0 && v == u + 1))
            .collect();
        assert_eq!(edges.len(), 12);
        let run = Dmp.run(adjacency(6, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: true });
    }

    #[test]
    fn trees_and_cycles_reduce_to_nothing() {
        let run = Dmp.run(adjacency(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: true });
    }

    #[test]
    fn two_blocks_tested_independently() {
        // two K4 blocks sharing vertex 3
        let mut edges = complete(4);
        edges.extend([(3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6)]);
        let run = Dmp.run(adjacency(7, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: true });
    }

    #[test]
    fn cut_vertex_off_the_seeded_cycle_stays_planar() {
        // two K4 blocks sharing a cut vertex, relabeled so the shared vertex
        // need not sit on the cycle seeding the second block's embedding
        let mut base = complete(4);
        base.extend([(3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6)]);
        let relabel = [0, 2, 3, 1, 4, 5, 6];
        let edges: Vec<(usize, usize)> = base.iter().map(|&(u, v)| (relabel[u], relabel[v])).collect();
        let run = Dmp.run(adjacency(7, &edges), &[]).unwrap();
        assert_eq!(run.into_result(), PlanaritySummary { planar: true });
    }

    #[test]
    fn planarity_does_not_depend_on_vertex_labels() {
        let mut base = complete(4);
        base.extend([(3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6)]);
        for shift in 0..7 {
            let edges: Vec<(usize, usize)> =
                base.iter().map(|&(u, v)| ((u + shift) % 7, (v + shift) % 7)).collect();
            let run = Dmp.run(adjacency(7, &edges), &[]).unwrap();
            assert_eq!(run.into_result(), PlanaritySummary { planar: true });
        }
    }

    #[test]
    fn yields_reduction_and_embedding_stages() {
        let steps: Vec<_> = Dmp.run(adjacency(4, &complete(4)), &[]).unwrap().collect();
        assert!(steps.len() >= 4);
        assert!(steps.last().unwrap().graph.edges().iter().all(|e| e.datum.embedded));
    }
}
