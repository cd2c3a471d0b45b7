//! Randomized properties over small generated graphs.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use graphein::{Graph, UnionFind, VertexId};

/// Builds an undirected weighted graph from raw byte triples: endpoints are
/// taken modulo a small vertex count and duplicate pairs are skipped, so any
/// input produces a valid graph with non-negative weights.
fn graph_from_triples(edges: &[(u8, u8, u8)]) -> (Graph, Vec<VertexId>) {
    const VERTICES: usize = 8;
    graphein::init_tracing();
    let mut graph = Graph::with_flags(false, true);
    let ids: Vec<VertexId> = (0..VERTICES).map(|_| graph.add_vertex()).collect();
    for &(a, b, w) in edges {
        let source = &ids[a as usize % VERTICES];
        let target = &ids[b as usize % VERTICES];
        // Duplicate pairs are rejected by the model; ignore them here.
        let _ = graph.add_edge(source, target, f64::from(w));
    }
    (graph, ids)
}

#[quickcheck]
fn prop_dijkstra_start_distance_is_zero(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, ids) = graph_from_triples(&edges);
    let paths = graph.dijkstra(&ids[0], None).unwrap();
    paths.distances[&ids[0]] == 0.0 && paths.previous[&ids[0]].is_none()
}

#[quickcheck]
fn prop_dijkstra_distances_are_nonnegative(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, ids) = graph_from_triples(&edges);
    let paths = graph.dijkstra(&ids[0], None).unwrap();
    paths.distances.values().all(|&d| d >= 0.0)
}

#[quickcheck]
fn prop_dijkstra_agrees_with_bellman_ford(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, ids) = graph_from_triples(&edges);
    let dijkstra = graph.dijkstra(&ids[0], None).unwrap();
    let bellman = graph.bellman_ford(&ids[0]).unwrap();
    ids.iter()
        .all(|id| dijkstra.distances[id] == bellman.distances[id])
}

#[quickcheck]
fn prop_reachable_iff_finite_distance(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, ids) = graph_from_triples(&edges);
    let paths = graph.dijkstra(&ids[0], None).unwrap();
    ids.iter().all(|id| {
        let reachable = graph.shortest_path_between(&ids[0], id).unwrap().is_some();
        reachable == paths.distances[id].is_finite()
    })
}

#[quickcheck]
fn prop_bfs_path_exists_iff_dijkstra_reaches(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, ids) = graph_from_triples(&edges);
    let paths = graph.dijkstra(&ids[0], None).unwrap();
    ids.iter().all(|id| {
        graph.shortest_path_bfs(&ids[0], id).is_some() == paths.distances[id].is_finite()
    })
}

#[quickcheck]
fn prop_mst_algorithms_agree_on_total_weight(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, _) = graph_from_triples(&edges);
    let prim = graph.prim().total_weight;
    let kruskal = graph.kruskal().total_weight;
    let boruvka = graph.boruvka().total_weight;
    prim == kruskal && kruskal == boruvka
}

#[quickcheck]
fn prop_spanning_forest_edge_counts(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, _) = graph_from_triples(&edges);
    // Each component tree has exactly |component| - 1 edges.
    graph
        .minimum_spanning_forest()
        .trees
        .iter()
        .all(|tree| tree.edges.len() == tree.vertices.len() - 1)
}

#[quickcheck]
fn prop_components_partition_the_vertices(edges: Vec<(u8, u8, u8)>) -> bool {
    let (graph, _) = graph_from_triples(&edges);
    let components = graph.connected_components();
    let total: usize = components.iter().map(Vec::len).sum();
    total == graph.vertex_count() && (components.len() == 1) == graph.is_connected()
}

#[quickcheck]
fn prop_union_find_connected_after_union(pairs: Vec<(u8, u8)>) -> TestResult {
    if pairs.is_empty() {
        return TestResult::discard();
    }
    let mut uf = UnionFind::new(256);
    for &(a, b) in &pairs {
        uf.union(a as usize, b as usize);
    }
    for &(a, b) in &pairs {
        if !uf.connected(a as usize, b as usize) {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn prop_union_find_find_is_idempotent(pairs: Vec<(u8, u8)>, probe: u8) -> bool {
    let mut uf = UnionFind::new(256);
    for &(a, b) in &pairs {
        uf.union(a as usize, b as usize);
    }
    let root = uf.find(probe as usize);
    uf.find(probe as usize) == root && uf.find(root) == root
}
