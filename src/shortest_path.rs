//! Single-source and all-pairs shortest paths.
//!
//! Dijkstra assumes non-negative weights; that is a documented caller
//! responsibility, not a runtime check; use Bellman-Ford when weights may
//! be negative.  Unreached vertices keep an infinite distance and a `None`
//! predecessor; they are not errors.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::model::{Graph, VertexId};
use crate::tracing_support::info_span;

/// Distances and predecessors from a single-source run (Dijkstra or
/// Bellman-Ford).  Both maps cover every vertex of the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    pub distances: HashMap<VertexId, f64>,
    pub previous: HashMap<VertexId, Option<VertexId>>,
}

/// Output of [`Graph::floyd_warshall`]: the dense all-pairs distance
/// matrix, the successor matrix for path reconstruction, and the
/// vertex-to-index map both are addressed through.
#[derive(Clone, Debug)]
pub struct FloydWarshall {
    pub dist: Vec<Vec<f64>>,
    pub next: Vec<Vec<Option<usize>>>,
    pub index: HashMap<VertexId, usize>,
}

impl Graph {
    /// Dijkstra's algorithm from `start`, optionally terminating early once
    /// `end` is settled.
    ///
    /// Minimum selection scans the unvisited set in vertex order with a
    /// strict comparison, so ties are broken by first-found order.
    pub fn dijkstra(&self, start: &VertexId, end: Option<&VertexId>) -> Result<ShortestPaths> {
        let _span = info_span!("dijkstra").entered();
        self.check_vertex(start)?;
        if let Some(end) = end {
            self.check_vertex(end)?;
        }

        let mut distances: HashMap<VertexId, f64> = HashMap::new();
        let mut previous: HashMap<VertexId, Option<VertexId>> = HashMap::new();
        let mut unvisited: HashSet<VertexId> = HashSet::new();

        for vertex in self.vertices() {
            let d = if &vertex.id == start { 0.0 } else { f64::INFINITY };
            distances.insert(vertex.id.clone(), d);
            previous.insert(vertex.id.clone(), None);
            unvisited.insert(vertex.id.clone());
        }

        while !unvisited.is_empty() {
            // Scan in vertex order so tie-breaking is deterministic.
            let mut current: Option<VertexId> = None;
            let mut min_distance = f64::INFINITY;
            for vertex in self.vertices() {
                if unvisited.contains(&vertex.id) && distances[&vertex.id] < min_distance {
                    min_distance = distances[&vertex.id];
                    current = Some(vertex.id.clone());
                }
            }

            let Some(current) = current else {
                // Everything left is unreachable.
                break;
            };

            if end == Some(&current) {
                break;
            }

            unvisited.remove(&current);

            for (neighbor, weight) in self.neighbors_with_weights(&current) {
                if unvisited.contains(&neighbor) {
                    let alt = distances[&current] + weight;
                    if alt < distances[&neighbor] {
                        distances.insert(neighbor.clone(), alt);
                        previous.insert(neighbor, Some(current.clone()));
                    }
                }
            }
        }

        Ok(ShortestPaths {
            distances,
            previous,
        })
    }

    /// Reconstructs the shortest path from `start` to `end` by walking the
    /// Dijkstra predecessor map backwards.  Returns `None` when no path
    /// exists: either the walk does not terminate at `start`, or it exceeds
    /// |V| steps (cycle guard).
    pub fn shortest_path_between(
        &self,
        start: &VertexId,
        end: &VertexId,
    ) -> Result<Option<Vec<VertexId>>> {
        let paths = self.dijkstra(start, Some(end))?;

        let mut path = Vec::new();
        let mut current = Some(end.clone());

        while let Some(vertex) = current {
            path.push(vertex.clone());
            if path.len() > self.vertex_count() {
                return Ok(None);
            }
            current = paths.previous.get(&vertex).cloned().flatten();
        }

        if path.last() != Some(start) {
            return Ok(None);
        }

        path.reverse();
        Ok(Some(path))
    }

    /// Unweighted shortest path from `start` to `end` by breadth-first
    /// search over the direction-respecting neighbor view (every edge hop
    /// costs the same, so the first time `end` is reached the path is
    /// minimal).  `start == end` yields the single-vertex path; a missing
    /// endpoint or an unreachable `end` yields `None`.
    pub fn shortest_path_bfs(&self, start: &VertexId, end: &VertexId) -> Option<Vec<VertexId>> {
        if !self.contains_vertex(start) || !self.contains_vertex(end) {
            return None;
        }
        if start == end {
            return Some(vec![start.clone()]);
        }

        let mut previous: HashMap<VertexId, VertexId> = HashMap::new();
        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        visited.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(&current) {
                if visited.insert(neighbor.clone()) {
                    previous.insert(neighbor.clone(), current.clone());
                    if &neighbor == end {
                        let mut path = vec![end.clone()];
                        let mut cursor = end;
                        while let Some(prev) = previous.get(cursor) {
                            path.push(prev.clone());
                            cursor = prev;
                        }
                        path.reverse();
                        return Some(path);
                    }
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Bellman-Ford from `start`.  Handles negative weights; relaxes every
    /// edge |V|-1 times (early-exiting when a full pass changes nothing),
    /// both directions for undirected edges, then runs one verification
    /// pass.  Any edge that still relaxes signals [`Error::NegativeCycle`].
    pub fn bellman_ford(&self, start: &VertexId) -> Result<ShortestPaths> {
        let _span = info_span!("bellman_ford").entered();
        self.check_vertex(start)?;
        for edge in self.edges() {
            self.check_vertex(&edge.source)?;
            self.check_vertex(&edge.target)?;
        }

        let mut distances: HashMap<VertexId, f64> = HashMap::new();
        let mut previous: HashMap<VertexId, Option<VertexId>> = HashMap::new();
        for vertex in self.vertices() {
            let d = if &vertex.id == start { 0.0 } else { f64::INFINITY };
            distances.insert(vertex.id.clone(), d);
            previous.insert(vertex.id.clone(), None);
        }

        for _ in 1..self.vertex_count().max(1) {
            let mut updated = false;

            for edge in self.edges() {
                if distances[&edge.source] + edge.weight < distances[&edge.target] {
                    distances.insert(edge.target.clone(), distances[&edge.source] + edge.weight);
                    previous.insert(edge.target.clone(), Some(edge.source.clone()));
                    updated = true;
                }
                if !edge.directed
                    && distances[&edge.target] + edge.weight < distances[&edge.source]
                {
                    distances.insert(edge.source.clone(), distances[&edge.target] + edge.weight);
                    previous.insert(edge.source.clone(), Some(edge.target.clone()));
                    updated = true;
                }
            }

            if !updated {
                break;
            }
        }

        for edge in self.edges() {
            if distances[&edge.source] + edge.weight < distances[&edge.target] {
                return Err(Error::NegativeCycle);
            }
            if !edge.directed && distances[&edge.target] + edge.weight < distances[&edge.source] {
                return Err(Error::NegativeCycle);
            }
        }

        Ok(ShortestPaths {
            distances,
            previous,
        })
    }

    /// All-pairs shortest paths over the current vertex order.
    ///
    /// The diagonal is 0, direct edges contribute their weight (mirrored
    /// when undirected), and the standard k/i/j triple loop fills in the
    /// rest.  Self-loops do not overwrite the zero diagonal.  Edges whose
    /// endpoints fail to resolve in the index map are skipped defensively.
    pub fn floyd_warshall(&self) -> FloydWarshall {
        let _span = info_span!("floyd_warshall").entered();
        let size = self.vertex_count();
        let index = self.vertex_index_map();

        let mut dist = vec![vec![f64::INFINITY; size]; size];
        let mut next: Vec<Vec<Option<usize>>> = vec![vec![None; size]; size];
        for i in 0..size {
            dist[i][i] = 0.0;
        }

        for edge in self.edges() {
            let (Some(&i), Some(&j)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            if i != j {
                dist[i][j] = edge.weight;
                next[i][j] = Some(j);
                if !edge.directed {
                    dist[j][i] = edge.weight;
                    next[j][i] = Some(i);
                }
            }
        }

        for k in 0..size {
            for i in 0..size {
                for j in 0..size {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        FloydWarshall { dist, next, index }
    }

    /// Walks the Floyd-Warshall successor matrix from `from` to `to`.
    /// Returns the vertex sequence, or an empty sequence when either
    /// endpoint is unknown or no path exists.
    pub fn reconstruct_path(
        &self,
        from: &VertexId,
        to: &VertexId,
        paths: &FloydWarshall,
    ) -> Vec<VertexId> {
        let (Some(&i), Some(&j)) = (paths.index.get(from), paths.index.get(to)) else {
            return Vec::new();
        };
        if paths.next[i][j].is_none() {
            return Vec::new();
        }

        let mut path = vec![self.vertices()[i].id.clone()];
        let mut current = i;
        while current != j {
            let Some(step) = paths.next[current][j] else {
                return Vec::new();
            };
            current = step;
            path.push(self.vertices()[current].id.clone());
        }
        path
    }

    /// The vertex with minimum eccentricity (maximum finite distance to any
    /// other vertex), first-found on ties.  `None` for an empty graph.
    pub fn find_graph_center(&self) -> Option<VertexId> {
        let size = self.vertex_count();
        if size == 0 {
            return None;
        }
        let paths = self.floyd_warshall();

        let mut center = 0;
        let mut min_eccentricity = f64::INFINITY;
        for (i, row) in paths.dist.iter().enumerate() {
            let eccentricity = row
                .iter()
                .copied()
                .filter(|d| d.is_finite())
                .fold(0.0f64, f64::max);
            if eccentricity < min_eccentricity {
                min_eccentricity = eccentricity;
                center = i;
            }
        }

        Some(self.vertices()[center].id.clone())
    }

    fn check_vertex(&self, id: &VertexId) -> Result<()> {
        if self.contains_vertex(id) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted_square() -> (Graph, Vec<VertexId>) {
        // a -1- b
        // |     |
        // 4     1
        // |     |
        // c -1- d
        let mut graph = Graph::with_flags(false, true);
        let a = graph.add_vertex_with_label("a");
        let b = graph.add_vertex_with_label("b");
        let c = graph.add_vertex_with_label("c");
        let d = graph.add_vertex_with_label("d");
        graph.add_edge(&a, &b, 1.0).unwrap();
        graph.add_edge(&a, &c, 4.0).unwrap();
        graph.add_edge(&b, &d, 1.0).unwrap();
        graph.add_edge(&c, &d, 1.0).unwrap();
        (graph, vec![a, b, c, d])
    }

    #[test]
    fn test_dijkstra_source_distance_is_zero() {
        let (graph, ids) = weighted_square();
        let paths = graph.dijkstra(&ids[0], None).unwrap();
        assert_eq!(paths.distances[&ids[0]], 0.0);
        assert_eq!(paths.previous[&ids[0]], None);
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_detour() {
        let (graph, ids) = weighted_square();
        let paths = graph.dijkstra(&ids[0], None).unwrap();
        // a -> b -> d -> c costs 3, cheaper than the direct 4.
        assert_eq!(paths.distances[&ids[2]], 3.0);
        assert_eq!(paths.previous[&ids[2]], Some(ids[3].clone()));
    }

    #[test]
    fn test_dijkstra_missing_start_is_an_error() {
        let (graph, _) = weighted_square();
        let mut other = Graph::new();
        let ghost = other.add_vertex();
        assert_eq!(
            graph.dijkstra(&ghost, None),
            Err(Error::VertexNotFound(ghost))
        );
    }

    #[test]
    fn test_dijkstra_unreachable_vertex_keeps_infinite_distance() {
        let mut graph = Graph::with_flags(false, true);
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let paths = graph.dijkstra(&a, None).unwrap();
        assert_eq!(paths.distances[&b], f64::INFINITY);
        assert_eq!(paths.previous[&b], None);
    }

    #[test]
    fn test_shortest_path_between() {
        let (graph, ids) = weighted_square();
        let path = graph.shortest_path_between(&ids[0], &ids[2]).unwrap();
        assert_eq!(
            path,
            Some(vec![ids[0].clone(), ids[1].clone(), ids[3].clone(), ids[2].clone()])
        );
    }

    #[test]
    fn test_shortest_path_between_returns_none_when_disconnected() {
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        assert_eq!(graph.shortest_path_between(&a, &b).unwrap(), None);
    }

    #[test]
    fn test_bfs_path_takes_fewest_hops() {
        // Direct edge a-c exists, but so does the longer a-b-c; BFS must
        // return the two-vertex path.
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let c = graph.add_vertex();
        graph.add_edge(&a, &b, 1.0).unwrap();
        graph.add_edge(&b, &c, 1.0).unwrap();
        graph.add_edge(&a, &c, 1.0).unwrap();
        assert_eq!(
            graph.shortest_path_bfs(&a, &c),
            Some(vec![a.clone(), c.clone()])
        );
    }

    #[test]
    fn test_bfs_path_respects_edge_direction() {
        let mut graph = Graph::with_flags(true, false);
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        graph.add_edge(&a, &b, 1.0).unwrap();
        assert_eq!(graph.shortest_path_bfs(&a, &b), Some(vec![a.clone(), b.clone()]));
        assert_eq!(graph.shortest_path_bfs(&b, &a), None);
    }

    #[test]
    fn test_bfs_path_trivial_and_missing_endpoints() {
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let mut other = Graph::new();
        let ghost = other.add_vertex();
        assert_eq!(graph.shortest_path_bfs(&a, &a), Some(vec![a.clone()]));
        // Disconnected and missing endpoints are both a soft no-path.
        assert_eq!(graph.shortest_path_bfs(&a, &b), None);
        assert_eq!(graph.shortest_path_bfs(&a, &ghost), None);
        assert_eq!(graph.shortest_path_bfs(&ghost, &a), None);
    }

    #[test]
    fn test_bellman_ford_matches_dijkstra_on_nonnegative_weights() {
        let (graph, ids) = weighted_square();
        let d = graph.dijkstra(&ids[0], None).unwrap();
        let bf = graph.bellman_ford(&ids[0]).unwrap();
        assert_eq!(d.distances, bf.distances);
    }

    #[test]
    fn test_bellman_ford_handles_negative_edge() {
        let mut graph = Graph::with_flags(true, true);
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let c = graph.add_vertex();
        graph.add_edge(&a, &b, 4.0).unwrap();
        graph.add_edge(&b, &c, -2.0).unwrap();
        graph.add_edge(&a, &c, 3.0).unwrap();
        let paths = graph.bellman_ford(&a).unwrap();
        assert_eq!(paths.distances[&c], 2.0);
    }

    #[test]
    fn test_bellman_ford_detects_negative_cycle() {
        let mut graph = Graph::with_flags(true, true);
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        graph.add_edge(&a, &b, 1.0).unwrap();
        graph.add_edge(&b, &a, -3.0).unwrap();
        assert_eq!(graph.bellman_ford(&a), Err(Error::NegativeCycle));
    }

    #[test]
    fn test_floyd_warshall_agrees_with_dijkstra() {
        let (graph, ids) = weighted_square();
        let fw = graph.floyd_warshall();
        for from in &ids {
            let d = graph.dijkstra(from, None).unwrap();
            for to in &ids {
                assert_eq!(fw.dist[fw.index[from]][fw.index[to]], d.distances[to]);
            }
        }
    }

    #[test]
    fn test_reconstruct_path_round_trip() {
        let (graph, ids) = weighted_square();
        let fw = graph.floyd_warshall();
        let path = graph.reconstruct_path(&ids[0], &ids[2], &fw);
        assert_eq!(path.first(), Some(&ids[0]));
        assert_eq!(path.last(), Some(&ids[2]));

        let mut total = 0.0;
        for pair in path.windows(2) {
            let weight = graph
                .edges()
                .iter()
                .find(|e| {
                    (e.source == pair[0] && e.target == pair[1])
                        || (!e.directed && e.source == pair[1] && e.target == pair[0])
                })
                .map(|e| e.weight)
                .unwrap();
            total += weight;
        }
        assert_eq!(total, fw.dist[fw.index[&ids[0]]][fw.index[&ids[2]]]);
    }

    #[test]
    fn test_reconstruct_path_unreachable_is_empty() {
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let fw = graph.floyd_warshall();
        assert!(graph.reconstruct_path(&a, &b, &fw).is_empty());
    }

    #[test]
    fn test_graph_center_of_empty_graph() {
        let graph = Graph::new();
        assert_eq!(graph.find_graph_center(), None);
    }
}
