//! Degree, connectivity, and structural analysis.
//!
//! Connectivity queries run over the undirected adjacency view: a directed
//! edge still joins its endpoints into one component.  Bridge and
//! articulation-point detection take `&mut Graph` because they probe by
//! temporarily detaching an element; the detachment is guard-scoped and the
//! graph is restored byte-for-byte on every exit path.

use std::collections::{HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::model::{Edge, EdgeId, Graph, Vertex, VertexId};
use crate::tracing_support::info_span;

/// Restores a detached edge at its original index on drop.
struct DetachedEdge<'a> {
    graph: &'a mut Graph,
    index: usize,
    edge: Option<Edge>,
}

impl<'a> DetachedEdge<'a> {
    fn new(graph: &'a mut Graph, index: usize) -> Self {
        let edge = graph.detach_edge(index);
        Self {
            graph,
            index,
            edge: Some(edge),
        }
    }
}

impl Drop for DetachedEdge<'_> {
    fn drop(&mut self) {
        if let Some(edge) = self.edge.take() {
            self.graph.attach_edge(self.index, edge);
        }
    }
}

/// Restores a detached vertex and its incident edges, at their original
/// indices, on drop.
struct DetachedVertex<'a> {
    graph: &'a mut Graph,
    index: usize,
    detached: Option<(Vertex, Vec<(usize, Edge)>)>,
}

impl<'a> DetachedVertex<'a> {
    fn new(graph: &'a mut Graph, index: usize) -> Self {
        let detached = graph.detach_vertex(index);
        Self {
            graph,
            index,
            detached: Some(detached),
        }
    }
}

impl Drop for DetachedVertex<'_> {
    fn drop(&mut self) {
        if let Some((vertex, edges)) = self.detached.take() {
            self.graph.attach_vertex(self.index, vertex, edges);
        }
    }
}

impl Graph {
    /// Neighbors reachable from `id` along one traversable edge, erroring
    /// when the vertex does not exist (unlike the traversals, which treat a
    /// missing start as an empty walk).
    pub fn adjacent_vertices(&self, id: &VertexId) -> Result<Vec<VertexId>> {
        self.require_vertex(id)?;
        Ok(self.neighbors(id))
    }

    /// Number of edge endpoints at `id`.  A self-loop has both endpoints
    /// here and therefore contributes 2.
    pub fn degree(&self, id: &VertexId) -> Result<usize> {
        self.require_vertex(id)?;
        Ok(self
            .edges()
            .iter()
            .map(|e| usize::from(e.source == *id) + usize::from(e.target == *id))
            .sum())
    }

    /// Number of edges arriving at `id`.  Undirected edges count both ways.
    pub fn in_degree(&self, id: &VertexId) -> Result<usize> {
        self.require_vertex(id)?;
        Ok(self
            .edges()
            .iter()
            .filter(|e| e.target == *id || (!e.directed && e.source == *id))
            .count())
    }

    /// Number of edges leaving `id`.  Undirected edges count both ways.
    pub fn out_degree(&self, id: &VertexId) -> Result<usize> {
        self.require_vertex(id)?;
        Ok(self
            .edges()
            .iter()
            .filter(|e| e.source == *id || (!e.directed && e.target == *id))
            .count())
    }

    /// True when every vertex is reachable from every other over the
    /// undirected view.  The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        let Some(seed) = self.vertices().first() else {
            return true;
        };
        self.undirected_reach(&seed.id).len() == self.vertex_count()
    }

    /// Partitions the vertices into connected components of the undirected
    /// view.  Components are ordered by their first vertex; vertices within
    /// a component appear in breadth-first order.
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut seen: HashSet<VertexId> = HashSet::new();
        let mut components = Vec::new();
        for vertex in self.vertices() {
            if seen.contains(&vertex.id) {
                continue;
            }
            let component = self.undirected_reach(&vertex.id);
            seen.extend(component.iter().cloned());
            components.push(component);
        }
        components
    }

    /// Edges whose removal increases the number of connected components,
    /// found by detaching each edge in turn and recounting.  O(E·(V+E)).
    pub fn find_bridges(&mut self) -> Vec<EdgeId> {
        let _span = info_span!("find_bridges").entered();
        let baseline = self.connected_components().len();
        let mut bridges = Vec::new();

        for index in 0..self.edge_count() {
            let id = self.edges()[index].id.clone();
            let detached = DetachedEdge::new(self, index);
            if detached.graph.connected_components().len() > baseline {
                bridges.push(id);
            }
        }

        bridges
    }

    /// Vertices whose removal (with their incident edges) increases the
    /// number of connected components among the remaining vertices.
    pub fn find_articulation_points(&mut self) -> Vec<VertexId> {
        let _span = info_span!("find_articulation_points").entered();
        let baseline = self.connected_components().len();
        let mut points = Vec::new();

        for index in 0..self.vertex_count() {
            let id = self.vertices()[index].id.clone();
            let detached = DetachedVertex::new(self, index);
            if detached.graph.connected_components().len() > baseline {
                points.push(id);
            }
        }

        points
    }

    /// Fraction of possible edges that exist among the neighbors of `id`:
    /// links / (k·(k−1)/2) over the k direction-respecting neighbors,
    /// excluding `id` itself.  0 when k < 2.
    pub fn clustering_coefficient(&self, id: &VertexId) -> Result<f64> {
        self.require_vertex(id)?;
        let neighbors: Vec<VertexId> = self
            .neighbors(id)
            .into_iter()
            .filter(|n| n != id)
            .collect();
        let k = neighbors.len();
        if k < 2 {
            return Ok(0.0);
        }

        let mut links = 0;
        for i in 0..k {
            for j in (i + 1)..k {
                let linked = self.edges().iter().any(|e| {
                    (e.source == neighbors[i] && e.target == neighbors[j])
                        || (e.source == neighbors[j] && e.target == neighbors[i])
                });
                if linked {
                    links += 1;
                }
            }
        }

        Ok(links as f64 / (k * (k - 1) / 2) as f64)
    }

    /// Mean clustering coefficient over all vertices; 0 for an empty graph.
    pub fn average_clustering_coefficient(&self) -> f64 {
        if self.vertex_count() == 0 {
            return 0.0;
        }
        let total: f64 = self
            .vertices()
            .iter()
            .map(|v| self.clustering_coefficient(&v.id).unwrap_or(0.0))
            .sum();
        total / self.vertex_count() as f64
    }

    /// Breadth-first reach of `start` over the undirected view.
    fn undirected_reach(&self, start: &VertexId) -> Vec<VertexId> {
        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start.clone());
        queue.push_back(start.clone());
        while let Some(current) = queue.pop_front() {
            order.push(current.clone());
            for neighbor in self.undirected_neighbors(&current) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        order
    }

    fn require_vertex(&self, id: &VertexId) -> Result<()> {
        if self.contains_vertex(id) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(id.clone()))
        }
    }
}
