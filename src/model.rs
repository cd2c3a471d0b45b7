use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::error::{Error, Result};

/// Identifier of a vertex within a [`Graph`].  Assigned monotonically by the
/// graph (`v1`, `v2`, ...) and never reused until [`Graph::clear`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(String);

impl VertexId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an edge within a [`Graph`] (`e1`, `e2`, ...).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vertex.  The label is display metadata and is ignored by every
/// algorithm; it defaults to the id text.  Position, color, and other
/// rendering state are owned by the rendering collaborator, not the model.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
}

/// An edge between two vertices.
///
/// `directed` is the edge's own flag: edges created before a call to
/// [`Graph::set_directed`] keep whatever directedness they were created
/// with, so a graph may hold edges of mixed directionality.  The weight is
/// any finite `f64`; its sign only matters to Bellman-Ford.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    pub directed: bool,
    pub weight: f64,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// The four directed/weighted combinations a graph can be configured as.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphKind {
    Undirected,
    UndirectedWeighted,
    Directed,
    DirectedWeighted,
}

impl Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphKind::Undirected => "undirected",
            GraphKind::UndirectedWeighted => "undirected weighted",
            GraphKind::Directed => "directed",
            GraphKind::DirectedWeighted => "directed weighted",
        };
        f.write_str(name)
    }
}

/// Summary counts displayed by the editor's metrics panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub kind: GraphKind,
}

/// The mutable graph model.
///
/// Vertices and edges live in flat, insertion-ordered vectors keyed by id,
/// with no references between them; algorithms that need index-based access
/// build an id-to-index map per call via [`Graph::vertex_index_map`].  The
/// graph-level `directed` and `weighted` flags set defaults for new edges
/// but do not retroactively change existing edges (except through
/// [`Graph::set_directed`], which explicitly retargets every edge).
///
/// All computation in this crate is single-threaded and synchronous.  The
/// model provides no locking; callers must not mutate the graph while an
/// algorithm call is in flight.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
    next_vertex_id: u64,
    next_edge_id: u64,
}

impl Graph {
    /// Creates an empty undirected, unweighted graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            directed: false,
            weighted: false,
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }

    /// Creates an empty graph with the given edge defaults.
    pub fn with_flags(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            ..Self::new()
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Sets whether new edges are weighted.  Existing edge weights are left
    /// untouched.
    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    /// Changes the graph-level direction default and retargets the
    /// `directed` flag of every existing edge to match.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
        for edge in &mut self.edges {
            edge.directed = directed;
        }
    }

    // Vertices

    /// Adds a vertex whose label is its id text, returning the new id.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(format!("v{}", self.next_vertex_id));
        self.next_vertex_id += 1;
        self.vertices.push(Vertex {
            id: id.clone(),
            label: id.0.clone(),
        });
        id
    }

    /// Adds a vertex with an explicit display label.
    pub fn add_vertex_with_label(&mut self, label: impl Into<String>) -> VertexId {
        let id = self.add_vertex();
        // The vertex was just pushed, so the unwrap cannot fail.
        self.vertices.last_mut().unwrap().label = label.into();
        id
    }

    /// Removes a vertex and every edge incident to it, returning the vertex.
    pub fn remove_vertex(&mut self, id: &VertexId) -> Result<Vertex> {
        let index = self
            .vertex_position(id)
            .ok_or_else(|| Error::VertexNotFound(id.clone()))?;
        self.edges.retain(|e| &e.source != id && &e.target != id);
        Ok(self.vertices.remove(index))
    }

    pub fn vertex(&self, id: &VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| &v.id == id)
    }

    pub fn contains_vertex(&self, id: &VertexId) -> bool {
        self.vertex(id).is_some()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Maps each vertex id to its position in the current vertex order.
    /// The map is rebuilt per call; it is stable only until the next
    /// mutation.
    pub fn vertex_index_map(&self) -> HashMap<VertexId, usize> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (vertex.id.clone(), index))
            .collect()
    }

    // Edges

    /// Adds an edge from `source` to `target`, using the graph-level
    /// defaults for directedness and weighting.  In unweighted graphs the
    /// weight is pinned to 1.0 regardless of the argument.
    ///
    /// A second edge between the same pair (in the same direction for
    /// directed graphs, either direction for undirected ones) is rejected;
    /// self-loops are exempt from the duplicate check and always permitted.
    pub fn add_edge(&mut self, source: &VertexId, target: &VertexId, weight: f64) -> Result<EdgeId> {
        if !self.contains_vertex(source) {
            return Err(Error::VertexNotFound(source.clone()));
        }
        if !self.contains_vertex(target) {
            return Err(Error::VertexNotFound(target.clone()));
        }
        if self.weighted && !weight.is_finite() {
            return Err(Error::InvalidWeight);
        }

        let duplicate = self.edges.iter().any(|e| {
            if self.directed {
                e.source == *source && e.target == *target
            } else {
                (e.source == *source && e.target == *target)
                    || (e.source == *target && e.target == *source)
            }
        });
        if duplicate && source != target {
            return Err(Error::DuplicateEdge {
                source_vertex: source.clone(),
                target: target.clone(),
            });
        }

        let id = EdgeId(format!("e{}", self.next_edge_id));
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            directed: self.directed,
            weight: if self.weighted { weight } else { 1.0 },
        });
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge> {
        let index = self
            .edge_position(id)
            .ok_or_else(|| Error::EdgeNotFound(id.clone()))?;
        Ok(self.edges.remove(index))
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Replaces the weight of an existing edge.
    pub fn update_edge_weight(&mut self, id: &EdgeId, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(Error::InvalidWeight);
        }
        let edge = self
            .edges
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| Error::EdgeNotFound(id.clone()))?;
        edge.weight = weight;
        Ok(())
    }

    /// Flips the `directed` flag of a single edge.  In an undirected graph
    /// the flip is rejected when an edge already exists in the opposite
    /// direction, since the two would collapse into the same connection.
    pub fn update_edge_direction(&mut self, id: &EdgeId, directed: bool) -> Result<()> {
        let index = self
            .edge_position(id)
            .ok_or_else(|| Error::EdgeNotFound(id.clone()))?;
        if self.edges[index].directed == directed {
            return Ok(());
        }
        let (source, target) = (
            self.edges[index].source.clone(),
            self.edges[index].target.clone(),
        );
        let opposite_exists = self
            .edges
            .iter()
            .any(|e| e.source == target && e.target == source && &e.id != id);
        if opposite_exists && !self.directed {
            return Err(Error::OppositeEdgeExists);
        }
        self.edges[index].directed = directed;
        Ok(())
    }

    /// Removes all vertices and edges and resets the id counters.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.next_vertex_id = 1;
        self.next_edge_id = 1;
    }

    pub fn kind(&self) -> GraphKind {
        match (self.directed, self.weighted) {
            (false, false) => GraphKind::Undirected,
            (false, true) => GraphKind::UndirectedWeighted,
            (true, false) => GraphKind::Directed,
            (true, true) => GraphKind::DirectedWeighted,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            vertex_count: self.vertices.len(),
            edge_count: self.edges.len(),
            kind: self.kind(),
        }
    }

    // Adjacency

    /// Vertices reachable from `id` along one edge: always source-to-target,
    /// plus target-to-source for undirected edges.  Deduplicated, in edge
    /// order.
    pub fn neighbors(&self, id: &VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for edge in &self.edges {
            let neighbor = if edge.source == *id {
                Some(edge.target.clone())
            } else if !edge.directed && edge.target == *id {
                Some(edge.source.clone())
            } else {
                None
            };
            if let Some(n) = neighbor
                && !out.contains(&n)
            {
                out.push(n);
            }
        }
        out
    }

    /// Vertices adjacent to `id` ignoring edge direction entirely.  This is
    /// the view connectivity queries operate on.
    pub fn undirected_neighbors(&self, id: &VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for edge in &self.edges {
            let neighbor = if edge.source == *id {
                Some(edge.target.clone())
            } else if edge.target == *id {
                Some(edge.source.clone())
            } else {
                None
            };
            if let Some(n) = neighbor
                && !out.contains(&n)
            {
                out.push(n);
            }
        }
        out
    }

    /// Neighbors of `id` with the connecting edge's weight, one entry per
    /// traversable edge (not deduplicated, so parallel self-loops each
    /// appear).
    pub fn neighbors_with_weights(&self, id: &VertexId) -> Vec<(VertexId, f64)> {
        let mut out = Vec::new();
        for edge in &self.edges {
            if edge.source == *id {
                out.push((edge.target.clone(), edge.weight));
            }
            if !edge.directed && edge.target == *id {
                out.push((edge.source.clone(), edge.weight));
            }
        }
        out
    }

    /// Builds the subgraph induced by the given vertex set: those vertices
    /// plus every edge with both endpoints inside the set.  Ids are carried
    /// over unchanged.
    pub fn induced_subgraph(&self, ids: &[VertexId]) -> Graph {
        Graph {
            vertices: self
                .vertices
                .iter()
                .filter(|v| ids.contains(&v.id))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| ids.contains(&e.source) && ids.contains(&e.target))
                .cloned()
                .collect(),
            directed: self.directed,
            weighted: self.weighted,
            next_vertex_id: self.next_vertex_id,
            next_edge_id: self.next_edge_id,
        }
    }

    pub(crate) fn vertex_position(&self, id: &VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| &v.id == id)
    }

    pub(crate) fn edge_position(&self, id: &EdgeId) -> Option<usize> {
        self.edges.iter().position(|e| &e.id == id)
    }

    // Scoped detachment used by the bridge/articulation-point checks in the
    // analysis module.  Restoration must reinsert at the original indices so
    // iteration order is preserved across a detach/attach round trip.

    pub(crate) fn detach_edge(&mut self, index: usize) -> Edge {
        self.edges.remove(index)
    }

    pub(crate) fn attach_edge(&mut self, index: usize, edge: Edge) {
        self.edges.insert(index, edge);
    }

    /// Removes the vertex at `index` together with its incident edges,
    /// returning the edges paired with their original indices in ascending
    /// order.
    pub(crate) fn detach_vertex(&mut self, index: usize) -> (Vertex, Vec<(usize, Edge)>) {
        let vertex = self.vertices.remove(index);
        let mut removed = Vec::new();
        let mut i = 0;
        let mut original = 0;
        while i < self.edges.len() {
            if self.edges[i].source == vertex.id || self.edges[i].target == vertex.id {
                removed.push((original, self.edges.remove(i)));
            } else {
                i += 1;
            }
            original += 1;
        }
        (vertex, removed)
    }

    pub(crate) fn attach_vertex(&mut self, index: usize, vertex: Vertex, edges: Vec<(usize, Edge)>) {
        self.vertices.insert(index, vertex);
        for (edge_index, edge) in edges {
            self.edges.insert(edge_index, edge);
        }
    }
}
