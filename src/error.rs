use thiserror::Error;

use crate::model::{EdgeId, VertexId};

/// Errors reported by the graph model and the algorithm engines.
///
/// Structural errors (missing vertices, unknown algorithm names, oversized
/// inputs) abort the call with no partial result.  [`Error::NegativeCycle`]
/// is kept as its own variant so a caller can distinguish it from bad input
/// and retry with a different algorithm.  Soft conditions (disconnected
/// graphs, unreachable vertices, empty graphs) are never errors; they are
/// represented as empty results, infinite distances, or partial structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    #[error("an edge between {source_vertex} and {target} already exists")]
    DuplicateEdge {
        // Not named `source` because thiserror would treat that field as the
        // error's source(), which requires `VertexId: std::error::Error`.
        source_vertex: VertexId,
        target: VertexId,
    },

    #[error("an edge in the opposite direction already exists")]
    OppositeEdgeExists,

    #[error("edge weight must be a finite number")]
    InvalidWeight,

    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("graph has {vertices} vertices; spanning tree enumeration is limited to {limit}")]
    TooManyVertices { vertices: usize, limit: usize },

    #[error("the graph contains a negative-weight cycle")]
    NegativeCycle,
}

impl Error {
    /// True for the Bellman-Ford negative-cycle condition, which callers may
    /// want to handle separately from structural input errors.
    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Error::NegativeCycle)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
