//! Graph model and algorithm engines for an interactive diagram editor.
//!
//! The [`Graph`] owns vertices and edges in flat, insertion-ordered storage;
//! the algorithm modules extend it with traversal, shortest paths, spanning
//! trees, structural analysis, and dense matrix views.  Everything is
//! single-threaded and synchronous: each call runs to completion on a
//! consistent snapshot, and callers must not mutate the graph while a call
//! is in flight.

pub mod analysis;
pub mod matrix;
pub mod model;
pub mod shortest_path;
pub mod spanning_tree;
pub mod traversal;
pub mod union_find;

mod error;
mod tracing_support;

pub use error::{Error, Result};
pub use matrix::{EigenDecomposition, RadiusDiameter};
pub use model::{Edge, EdgeId, Graph, GraphKind, Metrics, Vertex, VertexId};
pub use shortest_path::{FloydWarshall, ShortestPaths};
pub use spanning_tree::{
    ComponentTree, ENUMERATION_LIMIT, MstAlgorithm, MstResult, SpanningForest,
};
pub use tracing_support::init_tracing;
pub use union_find::UnionFind;
