//! Dense matrix views of the graph and the metrics derived from them.
//!
//! Rows and columns follow the current vertex order (see
//! [`Graph::vertex_index_map`]).  Matrix builders skip edges whose endpoints
//! fail to resolve instead of erroring, so a matrix can always be rendered.

use crate::model::{Graph, VertexId};
use crate::tracing_support::info_span;

/// Minimum and maximum eccentricity over the graph, ignoring infinite
/// distances.  Both are 0 for the empty graph.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusDiameter {
    pub radius: f64,
    pub diameter: f64,
}

/// Eigenvalues and row eigenvectors of the adjacency matrix.  Only the 2×2
/// case is solved in closed form; every other non-empty size yields a
/// zero-filled placeholder of the right shape.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenDecomposition {
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Vec<Vec<f64>>,
}

impl Graph {
    /// Weighted adjacency matrix: entry (i, j) is the weight of the edge
    /// from vertex i to vertex j, 0 when absent.  Undirected edges are
    /// mirrored.
    pub fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        let size = self.vertex_count();
        let index = self.vertex_index_map();
        let mut matrix = vec![vec![0.0; size]; size];
        for edge in self.edges() {
            let (Some(&i), Some(&j)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            matrix[i][j] = edge.weight;
            if !edge.directed {
                matrix[j][i] = edge.weight;
            }
        }
        matrix
    }

    /// Incidence matrix with one row per vertex and one column per edge.  A
    /// directed edge's column holds −1 at the source and +1 at the target;
    /// an undirected edge holds +1 at both ends.
    pub fn incidence_matrix(&self) -> Vec<Vec<i32>> {
        let size = self.vertex_count();
        let index = self.vertex_index_map();
        let mut matrix = vec![vec![0; self.edge_count()]; size];
        for (column, edge) in self.edges().iter().enumerate() {
            let (Some(&i), Some(&j)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            if edge.directed {
                matrix[i][column] = -1;
                matrix[j][column] = 1;
            } else {
                matrix[i][column] = 1;
                matrix[j][column] = 1;
            }
        }
        matrix
    }

    /// All-pairs distance matrix (Floyd-Warshall); unreachable pairs are
    /// infinite.
    pub fn distance_matrix(&self) -> Vec<Vec<f64>> {
        self.floyd_warshall().dist
    }

    /// Entry (i, j) is true when j is reachable from i, i.e. the distance
    /// is finite.  Every vertex reaches itself.
    pub fn reachability_matrix(&self) -> Vec<Vec<bool>> {
        self.distance_matrix()
            .into_iter()
            .map(|row| row.into_iter().map(|d| d.is_finite()).collect())
            .collect()
    }

    /// Radius and diameter over finite eccentricities.
    pub fn radius_and_diameter(&self) -> RadiusDiameter {
        let eccentricities = self.eccentricities();
        if eccentricities.is_empty() {
            return RadiusDiameter {
                radius: 0.0,
                diameter: 0.0,
            };
        }
        RadiusDiameter {
            radius: eccentricities.iter().copied().fold(f64::INFINITY, f64::min),
            diameter: eccentricities.iter().copied().fold(0.0, f64::max),
        }
    }

    /// Every vertex of minimum eccentricity, in vertex order.  Unlike
    /// [`Graph::find_graph_center`] this returns all tied vertices.
    pub fn graph_center(&self) -> Vec<VertexId> {
        let eccentricities = self.eccentricities();
        let Some(radius) = eccentricities
            .iter()
            .copied()
            .reduce(f64::min)
        else {
            return Vec::new();
        };
        self.vertices()
            .iter()
            .zip(&eccentricities)
            .filter(|&(_, &e)| e == radius)
            .map(|(v, _)| v.id.clone())
            .collect()
    }

    /// Eigendecomposition of the adjacency matrix.
    ///
    /// The 2×2 case uses the quadratic formula on trace and determinant,
    /// with eigenvectors `[1, (λ − a) / b]` (the divisor falls back to 1
    /// when the off-diagonal entry is 0).  A 2×2 with complex eigenvalues,
    /// and any other non-empty size, returns the zero placeholder; the
    /// empty graph returns empty vectors.
    pub fn eigen(&self) -> EigenDecomposition {
        let _span = info_span!("eigen").entered();
        let size = self.vertex_count();
        if size == 0 {
            return EigenDecomposition {
                eigenvalues: Vec::new(),
                eigenvectors: Vec::new(),
            };
        }

        if size == 2 {
            let m = self.adjacency_matrix();
            let (a, b, c, d) = (m[0][0], m[0][1], m[1][0], m[1][1]);
            let trace = a + d;
            let determinant = a * d - b * c;
            let discriminant = trace * trace - 4.0 * determinant;
            if discriminant >= 0.0 {
                let root = discriminant.sqrt();
                let lambda1 = (trace + root) / 2.0;
                let lambda2 = (trace - root) / 2.0;
                let divisor = if b == 0.0 { 1.0 } else { b };
                return EigenDecomposition {
                    eigenvalues: vec![lambda1, lambda2],
                    eigenvectors: vec![
                        vec![1.0, (lambda1 - a) / divisor],
                        vec![1.0, (lambda2 - a) / divisor],
                    ],
                };
            }
        }

        EigenDecomposition {
            eigenvalues: vec![0.0; size],
            eigenvectors: vec![vec![0.0; size]; size],
        }
    }

    /// Maximum finite distance from each vertex, in vertex order.
    fn eccentricities(&self) -> Vec<f64> {
        self.floyd_warshall()
            .dist
            .iter()
            .map(|row| {
                row.iter()
                    .copied()
                    .filter(|d| d.is_finite())
                    .fold(0.0f64, f64::max)
            })
            .collect()
    }
}
