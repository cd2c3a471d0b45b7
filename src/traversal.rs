//! Breadth-first and depth-first traversal.
//!
//! Both traversals enumerate neighbors through the directed view: an edge is
//! traversable source-to-target always, and target-to-source additionally
//! when it is undirected.  An absent start vertex or an empty graph yields
//! an empty sequence; unreachable regions are not an error, and the
//! traversal simply stops when the frontier is exhausted.

use std::collections::{HashSet, VecDeque};

use crate::model::{Graph, VertexId};

impl Graph {
    /// Visits vertices in breadth-first order from `start`, returning their
    /// labels in visitation order.
    pub fn breadth_first_search(&self, start: &VertexId) -> Vec<String> {
        if !self.contains_vertex(start) {
            return Vec::new();
        }

        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            if let Some(vertex) = self.vertex(&current) {
                order.push(vertex.label.clone());
            }
            for neighbor in self.neighbors(&current) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        order
    }

    /// Visits vertices in depth-first order from `start`, returning their
    /// labels in visitation order.
    ///
    /// Implemented with an explicit stack to avoid recursion-depth limits;
    /// neighbors are pushed in reverse so the visitation order matches the
    /// recursive formulation.
    pub fn depth_first_search(&self, start: &VertexId) -> Vec<String> {
        if !self.contains_vertex(start) {
            return Vec::new();
        }

        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut stack = vec![start.clone()];
        let mut order = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(vertex) = self.vertex(&current) {
                order.push(vertex.label.clone());
            }
            let neighbors = self.neighbors(&current);
            for neighbor in neighbors.into_iter().rev() {
                if !visited.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        order
    }
}
