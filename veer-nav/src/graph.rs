use std::collections::BTreeMap;

use veer_core::{EntityId, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A weighted connection between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub cost: f32,
}

/// Waypoint graph: positioned vertices and weighted edges.
///
/// Vertices are addressed by insertion index. Edges are undirected by default
/// with Euclidean cost; adjacency is kept in ordered maps so traversal order
/// is reproducible.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Graph {
    vertices: Vec<Vec3>,
    edges: BTreeMap<usize, Vec<GraphEdge>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    indexed_ids: Vec<EntityId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index of a vertex equal to `position`, component-exact.
    pub fn find_vertex(&self, position: Vec3) -> Option<usize> {
        self.vertices.iter().position(|v| *v == position)
    }

    /// Connect two vertices both ways with Euclidean cost.
    ///
    /// Returns `false` when either index is out of range.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        let (Some(pa), Some(pb)) = (self.vertex(a), self.vertex(b)) else {
            return false;
        };
        let cost = pa.distance(pb);
        self.connect_one_way_with_cost(a, b, cost);
        self.connect_one_way_with_cost(b, a, cost);
        true
    }

    /// Directed connection with an explicit cost.
    pub fn connect_one_way_with_cost(&mut self, from: usize, to: usize, cost: f32) {
        self.edges
            .entry(from)
            .or_default()
            .push(GraphEdge { from, to, cost });
    }

    pub fn neighbors(&self, vertex: usize) -> &[GraphEdge] {
        self.edges.get(&vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_each_vertex(&self, mut f: impl FnMut(usize, Vec3)) {
        for (i, v) in self.vertices.iter().enumerate() {
            f(i, *v);
        }
    }

    /// Whether this graph's vertices are currently indexed by a world.
    pub fn is_indexed(&self) -> bool {
        !self.indexed_ids.is_empty()
    }

    /// Entity ids generated when the graph was indexed, in vertex order.
    pub fn indexed_ids(&self) -> &[EntityId] {
        &self.indexed_ids
    }

    /// Record the ids a world generated for this graph's vertices.
    pub fn mark_indexed(&mut self, ids: Vec<EntityId>) {
        self.indexed_ids = ids;
    }

    /// Forget the indexed ids, returning them for cleanup.
    pub fn take_indexed_ids(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.indexed_ids)
    }
}
