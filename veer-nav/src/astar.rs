use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Graph, Path, PathConfig};

#[derive(Debug)]
struct OpenNode {
    f: f32,
    g: f32,
    vertex: usize,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (f32, f32, usize, u64) {
        (self.f, self.g, self.vertex, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        let (af, ag, av, at) = self.key();
        let (bf, bg, bv, bt) = other.key();
        bf.total_cmp(&af)
            .then(bg.total_cmp(&ag))
            .then(bv.cmp(&av))
            .then(bt.cmp(&at))
    }
}

/// A* over a waypoint graph.
///
/// Returns a plain (non-looping) path visiting the vertex positions from
/// `start` to `goal`, or `None` when the vertices are unknown or disconnected.
/// Ties break deterministically on (g, vertex, insertion order).
pub fn find_path(graph: &Graph, start: usize, goal: usize) -> Option<Path> {
    let start_pos = graph.vertex(start)?;
    let goal_pos = graph.vertex(goal)?;

    let count = graph.vertex_count();
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut tie: u64 = 0;

    let mut g_score = vec![f32::INFINITY; count];
    let mut came_from: Vec<Option<usize>> = vec![None; count];

    g_score[start] = 0.0;
    open.push(OpenNode {
        f: start_pos.distance(goal_pos),
        g: 0.0,
        vertex: start,
        tie,
    });
    tie += 1;

    while let Some(node) = open.pop() {
        if node.vertex == goal {
            return Some(reconstruct(graph, &came_from, goal));
        }

        if node.g != g_score[node.vertex] {
            // Stale heap entry.
            continue;
        }

        for edge in graph.neighbors(node.vertex) {
            let Some(neighbor_pos) = graph.vertex(edge.to) else {
                continue;
            };

            let tentative_g = node.g + edge.cost.max(0.0);
            if tentative_g >= g_score[edge.to] {
                continue;
            }

            came_from[edge.to] = Some(node.vertex);
            g_score[edge.to] = tentative_g;
            open.push(OpenNode {
                f: tentative_g + neighbor_pos.distance(goal_pos),
                g: tentative_g,
                vertex: edge.to,
                tie,
            });
            tie += 1;
        }
    }

    None
}

fn reconstruct(graph: &Graph, came_from: &[Option<usize>], goal: usize) -> Path {
    let mut indices = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        current = prev;
        indices.push(current);
    }
    indices.reverse();

    let mut path = Path::new(PathConfig::default());
    for index in indices {
        if let Some(position) = graph.vertex(index) {
            path.add_waypoint(position);
        }
    }
    path
}
