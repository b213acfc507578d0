use std::collections::HashMap;

use crate::error::GraphError;
use crate::model::{canonical_pair, Entity, EntityId, WeightedEdge};

// ─────────────────────────────────────────────
// AdjEntry
// ─────────────────────────────────────────────

/// One entry in a node's adjacency list: (edge index, neighbor index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjEntry {
    pub edge_idx: usize,
    pub neighbor: usize,
}

// ─────────────────────────────────────────────
// Graph
// ─────────────────────────────────────────────

/// Weighted, undirected, simple graph over [`Entity`] nodes.
///
/// Nodes and adjacency entries keep insertion order, which is the
/// tie-breaking order used by every ranking and traversal downstream.
/// Mutation is only meant to happen while a builder scans its input rows;
/// analytics take `&Graph`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    edges: Vec<WeightedEdge>,
    /// canonical (a, b) → position in `edges`
    edge_lookup: HashMap<(usize, usize), usize>,
    adjacency: Vec<Vec<AdjEntry>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutations ──────────────────────────────────────

    /// Insert a node, or return the index of the node with the same id.
    pub fn add_node(&mut self, entity: Entity) -> usize {
        if let Some(&idx) = self.index.get(&entity.id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(entity.id.clone(), idx);
        self.nodes.push(entity);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add `delta` to the weight of edge `{x, y}`, creating it if absent.
    ///
    /// Self-loops and non-positive deltas are rejected with `None`.
    /// Returns the edge index otherwise.
    pub fn upsert_edge(&mut self, x: usize, y: usize, delta: f64) -> Option<usize> {
        if x == y || delta.is_nan() || delta <= 0.0 {
            return None;
        }
        let key = canonical_pair(x, y);
        if let Some(&edge_idx) = self.edge_lookup.get(&key) {
            self.edges[edge_idx].weight += delta;
            return Some(edge_idx);
        }

        let edge_idx = self.edges.len();
        self.edges.push(WeightedEdge { a: key.0, b: key.1, weight: delta });
        self.edge_lookup.insert(key, edge_idx);
        self.adjacency[x].push(AdjEntry { edge_idx, neighbor: y });
        self.adjacency[y].push(AdjEntry { edge_idx, neighbor: x });
        Some(edge_idx)
    }

    // ── Queries ────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn entity(&self, idx: usize) -> &Entity {
        &self.nodes[idx]
    }

    pub fn entities(&self) -> &[Entity] {
        &self.nodes
    }

    pub fn index_of(&self, id: &EntityId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Like [`index_of`](Self::index_of), failing with [`GraphError::UnknownEntity`].
    pub fn require(&self, id: &EntityId) -> Result<usize, GraphError> {
        self.index_of(id).ok_or_else(|| GraphError::UnknownEntity(id.to_string()))
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn edge(&self, edge_idx: usize) -> &WeightedEdge {
        &self.edges[edge_idx]
    }

    /// Edge between `x` and `y`, in either orientation.
    pub fn edge_between(&self, x: usize, y: usize) -> Option<&WeightedEdge> {
        self.edge_lookup
            .get(&canonical_pair(x, y))
            .map(|&i| &self.edges[i])
    }

    /// Full adjacency entries of a node, in insertion order.
    pub fn entries(&self, node: usize) -> &[AdjEntry] {
        &self.adjacency[node]
    }

    /// Neighbor indices of a node, in insertion order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[node].iter().map(|e| e.neighbor)
    }

    /// Number of distinct neighbors.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Sum of incident edge weights.
    pub fn strength(&self, node: usize) -> f64 {
        self.adjacency[node]
            .iter()
            .map(|e| self.edges[e.edge_idx].weight)
            .sum()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
