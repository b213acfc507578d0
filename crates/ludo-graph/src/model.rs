use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// EntityId
// ─────────────────────────────────────────────

/// Identity of a graph node.
///
/// Designers are identified by their name; games by their BoardGameGeek id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    Designer(String),
    Game(u64),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Designer(name) => f.write_str(name),
            Self::Game(id) => write!(f, "#{id}"),
        }
    }
}

// ─────────────────────────────────────────────
// Entity
// ─────────────────────────────────────────────

/// A node of the co-occurrence graph: identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
}

impl Entity {
    pub fn designer(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { id: EntityId::Designer(name.clone()), name }
    }

    pub fn game(id: u64, name: impl Into<String>) -> Self {
        Self { id: EntityId::Game(id), name: name.into() }
    }
}

// ─────────────────────────────────────────────
// WeightedEdge
// ─────────────────────────────────────────────

/// Undirected edge between two node indices.
///
/// Invariant: `a < b` (canonical ordering, no self-loops) and `weight > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

impl WeightedEdge {
    /// The endpoint opposite to `node`.
    #[inline]
    pub fn other(&self, node: usize) -> usize {
        if node == self.a { self.b } else { self.a }
    }
}

/// Canonical (min, max) ordering of an unordered pair.
#[inline]
pub fn canonical_pair(x: usize, y: usize) -> (usize, usize) {
    if x <= y { (x, y) } else { (y, x) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn designer_entity_uses_name_as_id() {
        let e = Entity::designer("Reiner Knizia");
        assert_eq!(e.id, EntityId::Designer("Reiner Knizia".into()));
        assert_eq!(e.id.to_string(), "Reiner Knizia");
    }

    #[test]
    fn game_id_display() {
        let e = Entity::game(174430, "Gloomhaven");
        assert_eq!(e.id.to_string(), "#174430");
        assert_eq!(e.name, "Gloomhaven");
    }

    #[test]
    fn canonical_pair_orders_endpoints() {
        assert_eq!(canonical_pair(5, 2), (2, 5));
        assert_eq!(canonical_pair(2, 5), (2, 5));
    }

    #[test]
    fn edge_other_endpoint() {
        let e = WeightedEdge { a: 1, b: 4, weight: 2.0 };
        assert_eq!(e.other(1), 4);
        assert_eq!(e.other(4), 1);
    }
}
