//! Pathfinding: BFS shortest paths, eccentricity, and the diameter path of
//! the main connected component.

use std::collections::VecDeque;

use ludo_graph::{EdgeProvenance, EntityId, Graph, GraphError};
use serde::{Deserialize, Serialize};

use crate::components::connected_components;

const UNREACHED: usize = usize::MAX;

// ── BFS ─────────────────────────────────────────────────────────────────────

/// Single-source BFS result over hop distances.
#[derive(Debug, Clone)]
pub struct BfsTree {
    pub source: usize,
    /// Nodes in discovery order (source first).
    pub order: Vec<usize>,
    /// node index → hop distance, `usize::MAX` if unreachable
    pub dist: Vec<usize>,
    /// node index → BFS parent, `usize::MAX` for the source and unreachable nodes
    pub parent: Vec<usize>,
}

impl BfsTree {
    /// Largest distance reached (the source's eccentricity within its component).
    pub fn eccentricity(&self) -> usize {
        self.order.last().map_or(0, |&v| self.dist[v])
    }

    /// Sum of distances to every reached node.
    pub fn total_distance(&self) -> usize {
        self.order.iter().map(|&v| self.dist[v]).sum()
    }

    /// First node in discovery order at maximal distance.
    pub fn farthest(&self) -> usize {
        let ecc = self.eccentricity();
        self.order
            .iter()
            .copied()
            .find(|&v| self.dist[v] == ecc)
            .unwrap_or(self.source)
    }

    /// Path from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if self.dist.get(target).copied().unwrap_or(UNREACHED) == UNREACHED {
            return None;
        }
        let mut path = vec![target];
        let mut c = target;
        while self.parent[c] != UNREACHED {
            c = self.parent[c];
            path.push(c);
        }
        path.reverse();
        Some(path)
    }
}

/// Breadth-first search from `source`. Neighbors are expanded in adjacency
/// insertion order, so the tree is deterministic.
pub fn bfs(graph: &Graph, source: usize) -> BfsTree {
    let n = graph.node_count();
    let mut dist = vec![UNREACHED; n];
    let mut parent = vec![UNREACHED; n];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    dist[source] = 0;
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        order.push(v);
        for w in graph.neighbors(v) {
            if dist[w] == UNREACHED {
                dist[w] = dist[v] + 1;
                parent[w] = v;
                queue.push_back(w);
            }
        }
    }

    BfsTree { source, order, dist, parent }
}

/// Hop-shortest path from `from` to `to`, inclusive of both endpoints.
pub fn shortest_path(graph: &Graph, from: usize, to: usize) -> Option<Vec<usize>> {
    bfs(graph, from).path_to(to)
}

/// Greatest hop distance from `node` to any node in its component.
pub fn eccentricity(graph: &Graph, node: usize) -> usize {
    bfs(graph, node).eccentricity()
}

/// Hop-shortest path between two entities; `Ok(None)` if they are not connected.
pub fn path_between(graph: &Graph, from: &EntityId, to: &EntityId) -> Result<Option<Vec<usize>>, GraphError> {
    let source = graph.require(from)?;
    let target = graph.require(to)?;
    Ok(shortest_path(graph, source, target))
}

// ── Diameter path ───────────────────────────────────────────────────────────

/// One edge of a diameter path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathHop {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    /// Source items behind the edge, when provenance was supplied.
    pub provenance: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterPath {
    pub source: usize,
    pub target: usize,
    /// Edge count of the path; equals `eccentricity(source)`.
    pub diameter: usize,
    pub nodes: Vec<usize>,
    pub hops: Vec<PathHop>,
}

/// Edges along `nodes`, with weights and (if given) provenance.
pub fn annotate_hops(graph: &Graph, nodes: &[usize], provenance: Option<&EdgeProvenance>) -> Vec<PathHop> {
    nodes
        .windows(2)
        .map(|w| PathHop {
            from: w[0],
            to: w[1],
            weight: graph.edge_between(w[0], w[1]).map_or(0.0, |e| e.weight),
            provenance: provenance.map(|p| p.get(w[0], w[1]).to_vec()),
        })
        .collect()
}

/// Size, diameter and average path length of the main component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub size: usize,
    pub diameter: usize,
    pub average_path_length: f64,
    pub path: DiameterPath,
}

/// Diameter path of the largest connected component.
///
/// 1. Eccentricity of every component node (ascending node order).
/// 2. `u` = first node with maximal eccentricity.
/// 3. `v` = first node at maximal distance in BFS discovery order from `u`.
/// 4. Path = BFS shortest path `u → v`, annotated from `provenance` if given.
pub fn diameter_path(
    graph: &Graph,
    provenance: Option<&EdgeProvenance>,
) -> Result<DiameterPath, GraphError> {
    component_summary(graph, provenance).map(|s| s.path)
}

/// Mean hop distance over ordered pairs of the main component.
pub fn average_shortest_path_length(graph: &Graph) -> Result<f64, GraphError> {
    component_summary(graph, None).map(|s| s.average_path_length)
}

/// One BFS per main-component node yields eccentricities and the distance
/// sum together; the diameter path reuses the BFS tree of `u`.
///
/// Fails with [`GraphError::DegenerateGraph`] when the graph has no edges.
pub fn component_summary(
    graph: &Graph,
    provenance: Option<&EdgeProvenance>,
) -> Result<ComponentSummary, GraphError> {
    if graph.edge_count() == 0 {
        return Err(GraphError::DegenerateGraph {
            nodes: graph.node_count(),
            edges: 0,
        });
    }

    let components = connected_components(graph);
    let members = components.main_component().ok_or(GraphError::DegenerateGraph {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    })?;

    let mut best: Option<BfsTree> = None;
    let mut distance_sum = 0usize;
    for &node in members {
        let tree = bfs(graph, node);
        distance_sum += tree.total_distance();
        let better = best
            .as_ref()
            .map_or(true, |b| tree.eccentricity() > b.eccentricity());
        if better {
            best = Some(tree);
        }
    }
    let tree = best.ok_or(GraphError::DegenerateGraph {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    })?;

    let target = tree.farthest();
    let nodes = tree.path_to(target).unwrap_or_else(|| vec![tree.source]);
    let hops = annotate_hops(graph, &nodes, provenance);

    let k = members.len();
    let average_path_length = if k > 1 {
        distance_sum as f64 / (k * (k - 1)) as f64
    } else {
        0.0
    };

    let diameter = tree.eccentricity();
    Ok(ComponentSummary {
        size: k,
        diameter,
        average_path_length,
        path: DiameterPath {
            source: tree.source,
            target,
            diameter,
            nodes,
            hops,
        },
    })
}
