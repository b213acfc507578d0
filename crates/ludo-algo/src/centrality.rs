//! Centrality algorithms: Betweenness (Brandes), Closeness, Degree.
//!
//! All distances are hop counts; edge weights do not affect path lengths.

use std::collections::VecDeque;
use std::time::Instant;

use ludo_graph::Graph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Rescale to `[0, 1]` by the number of pairs not involving the node.
    pub normalized: bool,
    /// Approximate from `k` sampled sources instead of all `n`.
    pub sample_size: Option<usize>,
    /// Seed for source sampling.
    pub seed: u64,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self { normalized: true, sample_size: None, seed: 42 }
    }
}

#[derive(Debug, Clone)]
pub struct BetweennessResult {
    /// node index → betweenness
    pub scores: Vec<f64>,
    pub sources_used: usize,
    pub duration_ms: u64,
}

/// Betweenness centrality via Brandes' algorithm.
///
/// If `sample_size` is `Some(k)`, only samples `k` source nodes for an
/// approximation (O(k*E) instead of O(V*E)), scaled by `n / k`.
pub fn betweenness_centrality(graph: &Graph, config: &BetweennessConfig) -> BetweennessResult {
    let start = Instant::now();
    let n = graph.node_count();
    if n == 0 {
        return BetweennessResult { scores: vec![], sources_used: 0, duration_ms: 0 };
    }

    let mut bc = vec![0.0_f64; n];

    // Select sources
    let sources: Vec<usize> = match config.sample_size {
        Some(k) if k < n => {
            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut StdRng::seed_from_u64(config.seed));
            indices.truncate(k);
            indices
        }
        _ => (0..n).collect(),
    };

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![vec![]; n];
    let mut sigma = vec![0.0_f64; n]; // number of shortest paths
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut queue = VecDeque::new();

    for &s in &sources {
        for v in 0..n {
            predecessors[v].clear();
            sigma[v] = 0.0;
            dist[v] = -1;
            delta[v] = 0.0;
        }
        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        // BFS from source
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for w in graph.neighbors(v) {
                if dist[w] < 0 {
                    queue.push_back(w);
                    dist[w] = dist[v] + 1;
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Back-propagation
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    // Every undirected pair was accumulated from both endpoints.
    let mut scale = if config.normalized {
        if n > 2 { 1.0 / ((n - 1) as f64 * (n - 2) as f64) } else { 1.0 }
    } else {
        0.5
    };
    if sources.len() < n {
        scale *= n as f64 / sources.len().max(1) as f64;
    }
    for b in bc.iter_mut() { *b *= scale; }

    BetweennessResult {
        scores: bc,
        sources_used: sources.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Closeness centrality, computed within each node's own component.
///
/// `(r / Σd) · (r / (n-1))` where `r` is the number of nodes reachable from
/// the node and `n` the graph size (Wasserman–Faust scaling). Isolated
/// nodes score 0.
pub fn closeness_centrality(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 { return vec![0.0; n]; }

    let mut result = Vec::with_capacity(n);
    let mut dist = vec![-1i64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        // BFS to compute shortest distances
        dist.iter_mut().for_each(|d| *d = -1);
        dist[s] = 0;
        queue.push_back(s);
        let mut total_dist = 0i64;
        let mut reachable = 0usize;

        while let Some(v) = queue.pop_front() {
            for w in graph.neighbors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    total_dist += dist[w];
                    reachable += 1;
                    queue.push_back(w);
                }
            }
        }

        let closeness = if reachable > 0 && total_dist > 0 {
            let r = reachable as f64;
            (r / total_dist as f64) * (r / (n - 1) as f64)
        } else {
            0.0
        };
        result.push(closeness);
    }

    result
}

/// Degree centrality: `degree / (n-1)`.
pub fn degree_centrality(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 { return vec![0.0; n]; }

    let denom = (n - 1) as f64;
    (0..n).map(|v| graph.degree(v) as f64 / denom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_graph::Entity;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(Entity::designer(format!("d{i}")));
        }
        for &(a, b) in edges {
            g.upsert_edge(a, b, 1.0);
        }
        g
    }

    fn star(leaves: usize) -> Graph {
        let edges: Vec<(usize, usize)> = (1..=leaves).map(|l| (0, l)).collect();
        graph(leaves + 1, &edges)
    }

    // ── Betweenness ──────────────────────────────────────────────────────

    #[test]
    fn betweenness_empty_graph() {
        let result = betweenness_centrality(&Graph::new(), &BetweennessConfig::default());
        assert!(result.scores.is_empty());
    }

    #[test]
    fn star_hub_dominates_leaves() {
        let result = betweenness_centrality(&star(5), &BetweennessConfig::default());
        let hub = result.scores[0];
        // Hub lies on every leaf-to-leaf path: normalized value is exactly 1.
        assert!((hub - 1.0).abs() < 1e-12);
        for leaf in 1..=5 {
            assert!(hub > result.scores[leaf]);
            assert_eq!(result.scores[leaf], 0.0);
        }
    }

    #[test]
    fn path_graph_raw_counts() {
        // 0 - 1 - 2 - 3: node 1 lies on (0,2), (0,3); node 2 on (0,3), (1,3)
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let config = BetweennessConfig { normalized: false, ..Default::default() };
        let result = betweenness_centrality(&g, &config);
        assert_eq!(result.scores, vec![0.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn split_shortest_paths_share_credit() {
        // Square 0-1-3, 0-2-3: pair (0,3) has two shortest paths.
        let g = graph(4, &[(0, 1), (1, 3), (0, 2), (2, 3)]);
        let config = BetweennessConfig { normalized: false, ..Default::default() };
        let result = betweenness_centrality(&g, &config);
        assert!((result.scores[1] - 0.5).abs() < 1e-12);
        assert!((result.scores[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sampling_is_reproducible_for_a_seed() {
        let g = graph(8, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7)]);
        let config = BetweennessConfig { sample_size: Some(3), seed: 7, ..Default::default() };
        let a = betweenness_centrality(&g, &config);
        let b = betweenness_centrality(&g, &config);
        assert_eq!(a.sources_used, 3);
        assert_eq!(a.scores, b.scores);
    }

    // ── Closeness ────────────────────────────────────────────────────────

    #[test]
    fn closeness_star_center_is_one() {
        let c = closeness_centrality(&star(4));
        assert!((c[0] - 1.0).abs() < 1e-12);
        // leaf: 1 hop to hub, 2 hops to 3 other leaves → 4 / 7
        assert!((c[1] - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn closeness_is_scaled_by_component_size() {
        // Pair {0,1} plus isolated node 2
        let c = closeness_centrality(&graph(3, &[(0, 1)]));
        assert!((c[0] - 0.5).abs() < 1e-12);
        assert_eq!(c[2], 0.0);
    }

    // ── Degree ───────────────────────────────────────────────────────────

    #[test]
    fn degree_centrality_normalizes() {
        let d = degree_centrality(&star(4));
        assert_eq!(d[0], 1.0);
        assert_eq!(d[1], 0.25);
        assert_eq!(degree_centrality(&graph(1, &[])), vec![0.0]);
    }
}
