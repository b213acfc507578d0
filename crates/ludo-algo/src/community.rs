//! Community detection: Louvain modularity optimization with level aggregation.

use std::collections::HashMap;
use std::time::Instant;

use ludo_graph::Graph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Moves must beat the current community by more than this.
const GAIN_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LouvainConfig {
    /// Seed for the node visiting order.
    pub seed: u64,
    pub resolution: f64,
    /// Maximum number of aggregation levels.
    pub max_levels: usize,
    /// Maximum local-moving sweeps per level.
    pub max_passes: usize,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self { seed: 42, resolution: 1.0, max_levels: 10, max_passes: 100 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommunityResult {
    /// node index → community label (label 0 is the largest community)
    pub labels: Vec<usize>,
    /// Communities ranked by size (descending); members in node order.
    pub communities: Vec<Vec<usize>>,
    pub modularity: f64,
    /// Aggregation levels that improved the partition.
    pub levels: usize,
    pub duration_ms: u64,
}

impl CommunityResult {
    pub fn community_count(&self) -> usize {
        self.communities.len()
    }
}

// ── Level graph ──────────────────────────────────────────────────────────────

/// Weighted graph of one Louvain level. Internal weight of an aggregated
/// community lives in `self_loops`, counted from both endpoints.
struct LevelGraph {
    adj: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    /// node → weighted degree, self-loops included
    degree: Vec<f64>,
    /// 2m
    total: f64,
}

impl LevelGraph {
    fn from_graph(graph: &Graph) -> Self {
        let n = graph.node_count();
        let adj: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|v| {
                graph
                    .entries(v)
                    .iter()
                    .map(|e| (e.neighbor, graph.edge(e.edge_idx).weight))
                    .collect()
            })
            .collect();
        let degree: Vec<f64> = (0..n).map(|v| graph.strength(v)).collect();
        let total = degree.iter().sum();
        Self { adj, self_loops: vec![0.0; n], degree, total }
    }

    fn len(&self) -> usize {
        self.adj.len()
    }

    /// Collapse each community of `comm` (labels in `0..count`) into one node.
    fn aggregate(&self, comm: &[usize], count: usize) -> Self {
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); count];
        let mut slot: Vec<HashMap<usize, usize>> = vec![HashMap::new(); count];
        let mut self_loops = vec![0.0_f64; count];

        for i in 0..self.len() {
            let c = comm[i];
            self_loops[c] += self.self_loops[i];
            for &(j, w) in &self.adj[i] {
                let d = comm[j];
                if c == d {
                    self_loops[c] += w;
                    continue;
                }
                let row = &mut adj[c];
                let pos = *slot[c].entry(d).or_insert_with(|| {
                    row.push((d, 0.0));
                    row.len() - 1
                });
                row[pos].1 += w;
            }
        }

        let degree: Vec<f64> = (0..count)
            .map(|c| adj[c].iter().map(|&(_, w)| w).sum::<f64>() + self_loops[c])
            .collect();
        Self { adj, self_loops, degree, total: self.total }
    }
}

/// One level of local moving. Returns the community of every level node and
/// whether any node changed community.
fn local_moving(level: &LevelGraph, config: &LouvainConfig, rng: &mut StdRng) -> (Vec<usize>, bool) {
    let n = level.len();
    let mut comm: Vec<usize> = (0..n).collect();
    if level.total <= 0.0 {
        return (comm, false);
    }

    let mut tot = level.degree.clone();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut weight_to = vec![0.0_f64; n];
    let mut touched: Vec<usize> = Vec::new();
    let mut moved_any = false;

    for pass in 0..config.max_passes {
        let mut moves = 0usize;

        for &i in &order {
            let ci = comm[i];
            let ki = level.degree[i];

            // Weight from i to each neighboring community, first-seen order
            for &(j, w) in &level.adj[i] {
                let c = comm[j];
                if weight_to[c] == 0.0 {
                    touched.push(c);
                }
                weight_to[c] += w;
            }

            tot[ci] -= ki;
            let scale = config.resolution * ki / level.total;
            let mut best = ci;
            let mut best_gain = weight_to[ci] - tot[ci] * scale;
            for &c in &touched {
                let gain = weight_to[c] - tot[c] * scale;
                if gain > best_gain + GAIN_EPSILON {
                    best = c;
                    best_gain = gain;
                }
            }
            tot[best] += ki;
            comm[i] = best;
            if best != ci {
                moves += 1;
            }

            for &c in &touched {
                weight_to[c] = 0.0;
            }
            touched.clear();
        }

        debug!(pass, moves, "louvain local moving pass");
        if moves == 0 {
            break;
        }
        moved_any = true;
    }

    (comm, moved_any)
}

/// Map arbitrary labels to `0..count` in order of first appearance.
fn renumber(comm: &[usize]) -> (Vec<usize>, usize) {
    let mut map: HashMap<usize, usize> = HashMap::new();
    let renumbered = comm
        .iter()
        .map(|&c| {
            let next = map.len();
            *map.entry(c).or_insert(next)
        })
        .collect();
    (renumbered, map.len())
}

// ── Louvain ──────────────────────────────────────────────────────────────────

/// Louvain community detection.
///
/// Phase 1: nodes are visited in a seeded shuffled order and each moves to
///          the neighboring community with the best positive modularity gain
///          `w_ic − γ·tot_c·k_i / 2m`, until a sweep makes no move.
/// Phase 2: communities are collapsed into single nodes and phase 1 repeats
///          on the aggregated graph, until a level makes no move.
pub fn louvain(graph: &Graph, config: &LouvainConfig) -> CommunityResult {
    let start = Instant::now();
    let n = graph.node_count();
    if n == 0 {
        return CommunityResult::default();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut level = LevelGraph::from_graph(graph);
    let mut membership: Vec<usize> = (0..n).collect();
    let mut levels = 0;

    while levels < config.max_levels {
        let (comm, moved) = local_moving(&level, config, &mut rng);
        if !moved {
            break;
        }
        levels += 1;

        let (renumbered, count) = renumber(&comm);
        for m in membership.iter_mut() {
            *m = renumbered[*m];
        }
        debug!(level = levels, communities = count, "louvain level aggregated");
        level = level.aggregate(&renumbered, count);
    }

    // Group in node order, then rank by size (stable: ties keep first member order)
    let (grouped, count) = renumber(&membership);
    let mut communities: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (node, &c) in grouped.iter().enumerate() {
        communities[c].push(node);
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut labels = vec![0; n];
    for (label, members) in communities.iter().enumerate() {
        for &m in members {
            labels[m] = label;
        }
    }

    let q = modularity(graph, &labels, config.resolution);
    info!(
        communities = communities.len(),
        modularity = q,
        levels,
        seed = config.seed,
        "louvain complete"
    );

    CommunityResult {
        labels,
        communities,
        modularity: q,
        levels,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Weighted modularity `Q = Σ_c [ in_c / 2m − γ (tot_c / 2m)² ]`.
///
/// Returns 0 for a graph without edges.
pub fn modularity(graph: &Graph, labels: &[usize], resolution: f64) -> f64 {
    let m2 = 2.0 * graph.total_weight();
    if m2 <= 0.0 {
        return 0.0;
    }

    let count = labels.iter().max().map_or(0, |&m| m + 1);
    let mut internal = vec![0.0_f64; count];
    let mut tot = vec![0.0_f64; count];

    for e in graph.edges() {
        if labels[e.a] == labels[e.b] {
            internal[labels[e.a]] += 2.0 * e.weight;
        }
    }
    for (v, &c) in labels.iter().enumerate() {
        tot[c] += graph.strength(v);
    }

    internal
        .iter()
        .zip(tot.iter())
        .map(|(&i, &t)| i / m2 - resolution * (t / m2) * (t / m2))
        .sum()
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

    /// Two 5-cliques {0..5} and {5..10} joined by the single edge 4–5.
    fn two_cliques() -> Graph {
        let mut edges = Vec::new();
        for base in [0, 5] {
            for i in base..base + 5 {
                for j in i + 1..base + 5 {
                    edges.push((i, j));
                }
            }
        }
        edges.push((4, 5));
        graph(10, &edges)
    }

    #[test]
    fn louvain_empty_graph() {
        let result = louvain(&Graph::new(), &LouvainConfig::default());
        assert!(result.labels.is_empty());
        assert_eq!(result.community_count(), 0);
        assert_eq!(result.modularity, 0.0);
    }

    #[test]
    fn nodes_without_edges_stay_alone() {
        let result = louvain(&graph(3, &[]), &LouvainConfig::default());
        assert_eq!(result.communities, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(result.levels, 0);
    }

    #[test]
    fn two_cliques_split_cleanly() {
        let g = two_cliques();
        let result = louvain(&g, &LouvainConfig::default());
        assert_eq!(result.community_count(), 2);
        assert_eq!(result.communities[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(result.communities[1], vec![5, 6, 7, 8, 9]);
        assert!(result.modularity > 0.4);
        assert!(result.levels >= 1);
    }

    #[test]
    fn partition_covers_every_node_once() {
        let g = graph(9, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (6, 7), (2, 3)]);
        let result = louvain(&g, &LouvainConfig::default());
        let mut all: Vec<usize> = result.communities.concat();
        all.sort();
        assert_eq!(all, (0..9).collect::<Vec<_>>());
        for (label, members) in result.communities.iter().enumerate() {
            for &m in members {
                assert_eq!(result.labels[m], label);
            }
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let g = two_cliques();
        let config = LouvainConfig { seed: 7, ..Default::default() };
        let a = louvain(&g, &config);
        let b = louvain(&g, &config);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.modularity, b.modularity);
    }

    #[test]
    fn modularity_of_single_community_is_zero() {
        let g = two_cliques();
        assert!(modularity(&g, &vec![0; 10], 1.0).abs() < 1e-12);
    }

    #[test]
    fn modularity_of_clique_split() {
        let g = two_cliques();
        let labels: Vec<usize> = (0..10).map(|v| v / 5).collect();
        // m = 21; each side: in = 20, tot = 21
        let expected = 2.0 * (20.0 / 42.0 - 0.25);
        assert!((modularity(&g, &labels, 1.0) - expected).abs() < 1e-12);
    }
}
