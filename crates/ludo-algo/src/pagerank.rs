//! PageRank via power iteration.

use std::time::Instant;

use ludo_graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankConfig {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// node index → score
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub duration_ms: u64,
}

/// Weighted PageRank via power iteration.
///
/// Each undirected edge is walkable in both directions; a walker at `u`
/// moves to neighbor `v` with probability `w(u,v) / strength(u)`. Scores
/// sum to 1.0. Convergence is measured by L1 norm of the score-delta
/// vector falling below `convergence_threshold`. If the cap is hit first,
/// the last estimate is returned with `converged = false`.
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> PageRankResult {
    let start = Instant::now();
    let n = graph.node_count();

    if n == 0 {
        return PageRankResult {
            scores: vec![],
            iterations: 0,
            converged: true,
            duration_ms: 0,
        };
    }

    let d = config.damping_factor;
    let base = (1.0 - d) / n as f64;

    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0_f64; n];
    let mut converged = false;
    let mut iterations = 0;

    // Pre-compute strength for each node
    let strength: Vec<f64> = (0..n).map(|u| graph.strength(u)).collect();

    for _ in 0..config.max_iterations {
        iterations += 1;

        // Dangling nodes: distribute evenly
        let dangling: f64 = (0..n)
            .filter(|&u| strength[u] <= 0.0)
            .map(|u| scores[u])
            .sum();
        let dangling_share = d * dangling / n as f64;

        // Reset
        for s in new_scores.iter_mut() {
            *s = base + dangling_share;
        }

        // Distribute rank
        for u in 0..n {
            if strength[u] <= 0.0 {
                continue;
            }
            let share = d * scores[u] / strength[u];
            for entry in graph.entries(u) {
                new_scores[entry.neighbor] += share * graph.edge(entry.edge_idx).weight;
            }
        }

        // Check convergence (L1 norm)
        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if diff < config.convergence_threshold {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(iterations, "pagerank did not converge; returning last estimate");
    }

    PageRankResult {
        scores,
        iterations,
        converged,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
