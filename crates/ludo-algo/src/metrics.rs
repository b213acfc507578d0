//! Basic graph statistics: degree, strength, density, top-K ranking.

use ludo_graph::Graph;

/// Distinct-neighbor count for every node.
pub fn degrees(graph: &Graph) -> Vec<f64> {
    (0..graph.node_count()).map(|n| graph.degree(n) as f64).collect()
}

/// Sum of incident edge weights for every node.
pub fn strengths(graph: &Graph) -> Vec<f64> {
    (0..graph.node_count()).map(|n| graph.strength(n)).collect()
}

/// `2|E| / |V|`; 0.0 for an empty graph.
pub fn average_degree(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / n as f64
}

/// `|E| / (|V|(|V|-1)/2)`.
///
/// Defined as 0.0 when `|V| < 2`.
pub fn density(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    let max_edges = n as f64 * (n - 1) as f64 / 2.0;
    graph.edge_count() as f64 / max_edges
}

/// Top `k` `(node, value)` pairs by value, descending.
///
/// Ties keep node insertion order. NaN compares equal to everything.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    // stable: equal values stay in index order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);
    ranked
}
