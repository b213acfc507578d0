//! Co-occurrence graph builders.
//!
//! - **Collaboration** (designers): every pair of participants in one item
//!   gets an edge; repeated pairs accumulate weight and provenance.
//! - **Similarity** (games): every pair of feature vectors whose similarity
//!   exceeds a threshold gets an edge weighted by that similarity.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::model::Entity;
use crate::parse::parse_name_list;
use crate::provenance::EdgeProvenance;
use crate::similarity::cosine_similarity;
use crate::vectorize::{vectorize_flags, FeatureVector, Vocabulary};

// ─────────────────────────────────────────────
// Collaboration mode
// ─────────────────────────────────────────────

/// The participants of one item, in whichever form the loader produced.
#[derive(Debug, Clone)]
pub enum Participants {
    /// Already resolved names.
    Names(Vec<String>),
    /// Presence flags aligned with the designer vocabulary.
    Flags(Vec<u8>),
    /// A stringified list literal, e.g. `['A', 'B']`.
    Literal(String),
}

/// One item (game) and the designers jointly responsible for it.
#[derive(Debug, Clone)]
pub struct CollaborationRow {
    pub label: String,
    pub participants: Participants,
}

impl CollaborationRow {
    pub fn names<S: Into<String>>(label: impl Into<String>, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            label: label.into(),
            participants: Participants::Names(names.into_iter().map(Into::into).collect()),
        }
    }
}

/// Output of [`build_collaboration_graph`].
#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    pub graph: Graph,
    pub provenance: EdgeProvenance,
    pub skipped_rows: usize,
}

/// Build the designer collaboration graph.
///
/// `vocab` is only consulted for [`Participants::Flags`] rows. Malformed
/// rows are logged and skipped.
pub fn build_collaboration_graph<I>(vocab: &Vocabulary, rows: I) -> CollaborationGraph
where
    I: IntoIterator<Item = CollaborationRow>,
{
    let start = Instant::now();
    let mut out = CollaborationGraph::default();

    for (row_idx, row) in rows.into_iter().enumerate() {
        let names = match resolve_participants(vocab, row_idx, row.participants) {
            Ok(names) => names,
            Err(e) => {
                warn!(row = row_idx, label = %row.label, error = %e, "skipping malformed row");
                out.skipped_rows += 1;
                continue;
            }
        };

        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                let a = out.graph.add_node(Entity::designer(names[i].as_str()));
                let b = out.graph.add_node(Entity::designer(names[j].as_str()));
                if out.graph.upsert_edge(a, b, 1.0).is_some() {
                    out.provenance.record(a, b, row.label.as_str());
                }
            }
        }
    }

    info!(
        nodes = out.graph.node_count(),
        edges = out.graph.edge_count(),
        skipped = out.skipped_rows,
        duration_ms = start.elapsed().as_millis() as u64,
        "collaboration graph built"
    );
    out
}

/// Resolve a row to a list of distinct, non-empty names in row order.
fn resolve_participants(
    vocab: &Vocabulary,
    row: usize,
    participants: Participants,
) -> Result<Vec<String>, GraphError> {
    let raw: Vec<String> = match participants {
        Participants::Names(names) => names,
        Participants::Flags(flags) => {
            let fv = vectorize_flags(vocab, &flags).map_err(|e| GraphError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;
            fv.present(vocab).into_iter().map(str::to_owned).collect()
        }
        Participants::Literal(text) => parse_name_list(&text).map_err(|e| {
            GraphError::MalformedRow { row, reason: e.to_string() }
        })?,
    };

    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let name = name.trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

// ─────────────────────────────────────────────
// Similarity mode
// ─────────────────────────────────────────────

/// A game with its mechanic vector.
#[derive(Debug, Clone)]
pub struct GameRow {
    pub id: u64,
    pub name: String,
    /// Number of user ratings; used by the `max_games` pre-filter.
    pub popularity: u64,
    pub features: FeatureVector,
}

/// Configuration for the similarity builder.
#[derive(Debug, Clone)]
pub struct SimilarityConfig {
    /// Keep a pair only if its similarity is strictly greater than this.
    pub threshold: f64,
    /// Keep only the `n` most popular games before vectorizing. `None` keeps all.
    pub max_games: Option<usize>,
    /// Record the shared feature names of every edge as its provenance.
    pub record_shared_features: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { threshold: 0.0, max_games: None, record_shared_features: false }
    }
}

/// Output of [`build_similarity_graph`].
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    pub graph: Graph,
    /// Shared features per edge, when requested.
    pub provenance: Option<EdgeProvenance>,
    /// Games that survived the popularity pre-filter and the width check.
    pub games_considered: usize,
    pub skipped_rows: usize,
}

/// The `max` most popular games, ties kept in input order.
pub fn select_top_games<'a>(
    games: impl IntoIterator<Item = &'a GameRow>,
    max: Option<usize>,
) -> Vec<&'a GameRow> {
    let mut selected: Vec<&GameRow> = games.into_iter().collect();
    if let Some(max) = max {
        selected.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        selected.truncate(max);
    }
    selected
}

/// Build the game similarity graph using cosine similarity.
pub fn build_similarity_graph(
    games: &[GameRow],
    vocab: &Vocabulary,
    config: &SimilarityConfig,
) -> SimilarityGraph {
    build_similarity_graph_with(games, vocab, config, cosine_similarity)
}

/// Build the game similarity graph with an arbitrary pairwise similarity.
///
/// Pairs are visited as `i < j` in (pre-filtered) input order, so each
/// undirected edge is inserted exactly once.
pub fn build_similarity_graph_with<F>(
    games: &[GameRow],
    vocab: &Vocabulary,
    config: &SimilarityConfig,
    similarity: F,
) -> SimilarityGraph
where
    F: Fn(&FeatureVector, &FeatureVector) -> f64,
{
    let start = Instant::now();
    let mut skipped_rows = 0;

    let well_formed = games.iter().enumerate().filter(|(row, g)| {
        if g.features.dim() == vocab.len() {
            return true;
        }
        let e = GraphError::DimensionMismatch { expected: vocab.len(), got: g.features.dim() };
        warn!(row = *row, game = g.id, error = %e, "skipping malformed row");
        skipped_rows += 1;
        false
    });
    let selected = select_top_games(well_formed.map(|(_, g)| g), config.max_games);

    let mut graph = Graph::new();
    let mut provenance = config.record_shared_features.then(EdgeProvenance::new);

    for i in 0..selected.len() {
        for j in (i + 1)..selected.len() {
            let (gi, gj) = (selected[i], selected[j]);
            let score = similarity(&gi.features, &gj.features);
            // non-positive scores never make an edge, whatever the threshold
            if score.is_nan() || score <= config.threshold || score <= 0.0 {
                continue;
            }
            let a = graph.add_node(Entity::game(gi.id, gi.name.as_str()));
            let b = graph.add_node(Entity::game(gj.id, gj.name.as_str()));
            if graph.upsert_edge(a, b, score).is_none() {
                debug!(a = gi.id, b = gj.id, score, "pair rejected");
                continue;
            }
            if let Some(prov) = provenance.as_mut() {
                for k in gi.features.shared_indices(&gj.features) {
                    prov.record(a, b, vocab.name(k));
                }
            }
        }
    }

    info!(
        games = selected.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold = config.threshold,
        duration_ms = start.elapsed().as_millis() as u64,
        "similarity graph built"
    );

    SimilarityGraph {
        graph,
        provenance,
        games_considered: selected.len(),
        skipped_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityId;
    use crate::similarity::jaccard_similarity;
    use crate::vectorize::vectorize_names;

    fn no_vocab() -> Vocabulary {
        Vocabulary::default()
    }

    fn idx(graph: &Graph, name: &str) -> usize {
        graph.index_of(&EntityId::Designer(name.into())).unwrap()
    }

    // ── Collaboration ────────────────────────────────────────────────────

    #[test]
    fn repeated_pair_accumulates_weight_and_provenance() {
        let rows = vec![
            CollaborationRow::names("Pandemic Legacy", ["X", "Y"]),
            CollaborationRow::names("Solo Game", ["Z"]),
            CollaborationRow::names("Pandemic Legacy 2", ["Y", "X"]),
        ];
        let out = build_collaboration_graph(&no_vocab(), rows);
        let (x, y) = (idx(&out.graph, "X"), idx(&out.graph, "Y"));

        assert_eq!(out.graph.edge_count(), 1);
        assert_eq!(out.graph.edge_between(x, y).unwrap().weight, 2.0);
        assert_eq!(out.provenance.get(x, y), &["Pandemic Legacy", "Pandemic Legacy 2"]);
        assert_eq!(out.graph.node_count(), 2, "solo designers never become nodes");
    }

    #[test]
    fn three_designers_form_a_triangle() {
        let rows = vec![CollaborationRow::names("Trio", ["A", "B", "C"])];
        let out = build_collaboration_graph(&no_vocab(), rows);
        assert_eq!(out.graph.edge_count(), 3);
        assert!(out.graph.edges().iter().all(|e| e.weight == 1.0));
    }

    #[test]
    fn duplicate_names_in_a_row_do_not_self_loop() {
        let rows = vec![CollaborationRow::names("Dup", ["A", "A ", "B"])];
        let out = build_collaboration_graph(&no_vocab(), rows);
        assert_eq!(out.graph.node_count(), 2);
        assert_eq!(out.graph.edge_count(), 1);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let vocab = Vocabulary::new(["A", "B", "C"]);
        let rows = vec![
            CollaborationRow { label: "bad".into(), participants: Participants::Literal("A, B".into()) },
            CollaborationRow { label: "short".into(), participants: Participants::Flags(vec![1, 1]) },
            CollaborationRow { label: "ok".into(), participants: Participants::Literal("['A', 'C']".into()) },
            CollaborationRow { label: "flags".into(), participants: Participants::Flags(vec![0, 1, 1]) },
        ];
        let out = build_collaboration_graph(&vocab, rows);
        assert_eq!(out.skipped_rows, 2);
        assert_eq!(out.graph.edge_count(), 2);
        let (a, c) = (idx(&out.graph, "A"), idx(&out.graph, "C"));
        assert_eq!(out.provenance.get(a, c), &["ok"]);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let out = build_collaboration_graph(&no_vocab(), Vec::new());
        assert!(out.graph.is_empty());
        assert_eq!(out.graph.edge_count(), 0);
    }

    // ── Similarity ───────────────────────────────────────────────────────

    fn mechanics() -> Vocabulary {
        Vocabulary::new(["Dice Rolling", "Hand Management", "Worker Placement", "Drafting"])
    }

    fn game(id: u64, popularity: u64, mechs: &[&str]) -> GameRow {
        GameRow {
            id,
            name: format!("game-{id}"),
            popularity,
            features: vectorize_names(&mechanics(), mechs),
        }
    }

    #[test]
    fn identical_vectors_get_unit_weight_and_orthogonal_none() {
        let games = vec![
            game(1, 10, &["Dice Rolling", "Drafting"]),
            game(2, 10, &["Dice Rolling", "Drafting"]),
            game(3, 10, &["Worker Placement"]),
        ];
        let out = build_similarity_graph(&games, &mechanics(), &SimilarityConfig::default());
        assert_eq!(out.graph.edge_count(), 1);
        let e = &out.graph.edges()[0];
        assert!((e.weight - 1.0).abs() < 1e-12);
        assert!(out.graph.index_of(&EntityId::Game(3)).is_none());
    }

    #[test]
    fn threshold_sparsifies() {
        let games = vec![
            game(1, 1, &["Dice Rolling", "Hand Management"]),
            game(2, 1, &["Hand Management", "Drafting"]),
            game(3, 1, &["Dice Rolling", "Hand Management"]),
        ];
        let dense = build_similarity_graph(&games, &mechanics(), &SimilarityConfig::default());
        assert_eq!(dense.graph.edge_count(), 3);

        let config = SimilarityConfig { threshold: 0.5, ..Default::default() };
        let sparse = build_similarity_graph(&games, &mechanics(), &config);
        assert_eq!(sparse.graph.edge_count(), 1);
    }

    #[test]
    fn negative_threshold_adds_no_edgeless_nodes() {
        let games = vec![game(1, 1, &["Dice Rolling"]), game(2, 1, &["Drafting"])];
        let config = SimilarityConfig { threshold: -0.5, ..Default::default() };
        let out = build_similarity_graph(&games, &mechanics(), &config);
        assert_eq!(out.graph.edge_count(), 0);
        assert_eq!(out.graph.node_count(), 0);
    }

    #[test]
    fn wrong_width_rows_do_not_take_a_popularity_slot() {
        let mut bad = game(9, 1_000, &["Drafting"]);
        bad.features = FeatureVector::zeros(2);
        let games = vec![bad, game(1, 10, &["Drafting"]), game(2, 5, &["Drafting"])];
        let config = SimilarityConfig { max_games: Some(2), ..Default::default() };
        let out = build_similarity_graph(&games, &mechanics(), &config);
        assert_eq!(out.skipped_rows, 1);
        assert_eq!(out.games_considered, 2);
        assert_eq!(out.graph.edge_count(), 1);
    }

    #[test]
    fn max_games_keeps_most_popular() {
        let games = vec![
            game(1, 5, &["Drafting"]),
            game(2, 50, &["Drafting"]),
            game(3, 500, &["Drafting"]),
        ];
        let config = SimilarityConfig { max_games: Some(2), ..Default::default() };
        let out = build_similarity_graph(&games, &mechanics(), &config);
        assert_eq!(out.games_considered, 2);
        assert!(out.graph.index_of(&EntityId::Game(1)).is_none());
        assert_eq!(out.graph.edge_count(), 1);
    }

    #[test]
    fn shared_features_recorded_as_provenance() {
        let games = vec![
            game(1, 1, &["Dice Rolling", "Drafting", "Hand Management"]),
            game(2, 1, &["Drafting", "Dice Rolling"]),
        ];
        let config = SimilarityConfig { record_shared_features: true, ..Default::default() };
        let out = build_similarity_graph(&games, &mechanics(), &config);
        let prov = out.provenance.unwrap();
        assert_eq!(prov.get(0, 1), &["Dice Rolling", "Drafting"]);
    }

    #[test]
    fn wrong_width_rows_are_skipped() {
        let mut bad = game(9, 1, &["Drafting"]);
        bad.features = FeatureVector::zeros(2);
        let games = vec![game(1, 1, &["Drafting"]), bad, game(2, 1, &["Drafting"])];
        let out = build_similarity_graph(&games, &mechanics(), &SimilarityConfig::default());
        assert_eq!(out.skipped_rows, 1);
        assert_eq!(out.games_considered, 2);
        assert_eq!(out.graph.edge_count(), 1);
    }

    #[test]
    fn custom_similarity_function() {
        let games = vec![
            game(1, 1, &["Dice Rolling", "Hand Management"]),
            game(2, 1, &["Hand Management", "Drafting"]),
        ];
        let out = build_similarity_graph_with(
            &games,
            &mechanics(),
            &SimilarityConfig::default(),
            jaccard_similarity,
        );
        assert!((out.graph.edges()[0].weight - 1.0 / 3.0).abs() < 1e-12);
    }
}
