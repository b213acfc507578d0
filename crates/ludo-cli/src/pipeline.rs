//! End-to-end runs: load CSVs, build the graph, analyze.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use ludo_algo::{annotate_hops, path_between, path_steps, AnalysisReport, MetricsEngine, PathStep};
use ludo_graph::{
    build_collaboration_graph, build_similarity_graph_with, cosine_similarity, jaccard_similarity,
    EntityId,
};
use tracing::info;

use crate::config::AppConfig;
use crate::loader::{load_designers, load_game_mechanics, LoadError};

/// Pairwise similarity used for the game graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Similarity {
    #[default]
    Cosine,
    Jaccard,
}

/// Locations of the three CSV exports.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub games: PathBuf,
    pub designers: PathBuf,
    pub mechanics: PathBuf,
}

impl DataPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            games: dir.join("games.csv"),
            designers: dir.join("designers_reduced.csv"),
            mechanics: dir.join("mechanics.csv"),
        }
    }
}

/// Designer collaboration analysis. The diameter path is annotated with the
/// games behind each collaboration.
pub fn analyze_designers(paths: &DataPaths, config: &AppConfig) -> Result<AnalysisReport, LoadError> {
    let data = load_designers(&paths.designers, &paths.games)?;
    let built = build_collaboration_graph(&data.vocabulary, data.rows);
    info!(
        designers = built.graph.node_count(),
        collaborations = built.graph.edge_count(),
        skipped = data.skipped_rows + built.skipped_rows,
        "designer graph ready"
    );
    Ok(MetricsEngine::new(config.analysis()).compute(&built.graph, Some(&built.provenance)))
}

/// Shortest collaboration chain between two designers, each hop annotated
/// with the games the pair made together. `Ok(None)` if they are not connected.
pub fn designer_connection(paths: &DataPaths, from: &str, to: &str) -> Result<Option<Vec<PathStep>>, LoadError> {
    let data = load_designers(&paths.designers, &paths.games)?;
    let built = build_collaboration_graph(&data.vocabulary, data.rows);
    let from = EntityId::Designer(from.trim().to_string());
    let to = EntityId::Designer(to.trim().to_string());

    let steps = path_between(&built.graph, &from, &to)?.map(|nodes| {
        let hops = annotate_hops(&built.graph, &nodes, Some(&built.provenance));
        path_steps(&built.graph, &nodes, &hops)
    });
    info!(%from, %to, hops = ?steps.as_ref().map(|s| s.len().saturating_sub(1)), "designer connection resolved");
    Ok(steps)
}

/// Game mechanic-similarity analysis. The diameter path is annotated with
/// the mechanics each hop shares.
pub fn analyze_games(
    paths: &DataPaths,
    config: &AppConfig,
    similarity: Similarity,
) -> Result<AnalysisReport, LoadError> {
    let data = load_game_mechanics(&paths.games, &paths.mechanics)?;
    let sim_config = config.similarity(true);
    let built = match similarity {
        Similarity::Cosine => build_similarity_graph_with(&data.games, &data.vocabulary, &sim_config, cosine_similarity),
        Similarity::Jaccard => build_similarity_graph_with(&data.games, &data.vocabulary, &sim_config, jaccard_similarity),
    };
    info!(
        games = built.games_considered,
        nodes = built.graph.node_count(),
        similarities = built.graph.edge_count(),
        skipped = data.skipped_rows + built.skipped_rows,
        similarity = ?similarity,
        "game graph ready"
    );
    Ok(MetricsEngine::new(config.analysis()).compute(&built.graph, built.provenance.as_ref()))
}
