//! CLI configuration loaded from environment variables.
//!
//! Command-line flags override these values. Every setting has a default.
//!
//! | Variable          | Default  | Description                                    |
//! |-------------------|----------|------------------------------------------------|
//! | `LUDO_DATA_DIR`   | `static` | Directory holding the CSV exports              |
//! | `LUDO_TOP_K`      | `10`     | Rows per ranking table                         |
//! | `LUDO_SEED`       | `42`     | Seed for Louvain order and betweenness sampling |
//! | `LUDO_MAX_GAMES`  | `2500`   | Most popular games kept (0 = all)              |
//! | `LUDO_THRESHOLD`  | `0.0`    | Minimum similarity (exclusive) for a game edge |
//! | `LUDO_LOG`        | see below | tracing filter string                         |

use std::path::PathBuf;

use ludo_algo::AnalysisConfig;
use ludo_graph::SimilarityConfig;

pub const DEFAULT_LOG_FILTER: &str = "ludo_cli=info,ludo_graph=warn,ludo_algo=info";

/// Runtime configuration for the `ludo` binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `games.csv`, `designers_reduced.csv` and `mechanics.csv`.
    pub data_dir: PathBuf,

    pub top_k: usize,

    pub seed: u64,

    /// `None` keeps every game.
    pub max_games: Option<usize>,

    pub threshold: f64,

    /// Tracing filter string, e.g. `"ludo_algo=debug,info"`.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("static"),
            top_k: 10,
            seed: 42,
            max_games: Some(2500),
            threshold: 0.0,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, applying defaults where
    /// a variable is absent or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir:   PathBuf::from(env_str("LUDO_DATA_DIR", "static")),
            top_k:      env_parse("LUDO_TOP_K", defaults.top_k),
            seed:       env_parse("LUDO_SEED", defaults.seed),
            max_games:  max_games(env_parse("LUDO_MAX_GAMES", 2500usize)),
            threshold:  env_parse("LUDO_THRESHOLD", defaults.threshold),
            log_filter: env_str("LUDO_LOG", DEFAULT_LOG_FILTER),
        }
    }

    /// Analysis settings: seeds and table sizes flow from this config.
    pub fn analysis(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig { top_k: self.top_k, ..Default::default() };
        config.louvain.seed = self.seed;
        config.betweenness.seed = self.seed;
        config
    }

    pub fn similarity(&self, record_shared_features: bool) -> SimilarityConfig {
        SimilarityConfig {
            threshold: self.threshold,
            max_games: self.max_games,
            record_shared_features,
        }
    }
}

/// `0` means "keep every game".
pub fn max_games(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
