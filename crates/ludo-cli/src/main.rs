//! # ludo
//!
//! Network analysis of board-game designers and mechanics.
//!
//! ## Usage
//!
//! ```text
//! ludo designers --data-dir ./static
//! ludo games --max-games 2500 --threshold 0.1
//! ludo games --similarity jaccard --json > report.json
//! ludo connect "Matt Leacock" "Uwe Rosenberg"
//! ```
//!
//! Settings default from `LUDO_*` environment variables (see
//! [`ludo_cli::config`]); flags take precedence.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ludo_cli::config::{self, AppConfig};
use ludo_cli::{
    analyze_designers, analyze_games, designer_connection, render_connection, render_json, render_text,
    DataPaths, Similarity, Subject,
};

#[derive(Parser)]
#[command(name = "ludo", version, about = "Board-game designer and mechanic network analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding the CSV exports
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Rows per ranking table
    #[arg(long, global = true)]
    top_k: Option<usize>,
    /// Seed for community detection and betweenness sampling
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Designer collaboration graph
    Designers {
        /// Designer presence matrix (defaults to <DATA_DIR>/designers_reduced.csv)
        #[arg(long, value_name = "FILE")]
        designers: Option<PathBuf>,
    },
    /// Game similarity graph over shared mechanics
    Games {
        /// Keep only the N most rated games (0 = all)
        #[arg(long, value_name = "N")]
        max_games: Option<usize>,
        /// Minimum similarity (exclusive) for an edge
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long, value_enum, default_value_t = Similarity::Cosine)]
        similarity: Similarity,
    },
    /// Shortest collaboration chain between two designers
    Connect {
        from: String,
        to: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_filter))
        .with_writer(io::stderr)
        .init();

    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }
    if let Some(k) = cli.top_k {
        cfg.top_k = k;
    }
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    let mut paths = DataPaths::in_dir(&cfg.data_dir);

    tracing::info!(data_dir = %cfg.data_dir.display(), top_k = cfg.top_k, seed = cfg.seed, "starting ludo");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (report, subject) = match cli.command {
        Commands::Designers { designers } => {
            if let Some(path) = designers {
                paths.designers = path;
            }
            let report = analyze_designers(&paths, &cfg).context("designer analysis failed")?;
            (report, Subject::Designers)
        }
        Commands::Games { max_games, threshold, similarity } => {
            if let Some(n) = max_games {
                cfg.max_games = config::max_games(n);
            }
            if let Some(t) = threshold {
                cfg.threshold = t;
            }
            let report = analyze_games(&paths, &cfg, similarity).context("game analysis failed")?;
            (report, Subject::Games)
        }
        Commands::Connect { from, to } => {
            let steps = designer_connection(&paths, &from, &to).context("designer lookup failed")?;
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &steps)?;
                writeln!(out)?;
            } else {
                render_connection(steps.as_deref(), &from, &to, &mut out)?;
            }
            out.flush()?;
            return Ok(());
        }
    };

    if cli.json {
        render_json(&report, &mut out)?;
    } else {
        render_text(&report, subject, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
