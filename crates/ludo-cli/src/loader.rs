//! CSV loading for the BoardGameGeek exports.
//!
//! - `games.csv`: `BGGId`, `Name`, `NumUserRatings` (other columns ignored)
//! - `designers_reduced.csv`: one 0/1 column per designer, rows aligned with `games.csv`
//! - `mechanics.csv`: `BGGId` plus one 0/1 column per mechanic

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ludo_graph::{
    vectorize_flags, CollaborationRow, FeatureVector, GameRow, GraphError, Participants,
    Vocabulary,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: PathBuf, column: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

// ─────────────────────────────────────────────
// CSV parsing
// ─────────────────────────────────────────────

/// Split CSV text into records.
///
/// Fields may be wrapped in double quotes; inside quotes, `""` is a literal
/// quote and separators or line breaks are part of the field. A quote that
/// does not open a field is kept as a literal character. Blank lines are
/// dropped.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                }
                record.clear();
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Parse a single CSV line.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    parse_csv(line).into_iter().next().unwrap_or_default()
}

/// A parsed CSV file: header plus data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut records = parse_csv(text.trim_start_matches('\u{feff}')).into_iter();
        let headers = records
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows: Vec<Vec<String>> = records.collect();
        debug!(path = %path.display(), rows = rows.len(), "csv loaded");
        Ok(Self { path: path.to_path_buf(), headers, rows })
    }

    /// Position of a required column.
    pub fn column(&self, name: &str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                file: self.path.clone(),
                column: name.to_string(),
            })
    }
}

/// `0`/`1` cell → flag. Accepts float spellings (`1.0`) as exported by pandas.
fn parse_flag(cell: &str) -> Option<u8> {
    let v: f64 = cell.trim().parse().ok()?;
    Some(u8::from(v != 0.0))
}

/// Reorder a header-aligned flag row into vocabulary order.
fn flags_in_vocab_order(vocab: &Vocabulary, headers: &[String], cells: &[String]) -> Option<Vec<u8>> {
    let mut flags = vec![0u8; vocab.len()];
    for (header, cell) in headers.iter().zip(cells) {
        let flag = parse_flag(cell)?;
        if let Some(idx) = vocab.index_of(header) {
            flags[idx] |= flag;
        }
    }
    Some(flags)
}

// ─────────────────────────────────────────────
// Games
// ─────────────────────────────────────────────

/// One `games.csv` row.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: u64,
    pub name: String,
    pub num_user_ratings: u64,
}

/// Load `games.csv`, keeping the row position of each game.
///
/// Rows with an unparseable id are skipped (their position is `None`) so
/// that `designers_reduced.csv` stays row-aligned.
pub fn load_games(path: &Path) -> Result<Vec<Option<GameRecord>>, LoadError> {
    let table = CsvTable::read(path)?;
    let id_col = table.column("BGGId")?;
    let name_col = table.column("Name")?;
    let ratings_col = table.column("NumUserRatings")?;

    let games: Vec<Option<GameRecord>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let cell = |i: usize| cells.get(i).map(|s| s.trim()).unwrap_or("");
            let Ok(id) = cell(id_col).parse::<u64>() else {
                warn!(row, file = %path.display(), value = cell(id_col), "skipping row with bad BGGId");
                return None;
            };
            // pandas may export counts as floats
            let num_user_ratings = cell(ratings_col)
                .parse::<u64>()
                .ok()
                .or_else(|| cell(ratings_col).parse::<f64>().ok().map(|v| v.max(0.0) as u64))
                .unwrap_or(0);
            Some(GameRecord { id, name: cell(name_col).to_string(), num_user_ratings })
        })
        .collect();

    info!(games = games.iter().flatten().count(), file = %path.display(), "games loaded");
    Ok(games)
}

// ─────────────────────────────────────────────
// Designers
// ─────────────────────────────────────────────

/// Designer vocabulary plus one [`CollaborationRow`] per game.
#[derive(Debug, Clone)]
pub struct DesignerData {
    pub vocabulary: Vocabulary,
    pub rows: Vec<CollaborationRow>,
    pub skipped_rows: usize,
}

/// Load the designer presence matrix, labelling each row with the game
/// name at the same position in `games.csv`.
pub fn load_designers(designers_path: &Path, games_path: &Path) -> Result<DesignerData, LoadError> {
    let games = load_games(games_path)?;
    let table = CsvTable::read(designers_path)?;
    let vocabulary = Vocabulary::new(table.headers.iter().cloned());

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut skipped_rows = 0;
    for (row, cells) in table.rows.iter().enumerate() {
        if cells.len() != table.headers.len() {
            warn!(row, expected = table.headers.len(), got = cells.len(), "skipping malformed designer row");
            skipped_rows += 1;
            continue;
        }
        let Some(flags) = flags_in_vocab_order(&vocabulary, &table.headers, cells) else {
            warn!(row, "skipping designer row with non-numeric flags");
            skipped_rows += 1;
            continue;
        };
        let label = games
            .get(row)
            .and_then(Option::as_ref)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| format!("row {row}"));
        rows.push(CollaborationRow { label, participants: Participants::Flags(flags) });
    }

    info!(designers = vocabulary.len(), rows = rows.len(), skipped = skipped_rows, "designer matrix loaded");
    Ok(DesignerData { vocabulary, rows, skipped_rows })
}

// ─────────────────────────────────────────────
// Mechanics
// ─────────────────────────────────────────────

/// Mechanic vocabulary plus one [`GameRow`] per game.
#[derive(Debug, Clone)]
pub struct GameData {
    pub vocabulary: Vocabulary,
    pub games: Vec<GameRow>,
    pub skipped_rows: usize,
}

/// Load games and join their mechanic vectors by `BGGId`.
///
/// A game absent from `mechanics.csv` gets an all-zero vector.
pub fn load_game_mechanics(games_path: &Path, mechanics_path: &Path) -> Result<GameData, LoadError> {
    let records = load_games(games_path)?;
    let table = CsvTable::read(mechanics_path)?;
    let id_col = table.column("BGGId")?;

    let mechanic_headers: Vec<String> = table
        .headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != id_col)
        .map(|(_, h)| h.clone())
        .collect();
    let vocabulary = Vocabulary::new(mechanic_headers.iter().cloned());

    let mut features: HashMap<u64, FeatureVector> = HashMap::new();
    let mut skipped_rows = records.iter().filter(|r| r.is_none()).count();
    for (row, cells) in table.rows.iter().enumerate() {
        if cells.len() != table.headers.len() {
            warn!(row, expected = table.headers.len(), got = cells.len(), "skipping malformed mechanics row");
            skipped_rows += 1;
            continue;
        }
        let Ok(id) = cells[id_col].trim().parse::<u64>() else {
            warn!(row, value = %cells[id_col], "skipping mechanics row with bad BGGId");
            skipped_rows += 1;
            continue;
        };
        let flag_cells: Vec<String> = cells
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != id_col)
            .map(|(_, c)| c.clone())
            .collect();
        let Some(flags) = flags_in_vocab_order(&vocabulary, &mechanic_headers, &flag_cells) else {
            warn!(row, game = id, "skipping mechanics row with non-numeric flags");
            skipped_rows += 1;
            continue;
        };
        features.insert(id, vectorize_flags(&vocabulary, &flags)?);
    }

    let games: Vec<GameRow> = records
        .into_iter()
        .flatten()
        .map(|g| GameRow {
            features: features
                .remove(&g.id)
                .unwrap_or_else(|| FeatureVector::zeros(vocabulary.len())),
            id: g.id,
            name: g.name,
            popularity: g.num_user_ratings,
        })
        .collect();

    info!(mechanics = vocabulary.len(), games = games.len(), skipped = skipped_rows, "mechanics joined");
    Ok(GameData { vocabulary, games, skipped_rows })
}
