//! Console and JSON rendering of an [`AnalysisReport`].

use std::io::{self, Write};

use ludo_algo::{AnalysisReport, PathStep, RankedEntity};

/// What the nodes of the analyzed graph are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Designers,
    Games,
}

impl Subject {
    fn nodes(self) -> &'static str {
        match self {
            Self::Designers => "designers",
            Self::Games => "games",
        }
    }

    fn edges(self) -> &'static str {
        match self {
            Self::Designers => "collaborations",
            Self::Games => "similarities",
        }
    }

    fn via(self) -> &'static str {
        match self {
            Self::Designers => "via",
            Self::Games => "sharing",
        }
    }
}

const RULE: &str = "--------------------------------------------------";

/// Pretty-printed JSON of the whole report.
pub fn render_json<W: Write>(report: &AnalysisReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Human-readable tables.
pub fn render_text<W: Write>(report: &AnalysisReport, subject: Subject, out: &mut W) -> io::Result<()> {
    let s = &report.summary;
    section(out, "Statistics")?;
    writeln!(out, "Nodes ({}):{:>24}", subject.nodes(), s.nodes)?;
    writeln!(out, "Edges ({}):{:>19}", subject.edges(), s.edges)?;
    writeln!(out, "Average degree:{:>28.2}", s.average_degree)?;
    writeln!(out, "Density:{:>35.4}", s.density)?;
    writeln!(out, "Connected components:{:>22}", s.component_count)?;

    let r = &report.rankings;
    // collaboration weights are counts, similarity weights are not
    let weighted = subject == Subject::Games;
    table(out, &format!("Top {} by degree", r.degree.len()), &r.degree, false)?;
    table(out, &format!("Top {} by strength", r.strength.len()), &r.strength, weighted)?;
    table(
        out,
        &format!("Top {} by degree centrality", r.degree_centrality.len()),
        &r.degree_centrality,
        true,
    )?;
    table(out, &format!("Top {} by betweenness", r.betweenness.len()), &r.betweenness, true)?;
    table(out, &format!("Top {} by closeness", r.closeness.len()), &r.closeness, true)?;
    table(out, &format!("Top {} by PageRank", r.pagerank.len()), &r.pagerank, true)?;
    if !report.pagerank_converged {
        writeln!(out, "(PageRank stopped after {} iterations without converging)", report.pagerank_iterations)?;
    }

    section(out, "Main connected component")?;
    match &report.component {
        Some(c) => {
            writeln!(out, "Nodes in largest component:{:>16}", c.size)?;
            writeln!(out, "Average path length:{:>23.2}", c.average_path_length)?;
            writeln!(out, "Diameter:{:>34}", c.diameter)?;
        }
        None => writeln!(out, "Graph has no edges; no component to measure.")?,
    }

    if let (Some(first), Some(last)) = (report.diameter_steps.first(), report.diameter_steps.last()) {
        section(out, "Diameter path")?;
        writeln!(out, "From:   {}", first.name)?;
        writeln!(out, "To:     {}", last.name)?;
        writeln!(out, "Length: {}", report.diameter_steps.len() - 1)?;
        writeln!(out, "Path:")?;
        for step in &report.diameter_steps {
            match &step.via {
                Some(items) if !items.is_empty() => {
                    writeln!(out, " → {}  ({} {})", step.name, subject.via(), items.join(", "))?
                }
                _ => writeln!(out, " → {}", step.name)?,
            }
        }
    }

    section(out, &format!("Bridges ({} total)", report.bridge_count))?;
    for b in &report.bridges {
        writeln!(out, "{:<30} <-> {:<30} {:.2}", b.a, b.b, b.weight)?;
    }
    table(
        out,
        &format!("Top {} by incident bridges", r.bridge_incidence.len()),
        &r.bridge_incidence,
        false,
    )?;

    let c = &report.communities;
    section(
        out,
        &format!("Communities ({} found, modularity {:.4})", c.count, c.modularity),
    )?;
    for entry in &c.top {
        writeln!(out, "{:2}. {} members: {}", entry.rank, entry.size, entry.sample.join(", "))?;
    }
    Ok(())
}

/// A designer-to-designer chain, or a note that none exists.
pub fn render_connection<W: Write>(steps: Option<&[PathStep]>, from: &str, to: &str, out: &mut W) -> io::Result<()> {
    section(out, &format!("Connection {from} → {to}"))?;
    let Some(steps) = steps else {
        return writeln!(out, "No collaboration chain connects them.");
    };
    writeln!(out, "Length: {}", steps.len().saturating_sub(1))?;
    for step in steps {
        match &step.via {
            Some(items) if !items.is_empty() => writeln!(out, " → {}  (via {})", step.name, items.join(", "))?,
            _ => writeln!(out, " → {}", step.name)?,
        }
    }
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}:")?;
    writeln!(out, "{RULE}")
}

fn table<W: Write>(out: &mut W, title: &str, rows: &[RankedEntity], fractional: bool) -> io::Result<()> {
    section(out, title)?;
    for row in rows {
        if fractional {
            writeln!(out, "{:2}. {:<40} {:.4}", row.rank, row.name, row.value)?;
        } else {
            writeln!(out, "{:2}. {:<40} {}", row.rank, row.name, row.value)?;
        }
    }
    Ok(())
}
