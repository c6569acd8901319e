//! Board output formats.

use archipelago_core::{Board, Harbor, Settings, Terrain};
use clap::ValueEnum;
use serde::Serialize;

/// How boards are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One JSON document with the settings and every board
    Json,
    /// A row-by-row text map per board
    Text,
}

/// JSON document written to stdout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    settings: &'a Settings,
    boards: &'a [Board],
}

/// Width of one cell in the text map
const CELL_WIDTH: usize = 6;

pub fn render(
    boards: &[Board],
    settings: &Settings,
    seed: Option<u64>,
    format: Format,
) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => serde_json::to_string_pretty(&Output {
            seed,
            settings,
            boards,
        }),
        Format::Text => Ok(boards
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Text map of one board.
///
/// Each cell shows the terrain code, the token and a harbor marker
/// (`*` for 3:1, the lowercase resource code for 2:1). A summary line
/// lists the placed harbors with their trade rates.
pub fn render_text(board: &Board) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut last_y = None;

    for tile in board.tiles() {
        if last_y != Some(tile.position.y) {
            rows.push(Vec::new());
            last_y = Some(tile.position.y);
        }
        let mut cell = tile.terrain.code().to_string();
        if let Some(token) = tile.token {
            cell.push_str(&token.to_string());
        }
        if let Some(harbor) = tile.harbor {
            cell.push(harbor_marker(harbor.harbor_type));
        }
        if let Some(row) = rows.last_mut() {
            row.push(cell);
        }
    }

    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();

    for row in &rows {
        out.push_str(&" ".repeat((widest - row.len()) * CELL_WIDTH / 2));
        for cell in row {
            out.push_str(&format!("{:<width$}", cell, width = CELL_WIDTH));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    let harbors: Vec<String> = board
        .harbor_counts()
        .iter()
        .map(|(harbor, count)| format!("{} x{}", harbor.label(), count))
        .collect();
    if !harbors.is_empty() {
        out.push_str(&format!("harbors: {}\n", harbors.join(", ")));
    }

    for warning in board.warnings() {
        out.push_str(&format!("! {}\n", warning));
    }

    out
}

fn harbor_marker(harbor: Harbor) -> char {
    match harbor {
        Harbor::Generic => '*',
        Harbor::Specific(resource) => Terrain::Resource(resource)
            .code()
            .to_ascii_lowercase(),
    }
}
