// src/services/readme.rs

//! README material-table parser.
//!
//! The upstream README lists filaments in markdown tables grouped under
//! `####` section headers. Only two line shapes matter: a header sets the
//! material name carried by every following row until the next header, and a
//! table row contributes one entry. Every other line is ignored.

use std::collections::HashMap;

use regex::Regex;

/// One matched table row, tagged with the section it appeared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeRow {
    /// Material name from the nearest preceding header; empty for rows
    /// appearing before any header
    pub material: String,

    /// Color name (first cell)
    pub color: String,

    /// 5-digit filament code (second cell)
    pub filament_code: String,

    /// Variant identifier (third cell)
    pub variant_id: String,
}

/// Accumulator threaded through the line fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Material name from the last seen section header
    pub current_material: String,
}

/// Line-pattern matcher for the README's material tables.
pub struct ReadmeParser {
    header: Regex,
    row: Regex,
}

impl ReadmeParser {
    /// `#### <name>` section header; the captured name is trimmed.
    const HEADER_PATTERN: &'static str = r"^####\s+(.*)";

    /// Pipe-delimited row whose second cell is exactly 5 digits and whose
    /// third cell is a variant token; the first cell is the color name.
    /// Cells beyond the third are ignored.
    const ROW_PATTERN: &'static str = r"^\|\s*(.*?)\s*\|\s*([0-9]{5})\s*\|\s*([A-Z0-9/-]+)\s*\|";

    pub fn new() -> Self {
        Self {
            header: Regex::new(Self::HEADER_PATTERN).expect("header pattern is valid"),
            row: Regex::new(Self::ROW_PATTERN).expect("row pattern is valid"),
        }
    }

    /// Advance the parse by one line.
    ///
    /// Returns the next state and the row emitted for this line, if any.
    /// Lines matching neither pattern pass the state through untouched.
    pub fn step(&self, state: ParseState, line: &str) -> (ParseState, Option<ReadmeRow>) {
        if let Some(caps) = self.header.captures(line) {
            let state = ParseState {
                current_material: caps[1].trim().to_string(),
            };
            return (state, None);
        }

        if let Some(caps) = self.row.captures(line) {
            let row = ReadmeRow {
                material: state.current_material.clone(),
                color: caps[1].to_string(),
                filament_code: caps[2].to_string(),
                variant_id: caps[3].to_string(),
            };
            return (state, Some(row));
        }

        (state, None)
    }

    /// Parse a whole document into its table rows, in document order.
    pub fn parse(&self, text: &str) -> Vec<ReadmeRow> {
        let (_, rows) = text.lines().fold(
            (ParseState::default(), Vec::new()),
            |(state, mut rows), line| {
                let (state, row) = self.step(state, line);
                rows.extend(row);
                (state, rows)
            },
        );
        rows
    }
}

impl Default for ReadmeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Index rows by filament code; a later row for the same code wins.
pub fn index_by_code(rows: &[ReadmeRow]) -> HashMap<String, ReadmeRow> {
    rows.iter()
        .map(|row| (row.filament_code.clone(), row.clone()))
        .collect()
}
