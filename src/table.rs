// src/table.rs
//! Tabular input/output for the engine.
//!
//! A `DecisionTable` is the raw text of an uploaded CSV: a header row and
//! data rows of equal width. Nothing here interprets cells as numbers; that
//! is the validator's job. A `RankedTable` is the same table with a score
//! and a rank per row, written back out with two extra columns.

use std::io::{Read, Write};

use crate::topsis::error::{Result, TopsisError};
use crate::topsis::score::round_score;

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DecisionTable {
    /// Build a table from already-split cells. Every row must be as wide as the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != headers.len())
        {
            return Err(TopsisError::Structural(format!(
                "Row {} has {} fields but the header has {}.",
                i + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Parse CSV with a mandatory header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut headers: Vec<String> = rdr
            .headers()
            .map_err(malformed)?
            .iter()
            .map(str::to_string)
            .collect();
        // Spreadsheet exports often start with a UTF-8 BOM.
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(malformed)?;
            rows.push(rec.iter().map(str::to_string).collect());
        }

        Self::new(headers, rows)
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_csv_reader(bytes)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Identifier of row `i` (first column).
    pub fn alternative(&self, i: usize) -> &str {
        self.rows
            .get(i)
            .and_then(|r| r.first())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn malformed(e: csv::Error) -> TopsisError {
    match e.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => TopsisError::Structural(format!(
            "Every row must have {expected_len} fields; found a row with {len}."
        )),
        _ => TopsisError::Structural(format!("Input is not valid CSV: {e}")),
    }
}

/// One alternative in the output, in original row order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub cells: Vec<String>,
    /// Unrounded closeness coefficient in [0, 1].
    pub score: f64,
    /// 1 = best; ranks across a table are a permutation of 1..=N.
    pub rank: usize,
}

impl RankedRow {
    pub fn alternative(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or_default()
    }

    /// Score as written to the output table (2 decimals, half-to-even).
    pub fn rounded_score(&self) -> f64 {
        round_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RankedRow>,
}

impl RankedTable {
    /// Input headers followed by the two appended columns.
    pub fn output_headers(&self) -> Vec<String> {
        let mut h = self.headers.clone();
        h.push(SCORE_COLUMN.to_string());
        h.push(RANK_COLUMN.to_string());
        h
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows sorted best first. The table itself keeps input order.
    pub fn by_rank(&self) -> Vec<&RankedRow> {
        let mut v: Vec<&RankedRow> = self.rows.iter().collect();
        v.sort_by_key(|r| r.rank);
        v
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.output_headers())?;
        for row in &self.rows {
            let mut rec = row.cells.clone();
            rec.push(format_score(row.rounded_score()));
            rec.push(row.rank.to_string());
            wtr.write_record(&rec)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> csv::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}

/// `0.43` → "0.43", `1.0` → "1.0" (always keeps a decimal point).
fn format_score(v: f64) -> String {
    format!("{v:?}")
}
