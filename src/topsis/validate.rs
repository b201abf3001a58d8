//! Input validation: everything that can be rejected before numeric work.
//!
//! Checks run in a fixed order (shape, column types, weights, impacts) and
//! the first failure is the only one reported.

use std::str::FromStr;

use super::error::{Result, TopsisError};
use super::Matrix;
use crate::table::DecisionTable;

/// Identifier column + at least two criteria.
pub const MIN_COLUMNS: usize = 3;

/// Direction of preference for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// `+`: higher is better.
    Beneficial,
    /// `-`: lower is better.
    Cost,
}

impl FromStr for Impact {
    type Err = TopsisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Impact::Beneficial),
            "-" => Ok(Impact::Cost),
            other => Err(TopsisError::ImpactSymbol {
                token: other.to_string(),
            }),
        }
    }
}

/// Everything the numeric stages need, all lengths already consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    /// Row-major criterion values, `rows x criteria`.
    pub matrix: Matrix,
    pub weights: Vec<f64>,
    pub impacts: Vec<Impact>,
    /// Header names of the criterion columns.
    pub criteria: Vec<String>,
    /// First-column identifiers, one per row.
    pub alternatives: Vec<String>,
}

impl ValidatedInput {
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }
}

pub fn validate(table: &DecisionTable, weights: &str, impacts: &str) -> Result<ValidatedInput> {
    check_shape(table)?;
    let criteria_count = table.column_count() - 1;

    let matrix = parse_matrix(table)?;
    let weights = parse_weights(weights, criteria_count)?;
    let impacts = parse_impacts(impacts, criteria_count)?;

    Ok(ValidatedInput {
        matrix,
        weights,
        impacts,
        criteria: table.headers()[1..].to_vec(),
        alternatives: (0..table.row_count())
            .map(|i| table.alternative(i).to_string())
            .collect(),
    })
}

fn check_shape(table: &DecisionTable) -> Result<()> {
    if table.column_count() < MIN_COLUMNS {
        return Err(TopsisError::Structural(
            "Input file must contain three or more columns.".to_string(),
        ));
    }
    if table.row_count() == 0 {
        return Err(TopsisError::Structural(
            "Input file contains no alternatives to rank.".to_string(),
        ));
    }
    Ok(())
}

/// Column by column, so the first bad column (not the first bad row) is reported.
fn parse_matrix(table: &DecisionTable) -> Result<Matrix> {
    let rows = table.rows();
    let mut matrix = vec![Vec::with_capacity(table.column_count() - 1); rows.len()];

    for (j, column) in table.headers().iter().enumerate().skip(1) {
        for (i, row) in rows.iter().enumerate() {
            let cell = row[j].as_str();
            let value = parse_real(cell).ok_or_else(|| TopsisError::ColumnType {
                column: column.clone(),
                row: i + 1,
                value: cell.to_string(),
            })?;
            matrix[i].push(value);
        }
    }
    Ok(matrix)
}

/// Finite reals only; empty cells, `NaN` and `inf` are rejected.
fn parse_real(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Zero and negative weights are accepted as given.
pub fn parse_weights(s: &str, criteria_count: usize) -> Result<Vec<f64>> {
    let weights = s
        .split(',')
        .map(str::trim)
        .map(|tok| {
            parse_real(tok).ok_or_else(|| TopsisError::WeightFormat {
                token: tok.to_string(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if weights.len() != criteria_count {
        return Err(TopsisError::WeightCountMismatch {
            weights: weights.len(),
            criteria: criteria_count,
        });
    }
    Ok(weights)
}

pub fn parse_impacts(s: &str, criteria_count: usize) -> Result<Vec<Impact>> {
    let impacts = s
        .split(',')
        .map(|tok| tok.trim().parse::<Impact>())
        .collect::<Result<Vec<Impact>>>()?;

    if impacts.len() != criteria_count {
        return Err(TopsisError::ImpactCountMismatch {
            impacts: impacts.len(),
            criteria: criteria_count,
        });
    }
    Ok(impacts)
}
