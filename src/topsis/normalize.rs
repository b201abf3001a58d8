//! Vector normalization and weighting.

use super::error::{Result, TopsisError};
use super::Matrix;

/// Column `j`'s Euclidean norm as `(peak, rest)` with `norm = peak * rest`.
///
/// `peak` is the largest magnitude in the column and `rest` lies in
/// `[1, sqrt(rows)]`, so neither factor overflows or underflows when the
/// norm itself would.
fn column_scale(matrix: &Matrix, j: usize) -> (f64, f64) {
    let peak = matrix.iter().map(|row| row[j].abs()).fold(0.0, f64::max);
    if peak == 0.0 {
        return (0.0, 0.0);
    }
    let rest = matrix
        .iter()
        .map(|row| row[j] / peak)
        .fold(0.0, f64::hypot);
    (peak, rest)
}

/// Divide every column by its Euclidean norm.
///
/// A column of all zeros has no direction to normalize along and is
/// rejected instead of producing NaN. `criteria` names the columns for the
/// error message.
pub fn vector_normalize(matrix: &Matrix, criteria: &[String]) -> Result<Matrix> {
    let width = criteria.len();
    let scales = (0..width)
        .map(|j| match column_scale(matrix, j) {
            (peak, _) if peak == 0.0 => Err(TopsisError::ZeroNormColumn {
                column: criteria[j].clone(),
            }),
            scale => Ok(scale),
        })
        .collect::<Result<Vec<(f64, f64)>>>()?;

    Ok(matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(&scales)
                .map(|(v, (peak, rest))| v / peak / rest)
                .collect()
        })
        .collect())
}

/// Scale column `j` by `weights[j]`. Weights are used as given.
pub fn apply_weights(normalized: &Matrix, weights: &[f64]) -> Matrix {
    normalized
        .iter()
        .map(|row| row.iter().zip(weights).map(|(v, w)| v * w).collect())
        .collect()
}
