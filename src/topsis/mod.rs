//! # TOPSIS engine
//! Pure, synchronous ranking of alternatives by closeness to an ideal point.
//! No I/O and no shared state: every call is a function of its inputs, so
//! callers may run it concurrently on separate tables.
//!
//! Pipeline: validate → normalize → weight → ideal points → separation →
//! closeness → rank. Any failure aborts the batch; there are no partial results.

pub mod error;
pub mod ideal;
pub mod normalize;
pub mod rank;
pub mod score;
pub mod validate;

use tracing::debug;

use crate::table::{DecisionTable, RankedRow, RankedTable};
pub use error::{ErrorKind, Result, TopsisError};
pub use validate::{Impact, ValidatedInput};

/// Row-major numeric matrix, `alternatives x criteria`.
pub type Matrix = Vec<Vec<f64>>;

/// Validate and rank `table`. Output rows keep input order.
pub fn evaluate(table: &DecisionTable, weights: &str, impacts: &str) -> Result<RankedTable> {
    let input = validate::validate(table, weights, impacts)?;
    let scores = closeness_scores(&input)?;
    let ranks = rank::dense_ranks(&scores);

    debug!(
        alternatives = input.alternatives.len(),
        criteria = input.criteria_count(),
        "topsis evaluated"
    );

    let rows = table
        .rows()
        .iter()
        .zip(scores.into_iter().zip(ranks))
        .map(|(cells, (score, rank))| RankedRow {
            cells: cells.clone(),
            score,
            rank,
        })
        .collect();

    Ok(RankedTable {
        headers: table.headers().to_vec(),
        rows,
    })
}

/// Parse CSV bytes and rank them in one step.
pub fn evaluate_csv(csv: &[u8], weights: &str, impacts: &str) -> Result<RankedTable> {
    let table = DecisionTable::from_csv_bytes(csv)?;
    evaluate(&table, weights, impacts)
}

/// Unrounded closeness coefficient per alternative, in row order.
pub fn closeness_scores(input: &ValidatedInput) -> Result<Vec<f64>> {
    let normalized = normalize::vector_normalize(&input.matrix, &input.criteria)?;
    let weighted = normalize::apply_weights(&normalized, &input.weights);
    let ideal = ideal::ideal_points(&weighted, &input.impacts);
    let sep = score::separation(&weighted, &ideal);
    score::closeness(&sep, &input.alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Model,Price,Storage,Camera\nA1,7,9,6\nA2,8,7,7\nA3,9,6,3\n";

    #[test]
    fn golden_three_alternatives() {
        let out = evaluate_csv(SAMPLE.as_bytes(), "1,1,1", "+,+,-").unwrap();
        let expected = [
            ("A1", 0.427_445_765_103_867_2, 2),
            ("A2", 0.191_419_996_562_498_2, 3),
            ("A3", 0.652_307_797_831_587_7, 1),
        ];
        for (row, (id, score, rank)) in out.rows.iter().zip(expected) {
            assert_eq!(row.alternative(), id);
            assert!((row.score - score).abs() < 1e-12, "{id}: {}", row.score);
            assert_eq!(row.rank, rank);
        }
        let rounded: Vec<f64> = out.rows.iter().map(RankedRow::rounded_score).collect();
        assert_eq!(rounded, vec![0.43, 0.19, 0.65]);
    }

    #[test]
    fn single_alternative_is_degenerate() {
        let err = evaluate_csv(b"Id,a,b\nonly,1,2\n", "1,1", "+,+").unwrap_err();
        assert_eq!(
            err,
            TopsisError::DegenerateAlternative {
                alternative: "only".into()
            }
        );
    }

    #[test]
    fn validation_runs_before_numeric_work() {
        // Zero column would be a data error, but the weight count fails first.
        let err = evaluate_csv(b"Id,a,b\nx,0,1\ny,0,2\n", "1", "+,+").unwrap_err();
        assert!(matches!(err, TopsisError::WeightCountMismatch { .. }));
    }

    #[test]
    fn identical_rows_tie_in_row_order() {
        let out = evaluate_csv(b"Id,a,b\np,1,1\nq,2,2\nr,1,1\n", "1,1", "+,+").unwrap();
        let ranks: Vec<usize> = out.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![2, 1, 3]);
    }
}
