//! Ideal best / ideal worst points.

use super::validate::Impact;
use super::Matrix;

#[derive(Debug, Clone, PartialEq)]
pub struct IdealPoints {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

/// Per criterion: beneficial takes the column max as best, cost the column min.
/// `weighted` must have at least one row.
pub fn ideal_points(weighted: &Matrix, impacts: &[Impact]) -> IdealPoints {
    let (best, worst) = impacts
        .iter()
        .enumerate()
        .map(|(j, impact)| {
            let (lo, hi) = weighted.iter().map(|row| row[j]).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), v| (lo.min(v), hi.max(v)),
            );
            match impact {
                Impact::Beneficial => (hi, lo),
                Impact::Cost => (lo, hi),
            }
        })
        .unzip();

    IdealPoints { best, worst }
}
