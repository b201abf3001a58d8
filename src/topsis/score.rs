//! Separation measures and the closeness coefficient.

use super::error::{Result, TopsisError};
use super::ideal::IdealPoints;
use super::Matrix;

/// Euclidean distance from `row` to `point`. Accumulated with `hypot` so
/// large components do not overflow through their squares.
fn distance(row: &[f64], point: &[f64]) -> f64 {
    row.iter().zip(point).map(|(v, p)| v - p).fold(0.0, f64::hypot)
}

/// Per-row distances to the ideal best (`plus`) and ideal worst (`minus`).
#[derive(Debug, Clone, PartialEq)]
pub struct Separation {
    pub plus: Vec<f64>,
    pub minus: Vec<f64>,
}

pub fn separation(weighted: &Matrix, ideal: &IdealPoints) -> Separation {
    let (plus, minus) = weighted
        .iter()
        .map(|row| (distance(row, &ideal.best), distance(row, &ideal.worst)))
        .unzip();
    Separation { plus, minus }
}

/// `minus / (plus + minus)` per row.
///
/// A row at distance zero from both ideals has no defined score, and a
/// distance that overflowed cannot be compared; either way the whole batch
/// fails, naming that row's alternative.
pub fn closeness(sep: &Separation, alternatives: &[String]) -> Result<Vec<f64>> {
    let name = |i: usize| alternatives.get(i).cloned().unwrap_or_default();
    sep.plus
        .iter()
        .zip(&sep.minus)
        .enumerate()
        .map(|(i, (&p, &m))| {
            if !(p.is_finite() && m.is_finite()) {
                return Err(TopsisError::DistanceOverflow {
                    alternative: name(i),
                });
            }
            let total = p + m;
            if total == 0.0 {
                return Err(TopsisError::DegenerateAlternative {
                    alternative: name(i),
                });
            }
            if total.is_finite() {
                Ok(m / total)
            } else {
                // Sum overflowed; the halves cannot. Only here, since halving a subnormal can flush it to zero.
                Ok((m * 0.5) / (p * 0.5 + m * 0.5))
            }
        })
        .collect()
}

/// Round to 2 decimals, ties to even (`0.125` → `0.12`, `0.375` → `0.38`).
pub fn round_score(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
