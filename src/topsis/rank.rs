//! Ranking by closeness score.

use std::cmp::Ordering;

/// Rank 1 = highest score. Equal scores get distinct consecutive ranks in
/// original row order, so the result is always a permutation of `1..=n`.
pub fn dense_ranks(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // `sort_by` is stable: equal scores keep ascending index order.
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; scores.len()];
    for (pos, &i) in order.iter().enumerate() {
        ranks[i] = pos + 1;
    }
    ranks
}
