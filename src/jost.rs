//! Jost's multiplicative alpha/beta decomposition.
//!
//! Jost (2007) splits the diversity of a pooled system into a within-
//! subcommunity component (alpha) and a between-subcommunity component
//! (beta) with `gamma = alpha * beta`. For subcommunities of unequal size
//! the alpha component is a power mean of the per-subcommunity diversities
//! taken with weights `w_j^q` rather than `w_j`; with equal sizes this
//! collapses to the plain weighted-mean alpha of the partition layer. The
//! decomposition is similarity-blind and works on the naive measures.

use crate::error::Result;
use crate::hill::leinster_cobbold_profile;
use crate::partition::{measure_grid, Measure, Normalized};
use crate::powermean::power_mean;
use crate::similarity::Similarity;

/// `w_j^q`, with the weights divided through by the largest (`q >= 0`) or
/// smallest (`q < 0`) weight first. The division changes nothing at finite
/// orders once the power mean renormalizes, and at infinite orders it keeps
/// the powers representable: the extreme-weight subcommunities map to 1 and
/// the rest to 0 instead of everything flushing to 0 or infinity.
fn order_weights(weights: &[f64], q: f64) -> Vec<f64> {
    let reference = if q >= 0.0 {
        weights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    } else {
        weights.iter().copied().fold(f64::INFINITY, f64::min)
    };
    weights.iter().map(|&w| (w / reference).powf(q)).collect()
}

fn alpha_from(norm: &Normalized, qs: &[f64]) -> Result<Vec<f64>> {
    let sim = Similarity::Distinct;
    let grid = measure_grid(norm, &sim, qs, Measure::AlphaBar)?;
    let n_subcommunities = norm.weights.len();
    qs.iter()
        .enumerate()
        .map(|(qi, &q)| {
            let alphas = &grid[qi * n_subcommunities..(qi + 1) * n_subcommunities];
            power_mean(alphas, 1.0 - q, &order_weights(&norm.weights, q))
        })
        .collect()
}

/// Jost's within-subcommunity (alpha) diversity at each order.
///
/// Accepts raw counts; the matrix is normalized by its grand total and the
/// subcommunity weights are its column sums. When every subcommunity
/// carries the same weight, or all compositions are identical, this equals
/// the supercommunity normalized alpha exactly.
///
/// # Errors
///
/// Shape errors as in the partition measures.
///
/// # Example
///
/// ```
/// use divpart::jost_alpha;
///
/// // Two subcommunities of two even species each.
/// let pm = [
///     1.0, 0.0, //
///     1.0, 0.0, //
///     0.0, 1.0, //
///     0.0, 1.0,
/// ];
/// let alpha = jost_alpha(&pm, 4, 2, &[0.0, 1.0, 2.0]).unwrap();
/// for a in alpha {
///     assert!((a - 2.0).abs() < 1e-10);
/// }
/// ```
pub fn jost_alpha(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
) -> Result<Vec<f64>> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    alpha_from(&norm, qs)
}

/// Jost's between-subcommunity (beta, turnover) diversity at each order:
/// the pooled gamma diversity divided by [`jost_alpha`].
///
/// Ranges from 1 (every subcommunity has the same composition, no
/// turnover) up to the number of subcommunities (disjoint compositions of
/// equal weight).
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn jost_beta(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
) -> Result<Vec<f64>> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    let alpha = alpha_from(&norm, qs)?;
    let gamma = leinster_cobbold_profile(&norm.pooled, qs, &Similarity::Distinct)?;
    Ok(gamma
        .iter()
        .zip(alpha.iter())
        .map(|(&g, &a)| g / a)
        .collect())
}
