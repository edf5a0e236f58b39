//! Weighted power means with exact limiting behaviour.
//!
//! The power mean of order `t` over values `v` with normalized weights `w` is
//! `(sum_i w_i * v_i^t)^(1/t)`. Three orders need special handling and get
//! exact branches instead of the raw formula: `t = 0` is the weighted
//! geometric mean, `t = +inf` the maximum and `t = -inf` the minimum of the
//! values with non-negligible weight. Every diversity measure in this crate
//! bottoms out here, so the zero-weight filtering below is what makes absent
//! species harmless at negative orders.

use crate::error::{DivpartError, Result};

/// Normalized weights at or below this are treated as zero and their values
/// dropped from the mean. Keeps `0^t` for negative `t` out of the sums.
pub(crate) const ZERO_WEIGHT_TOL: f64 = 1e-12;

/// Orders closer to zero than this take the geometric-mean branch.
pub(crate) const ZERO_ORDER_TOL: f64 = 1e-9;

/// Weighted power mean of `values` at the given `order`.
///
/// Weights are renormalized to sum to 1, so any non-negative scaling of
/// `weights` gives the same result. Entries whose normalized weight is
/// negligible are ignored entirely; with order `+inf`/`-inf` the result is
/// the max/min over the remaining values, and orders within tolerance of
/// zero use the weighted geometric mean. Values are assumed non-negative.
///
/// # Errors
///
/// `LengthMismatch` if `values` and `weights` differ in length;
/// `DegenerateWeights` if the weights sum to zero or every entry is dropped
/// by the zero-weight cutoff.
///
/// # Example
///
/// ```
/// use divpart::power_mean;
///
/// let v = [1.0, 2.0, 4.0];
/// let w = [1.0, 1.0, 1.0];
/// // Order 1 is the arithmetic mean.
/// let m = power_mean(&v, 1.0, &w).unwrap();
/// assert!((m - 7.0 / 3.0).abs() < 1e-12);
/// // Order -inf picks the smallest value.
/// let lo = power_mean(&v, f64::NEG_INFINITY, &w).unwrap();
/// assert_eq!(lo, 1.0);
/// ```
pub fn power_mean(values: &[f64], order: f64, weights: &[f64]) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(DivpartError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return Err(DivpartError::DegenerateWeights);
    }

    // Survivors: (value, normalized weight) with non-negligible weight.
    let pairs: Vec<(f64, f64)> = values
        .iter()
        .zip(weights.iter())
        .map(|(&v, &w)| (v, w / total))
        .filter(|&(_, w)| w > ZERO_WEIGHT_TOL)
        .collect();
    if pairs.is_empty() {
        return Err(DivpartError::DegenerateWeights);
    }

    if order == f64::INFINITY {
        let mut max = f64::NEG_INFINITY;
        for &(v, _) in &pairs {
            if v > max {
                max = v;
            }
        }
        Ok(max)
    } else if order == f64::NEG_INFINITY {
        let mut min = f64::INFINITY;
        for &(v, _) in &pairs {
            if v < min {
                min = v;
            }
        }
        Ok(min)
    } else if order.abs() < ZERO_ORDER_TOL {
        Ok(pairs.iter().map(|&(v, w)| v.powf(w)).product())
    } else {
        let sum: f64 = pairs.iter().map(|&(v, w)| w * v.powf(order)).sum();
        Ok(sum.powf(1.0 / order))
    }
}

/// [`power_mean`] evaluated independently at each order in `orders`.
///
/// # Errors
///
/// Same conditions as [`power_mean`]; the length and weight checks fail on
/// the first order.
pub fn power_mean_many(values: &[f64], orders: &[f64], weights: &[f64]) -> Result<Vec<f64>> {
    orders
        .iter()
        .map(|&t| power_mean(values, t, weights))
        .collect()
}

/// Equal weights for `n` entries. `power_mean` renormalizes, so `1.0` per
/// entry is as good as `1.0 / n`.
pub fn uniform_weights(n: usize) -> Vec<f64> {
    vec![1.0; n]
}
