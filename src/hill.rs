//! Hill numbers and their similarity-sensitive extension.
//!
//! The Hill number of order `q` is the effective number of species in a
//! distribution: `1 / power_mean(p, q - 1, p)`. Low orders weight rare
//! species heavily (q = 0 counts presence), high orders weight dominant
//! ones (q = inf sees only the most abundant). The Leinster-Cobbold form
//! replaces each species' proportion with its ordinariness `Z * p` so that
//! similar species no longer count as fully separate.
//!
//! Proportions are taken as given and never renormalized here. A vector
//! scaled by `c` yields `1/c` times the diversity of the unit-sum vector,
//! which is exactly what the partitioning layer relies on for its raw
//! (weight-scaled) measures.

use crate::abundance::{column, validate_matrix};
use crate::error::Result;
use crate::powermean::power_mean;
use crate::similarity::Similarity;

/// Hill number (effective species count) of order `q`.
///
/// `q` may be any float including `f64::INFINITY` and `f64::NEG_INFINITY`;
/// `q = 1` is the exponential of Shannon entropy, supplied by the power
/// mean's geometric branch. Species with zero proportion are ignored.
///
/// # Errors
///
/// `DegenerateWeights` if `p` is empty or sums to zero.
///
/// # Example
///
/// ```
/// use divpart::hill_number;
///
/// let even = [0.25, 0.25, 0.25, 0.25];
/// for q in [0.0, 1.0, 2.0, f64::INFINITY] {
///     let d = hill_number(&even, q).unwrap();
///     assert!((d - 4.0).abs() < 1e-10);
/// }
/// ```
pub fn hill_number(p: &[f64], q: f64) -> Result<f64> {
    leinster_cobbold(p, q, &Similarity::Distinct)
}

/// [`hill_number`] at each order in `qs`.
///
/// # Errors
///
/// Same conditions as [`hill_number`].
pub fn hill_profile(p: &[f64], qs: &[f64]) -> Result<Vec<f64>> {
    leinster_cobbold_profile(p, qs, &Similarity::Distinct)
}

/// [`hill_number`] of each subcommunity (column) of a row-major abundance
/// matrix, at each order.
///
/// Output is row-major `qs.len() x n_subcommunities`: entry
/// `[qi * n_subcommunities + j]` is the diversity of subcommunity `j` at
/// order `qs[qi]`. Columns are treated independently with whatever scaling
/// the caller gave them.
///
/// # Errors
///
/// `InvalidInput` for a bad matrix shape; `DegenerateWeights` for an
/// all-zero column.
pub fn hill_profile_matrix(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
) -> Result<Vec<f64>> {
    leinster_cobbold_profile_matrix(pm, n_species, n_subcommunities, qs, &Similarity::Distinct)
}

/// Similarity-sensitive diversity of order `q` (Leinster-Cobbold qDZ):
/// `1 / power_mean(Z * p, q - 1, p)`.
///
/// With [`Similarity::Distinct`] (or an explicit identity matrix) this is
/// exactly [`hill_number`]. A similarity matrix of all 1s collapses every
/// distribution to diversity 1.
///
/// # Errors
///
/// `DimensionMismatch` if the similarity matrix is not S x S for
/// `S = p.len()`; `DegenerateWeights` if `p` is empty or sums to zero.
pub fn leinster_cobbold(p: &[f64], q: f64, sim: &Similarity) -> Result<f64> {
    let zp = sim.weighted_abundance(p)?;
    Ok(1.0 / power_mean(&zp, q - 1.0, p)?)
}

/// [`leinster_cobbold`] at each order in `qs`. The ordinariness vector
/// `Z * p` is computed once and reused across orders.
///
/// # Errors
///
/// Same conditions as [`leinster_cobbold`].
pub fn leinster_cobbold_profile(p: &[f64], qs: &[f64], sim: &Similarity) -> Result<Vec<f64>> {
    let zp = sim.weighted_abundance(p)?;
    qs.iter()
        .map(|&q| Ok(1.0 / power_mean(&zp, q - 1.0, p)?))
        .collect()
}

/// [`leinster_cobbold`] of each subcommunity (column) of a row-major
/// abundance matrix, at each order. Output layout as in
/// [`hill_profile_matrix`].
///
/// # Errors
///
/// Shape errors as in [`hill_profile_matrix`], plus `DimensionMismatch`
/// for a similarity matrix that is not `n_species x n_species`.
pub fn leinster_cobbold_profile_matrix(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    validate_matrix(pm, n_species, n_subcommunities)?;
    sim.validate(n_species)?;
    let mut out = vec![0.0; qs.len() * n_subcommunities];
    for j in 0..n_subcommunities {
        let p = column(pm, n_species, n_subcommunities, j);
        let zp = sim.weighted_abundance(&p)?;
        for (qi, &q) in qs.iter().enumerate() {
            out[qi * n_subcommunities + j] = 1.0 / power_mean(&zp, q - 1.0, &p)?;
        }
    }
    Ok(out)
}
