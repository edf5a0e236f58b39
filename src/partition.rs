//! Alpha/beta/gamma partitioning of similarity-sensitive diversity.
//!
//! A supercommunity is an abundance matrix: rows are species, columns are
//! subcommunities. The matrix is normalized by its grand total internally,
//! so raw counts are fine. From the normalized matrix come the subcommunity
//! weights `w_j` (column sums), the per-subcommunity distributions `pbar_j`
//! (columns rescaled to sum to 1) and the pooled distribution `p` (row
//! sums), and from those the measure family:
//!
//! - `alpha_bar` / `alpha`: diversity of a subcommunity in isolation
//!   (normalized), or weighted by its share of the whole (raw).
//! - `rho_bar` / `rho`: how representative of the pooled supercommunity a
//!   subcommunity is (redundancy in the raw form).
//! - `beta_bar` / `beta`: the reciprocals, effective number of distinct
//!   subcommunities (distinctiveness in the raw form).
//! - `gamma`: a subcommunity's per-individual contribution to the diversity
//!   of the pooled supercommunity.
//!
//! Each raw measure equals its normalized form divided by `w_j`.
//! Subcommunity values are collapsed to one supercommunity value per order
//! by a power mean at order `1 - q` with weights `w`; the supercommunity
//! gamma so obtained is exactly the Leinster-Cobbold diversity of the
//! pooled distribution.

use crate::abundance::{column_sums, validate_matrix};
use crate::error::{DivpartError, Result};
use crate::hill::leinster_cobbold_profile;
use crate::powermean::power_mean;
use crate::similarity::Similarity;

/// Grand-total normalized view of an abundance matrix.
pub(crate) struct Normalized {
    /// Subcommunity weights `w_j`, summing to 1.
    pub(crate) weights: Vec<f64>,
    /// Per-subcommunity distributions `pbar_j`, each summing to 1.
    pub(crate) columns: Vec<Vec<f64>>,
    /// Pooled distribution over species, summing to 1.
    pub(crate) pooled: Vec<f64>,
}

impl Normalized {
    pub(crate) fn new(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Self> {
        validate_matrix(pm, n_species, n_subcommunities)?;
        let total: f64 = pm.iter().sum();
        if !(total > 0.0) {
            return Err(DivpartError::InvalidInput(
                "partition: abundance matrix total must be positive".into(),
            ));
        }
        let sums = column_sums(pm, n_species, n_subcommunities);
        for (j, &s) in sums.iter().enumerate() {
            if !(s > 0.0) {
                return Err(DivpartError::InvalidInput(format!(
                    "partition: subcommunity {j} has zero total abundance",
                )));
            }
        }
        let weights: Vec<f64> = sums.iter().map(|&s| s / total).collect();
        let columns: Vec<Vec<f64>> = (0..n_subcommunities)
            .map(|j| {
                (0..n_species)
                    .map(|i| pm[i * n_subcommunities + j] / sums[j])
                    .collect()
            })
            .collect();
        let pooled: Vec<f64> = (0..n_species)
            .map(|i| {
                pm[i * n_subcommunities..(i + 1) * n_subcommunities]
                    .iter()
                    .sum::<f64>()
                    / total
            })
            .collect();
        Ok(Normalized {
            weights,
            columns,
            pooled,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Measure {
    AlphaBar,
    Alpha,
    RhoBar,
    Rho,
    BetaBar,
    Beta,
    Gamma,
}

impl Measure {
    /// Rho-family measures run the power mean at order `1 - q`; the rest at
    /// `q - 1`.
    fn flips_order(self) -> bool {
        matches!(
            self,
            Measure::RhoBar | Measure::Rho | Measure::BetaBar | Measure::Beta
        )
    }

    /// All but the rho forms report the reciprocal of the power mean.
    fn inverts(self) -> bool {
        !matches!(self, Measure::RhoBar | Measure::Rho)
    }
}

/// Subcommunity values of one measure over a grid of orders, row-major
/// `qs.len() x n_subcommunities`. The similarity must already be validated
/// against the species count.
pub(crate) fn measure_grid(
    norm: &Normalized,
    sim: &Similarity,
    qs: &[f64],
    measure: Measure,
) -> Result<Vec<f64>> {
    let n_subcommunities = norm.weights.len();
    let zpooled = sim.weighted_abundance(&norm.pooled)?;
    let mut out = vec![0.0; qs.len() * n_subcommunities];
    for j in 0..n_subcommunities {
        let pbar = &norm.columns[j];
        let zbar = sim.weighted_abundance(pbar)?;
        let w = norm.weights[j];
        // Entries with pbar_i = 0 carry no weight in the mean, so the ratio
        // guard only has to keep NaN out of the vector, not be meaningful.
        let base: Vec<f64> = match measure {
            Measure::AlphaBar => zbar.clone(),
            Measure::Alpha => zbar.iter().map(|&z| w * z).collect(),
            Measure::RhoBar | Measure::BetaBar => zpooled
                .iter()
                .zip(zbar.iter())
                .map(|(&zp, &zb)| if zb > 0.0 { zp / zb } else { 0.0 })
                .collect(),
            Measure::Rho | Measure::Beta => zpooled
                .iter()
                .zip(zbar.iter())
                .map(|(&zp, &zb)| if zb > 0.0 { zp / (w * zb) } else { 0.0 })
                .collect(),
            Measure::Gamma => zpooled.clone(),
        };
        for (qi, &q) in qs.iter().enumerate() {
            let order = if measure.flips_order() { 1.0 - q } else { q - 1.0 };
            let m = power_mean(&base, order, pbar)?;
            out[qi * n_subcommunities + j] = if measure.inverts() { 1.0 / m } else { m };
        }
    }
    Ok(out)
}

/// Collapse a subcommunity grid to one supercommunity value per order: the
/// power mean of each row at order `1 - q` with the subcommunity weights.
pub(crate) fn collapse_grid(grid: &[f64], weights: &[f64], qs: &[f64]) -> Result<Vec<f64>> {
    let n_subcommunities = weights.len();
    qs.iter()
        .enumerate()
        .map(|(qi, &q)| {
            power_mean(
                &grid[qi * n_subcommunities..(qi + 1) * n_subcommunities],
                1.0 - q,
                weights,
            )
        })
        .collect()
}

fn subcommunity_measure(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
    measure: Measure,
) -> Result<Vec<f64>> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    sim.validate(n_species)?;
    measure_grid(&norm, sim, qs, measure)
}

fn supercommunity_measure(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
    measure: Measure,
) -> Result<Vec<f64>> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    sim.validate(n_species)?;
    let grid = measure_grid(&norm, sim, qs, measure)?;
    collapse_grid(&grid, &norm.weights, qs)
}

// ── Subcommunity measures ───────────────────────────────────────────────────
//
// All return row-major `qs.len() x n_subcommunities`; entry
// `[qi * n_subcommunities + j]` belongs to subcommunity j at order qs[qi].
// All accept raw counts and normalize internally, and all share the same
// error conditions: bad matrix shape, a similarity matrix that is not
// `n_species x n_species`, an all-zero subcommunity, a non-positive total.

/// Normalized alpha: the diversity of each subcommunity viewed in
/// isolation.
///
/// # Errors
///
/// `InvalidInput` for a bad matrix shape, a non-positive grand total or an
/// all-zero subcommunity column; `DimensionMismatch` for a similarity
/// matrix that is not `n_species x n_species`. Every measure in this
/// module shares these conditions.
///
/// # Example
///
/// ```
/// use divpart::{subcommunity_alpha_bar, Similarity};
///
/// // Two disjoint subcommunities of two species each, even abundances.
/// let pm = [
///     1.0, 0.0, //
///     1.0, 0.0, //
///     0.0, 1.0, //
///     0.0, 1.0,
/// ];
/// let d = subcommunity_alpha_bar(&pm, 4, 2, &[0.0], &Similarity::Distinct).unwrap();
/// assert!((d[0] - 2.0).abs() < 1e-10);
/// assert!((d[1] - 2.0).abs() < 1e-10);
/// ```
pub fn subcommunity_alpha_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::AlphaBar)
}

/// Raw alpha: [`subcommunity_alpha_bar`] divided by the subcommunity
/// weight. The naive-community reading of a subcommunity's diversity.
pub fn subcommunity_alpha(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Alpha)
}

/// Normalized rho: how representative each subcommunity is of the pooled
/// supercommunity. 1 means the subcommunity mirrors the whole; values
/// below 1 mean it holds species the rest of the system lacks.
pub fn subcommunity_rho_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::RhoBar)
}

/// Raw rho (redundancy): [`subcommunity_rho_bar`] divided by the
/// subcommunity weight. Above 1, the subcommunity could vanish with little
/// loss; at exactly 1 it is irreplaceable.
pub fn subcommunity_rho(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Rho)
}

/// Normalized beta, the reciprocal of [`subcommunity_rho_bar`]: the
/// effective number of distinct subcommunities as seen from this one.
pub fn subcommunity_beta_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::BetaBar)
}

/// Raw beta (distinctiveness), the reciprocal of [`subcommunity_rho`].
pub fn subcommunity_beta(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Beta)
}

/// Gamma: each subcommunity's per-individual contribution to the diversity
/// of the pooled supercommunity.
pub fn subcommunity_gamma(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Gamma)
}

// ── Supercommunity measures ─────────────────────────────────────────────────
//
// One value per order: the subcommunity values collapsed by a power mean at
// order `1 - q` with the subcommunity weights. Error conditions as above.

/// Supercommunity normalized alpha: average within-subcommunity diversity.
pub fn supercommunity_alpha_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::AlphaBar)
}

/// Supercommunity raw alpha.
pub fn supercommunity_alpha(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Alpha)
}

/// Supercommunity normalized rho: average representativeness, 1 when every
/// subcommunity mirrors the whole.
pub fn supercommunity_rho_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::RhoBar)
}

/// Supercommunity raw rho (average redundancy).
pub fn supercommunity_rho(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Rho)
}

/// Supercommunity normalized beta: the effective number of distinct
/// subcommunities. Ranges from 1 (identical compositions) to the number of
/// subcommunities (disjoint ones).
pub fn supercommunity_beta_bar(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::BetaBar)
}

/// Supercommunity raw beta (average distinctiveness).
pub fn supercommunity_beta(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Beta)
}

/// Supercommunity gamma: the diversity of the pooled supercommunity.
/// Numerically identical to [`crate::leinster_cobbold_profile`] applied to
/// the pooled distribution.
pub fn supercommunity_gamma(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    supercommunity_measure(pm, n_species, n_subcommunities, qs, sim, Measure::Gamma)
}

// ── Aggregate ───────────────────────────────────────────────────────────────

/// All seven supercommunity measures at one order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiversityPartition {
    /// The order the measures were evaluated at.
    pub q: f64,
    pub alpha_bar: f64,
    pub alpha: f64,
    pub rho_bar: f64,
    pub rho: f64,
    pub beta_bar: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Evaluate every supercommunity measure at one order, normalizing the
/// matrix once.
///
/// # Errors
///
/// Same conditions as the individual measures.
///
/// # Example
///
/// ```
/// use divpart::{partition_diversity, Similarity};
///
/// let pm = [
///     1.0, 0.0, //
///     1.0, 0.0, //
///     0.0, 1.0, //
///     0.0, 1.0,
/// ];
/// let part = partition_diversity(&pm, 4, 2, 1.0, &Similarity::Distinct).unwrap();
/// assert!((part.alpha_bar - 2.0).abs() < 1e-10);
/// assert!((part.beta_bar - 2.0).abs() < 1e-10);
/// assert!((part.gamma - 4.0).abs() < 1e-10);
/// ```
pub fn partition_diversity(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    q: f64,
    sim: &Similarity,
) -> Result<DiversityPartition> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    sim.validate(n_species)?;
    let qs = [q];
    let one = |measure: Measure| -> Result<f64> {
        let grid = measure_grid(&norm, sim, &qs, measure)?;
        Ok(collapse_grid(&grid, &norm.weights, &qs)?[0])
    };
    Ok(DiversityPartition {
        q,
        alpha_bar: one(Measure::AlphaBar)?,
        alpha: one(Measure::Alpha)?,
        rho_bar: one(Measure::RhoBar)?,
        rho: one(Measure::Rho)?,
        beta_bar: one(Measure::BetaBar)?,
        beta: one(Measure::Beta)?,
        gamma: one(Measure::Gamma)?,
    })
}

/// Convenience check used by tests and callers comparing against the pooled
/// distribution directly.
#[allow(dead_code)]
pub(crate) fn pooled_diversity(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    let norm = Normalized::new(pm, n_species, n_subcommunities)?;
    leinster_cobbold_profile(&norm.pooled, qs, sim)
}
