//! Abundance matrix helpers.
//!
//! All matrix functions in this crate operate on row-major `&[f64]` slices
//! with dimensions `(n_species, n_subcommunities)`: rows are species
//! (categories), columns are subcommunities, and
//! `pm[i * n_subcommunities + j]` is the abundance of species `i` in
//! subcommunity `j`. Entries are assumed non-negative; scaling is the
//! caller's business except where a function documents otherwise.

use crate::error::{DivpartError, Result};

/// Check that `pm` has exactly `n_species * n_subcommunities` entries and
/// both dimensions are at least 1.
///
/// # Errors
///
/// Returns an error naming the offending dimension.
pub fn validate_matrix(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<()> {
    if n_species == 0 || n_subcommunities == 0 {
        return Err(DivpartError::InvalidInput(
            "validate_matrix: matrix must have at least 1 species and 1 subcommunity".into(),
        ));
    }
    if pm.len() != n_species * n_subcommunities {
        return Err(DivpartError::InvalidInput(format!(
            "validate_matrix: matrix length ({}) != n_species ({}) * n_subcommunities ({})",
            pm.len(),
            n_species,
            n_subcommunities,
        )));
    }
    Ok(())
}

/// Copy of column `j` (one subcommunity's abundances over all species).
pub(crate) fn column(pm: &[f64], n_species: usize, n_subcommunities: usize, j: usize) -> Vec<f64> {
    (0..n_species)
        .map(|i| pm[i * n_subcommunities + j])
        .collect()
}

/// Per-subcommunity totals (column sums).
pub fn column_sums(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Vec<f64> {
    let mut sums = vec![0.0; n_subcommunities];
    for i in 0..n_species {
        let row = &pm[i * n_subcommunities..(i + 1) * n_subcommunities];
        for (j, &v) in row.iter().enumerate() {
            sums[j] += v;
        }
    }
    sums
}

/// Per-species totals pooled across subcommunities (row sums).
pub fn row_sums(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Vec<f64> {
    (0..n_species)
        .map(|i| {
            pm[i * n_subcommunities..(i + 1) * n_subcommunities]
                .iter()
                .sum()
        })
        .collect()
}

/// Rescale the whole matrix so its entries sum to 1.
///
/// # Errors
///
/// Returns an error if the matrix shape is invalid or the grand total is not
/// positive.
pub fn normalize_total(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    validate_matrix(pm, n_species, n_subcommunities)?;
    let total: f64 = pm.iter().sum();
    if !(total > 0.0) {
        return Err(DivpartError::InvalidInput(
            "normalize_total: matrix total must be positive".into(),
        ));
    }
    Ok(pm.iter().map(|&v| v / total).collect())
}

/// Rescale each column to sum to 1, so every subcommunity becomes a
/// relative-abundance distribution.
///
/// # Errors
///
/// Returns an error if the matrix shape is invalid or any column sums to
/// zero (an empty subcommunity has no distribution).
pub fn normalize_columns(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    validate_matrix(pm, n_species, n_subcommunities)?;
    let sums = column_sums(pm, n_species, n_subcommunities);
    for (j, &s) in sums.iter().enumerate() {
        if !(s > 0.0) {
            return Err(DivpartError::InvalidInput(format!(
                "normalize_columns: subcommunity {j} has zero total abundance",
            )));
        }
    }
    let mut out = vec![0.0; pm.len()];
    for i in 0..n_species {
        for j in 0..n_subcommunities {
            let idx = i * n_subcommunities + j;
            out[idx] = pm[idx] / sums[j];
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3 species x 2 subcommunities, row-major.
    fn sample_matrix() -> Vec<f64> {
        vec![
            2.0, 1.0, //
            4.0, 3.0, //
            2.0, 0.0,
        ]
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        let err = validate_matrix(&[1.0, 2.0], 3, 2).unwrap_err();
        assert!(err.to_string().contains("validate_matrix: matrix length"), "{err}");
        let err = validate_matrix(&[], 0, 2).unwrap_err();
        assert!(err.to_string().contains("validate_matrix:"), "{err}");
        assert!(validate_matrix(&sample_matrix(), 3, 2).is_ok());
    }

    #[test]
    fn column_extracts_subcommunity() {
        let pm = sample_matrix();
        assert_eq!(column(&pm, 3, 2, 0), vec![2.0, 4.0, 2.0]);
        assert_eq!(column(&pm, 3, 2, 1), vec![1.0, 3.0, 0.0]);
    }

    #[test]
    fn sums_are_consistent() {
        let pm = sample_matrix();
        assert_eq!(column_sums(&pm, 3, 2), vec![8.0, 4.0]);
        assert_eq!(row_sums(&pm, 3, 2), vec![3.0, 7.0, 2.0]);
        let total: f64 = pm.iter().sum();
        let by_cols: f64 = column_sums(&pm, 3, 2).iter().sum();
        assert!((total - by_cols).abs() < 1e-12);
    }

    #[test]
    fn normalize_total_sums_to_one() {
        let pm = sample_matrix();
        let norm = normalize_total(&pm, 3, 2).unwrap();
        let sum: f64 = norm.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "grand total {sum}");
    }

    #[test]
    fn normalize_columns_sums_to_one() {
        let pm = sample_matrix();
        let norm = normalize_columns(&pm, 3, 2).unwrap();
        for (j, s) in column_sums(&norm, 3, 2).iter().enumerate() {
            assert!((s - 1.0).abs() < 1e-12, "column {j} sums to {s}");
        }
    }

    #[test]
    fn normalize_columns_rejects_empty_subcommunity() {
        // Second column is all zeros.
        let pm = vec![
            2.0, 0.0, //
            4.0, 0.0,
        ];
        let err = normalize_columns(&pm, 2, 2).unwrap_err();
        assert!(err.to_string().contains("subcommunity 1"), "{err}");
    }

    #[test]
    fn normalize_total_rejects_zero_matrix() {
        assert!(normalize_total(&[0.0, 0.0], 2, 1).is_err());
    }
}
