//! Species similarity for similarity-sensitive diversity.
//!
//! A similarity matrix `Z` is a row-major S x S matrix with entries in
//! `[0, 1]` and 1s on the diagonal; `Z[i][j]` says how similar species `j`
//! is to species `i`. The identity matrix recovers naive diversity where
//! every species is wholly distinct from every other.

use crate::error::{DivpartError, Result};

/// How species relate to one another in a similarity-sensitive measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity<'a> {
    /// All species wholly distinct (implicit identity matrix, no storage).
    Distinct,
    /// Explicit row-major S x S similarity matrix.
    Matrix(&'a [f64]),
}

impl<'a> Similarity<'a> {
    /// Check the matrix (if any) against the species count.
    ///
    /// Entry range and symmetry are the caller's contract and are not
    /// checked; only the dimension is.
    pub(crate) fn validate(&self, n_species: usize) -> Result<()> {
        match self {
            Similarity::Distinct => Ok(()),
            Similarity::Matrix(z) => {
                if z.len() != n_species * n_species {
                    Err(DivpartError::DimensionMismatch {
                        len: z.len(),
                        n_species,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    /// The ordinariness vector `Z * p`: for each species, the total
    /// abundance of species similar to it, weighted by similarity. Under
    /// [`Similarity::Distinct`] this is `p` itself.
    pub(crate) fn weighted_abundance(&self, p: &[f64]) -> Result<Vec<f64>> {
        self.validate(p.len())?;
        match self {
            Similarity::Distinct => Ok(p.to_vec()),
            Similarity::Matrix(z) => {
                let n = p.len();
                let mut zp = vec![0.0; n];
                for i in 0..n {
                    let row = &z[i * n..(i + 1) * n];
                    zp[i] = row.iter().zip(p.iter()).map(|(&s, &v)| s * v).sum();
                }
                Ok(zp)
            }
        }
    }
}

/// Row-major identity matrix of size `n`, the explicit form of
/// [`Similarity::Distinct`].
pub fn identity(n: usize) -> Vec<f64> {
    let mut z = vec![0.0; n * n];
    for i in 0..n {
        z[i * n + i] = 1.0;
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_unit_diagonal() {
        let z = identity(3);
        assert_eq!(z.len(), 9);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(z[i * 3 + j], expected, "entry ({i}, {j})");
            }
        }
    }

    #[test]
    fn distinct_leaves_abundances_alone() {
        let p = [0.2, 0.5, 0.3];
        let zp = Similarity::Distinct.weighted_abundance(&p).unwrap();
        assert_eq!(zp, p.to_vec());
    }

    #[test]
    fn identity_matrix_matches_distinct() {
        let p = [0.2, 0.5, 0.3];
        let z = identity(3);
        let zp = Similarity::Matrix(&z).weighted_abundance(&p).unwrap();
        for (a, b) in zp.iter().zip(p.iter()) {
            assert!((a - b).abs() < 1e-15);
        }
    }

    #[test]
    fn matrix_product_by_hand() {
        // Two species, 50% similar to each other.
        let z = [1.0, 0.5, 0.5, 1.0];
        let p = [0.6, 0.4];
        let zp = Similarity::Matrix(&z).weighted_abundance(&p).unwrap();
        assert!((zp[0] - (0.6 + 0.5 * 0.4)).abs() < 1e-15);
        assert!((zp[1] - (0.5 * 0.6 + 0.4)).abs() < 1e-15);
    }

    #[test]
    fn wrong_size_matrix_is_rejected() {
        let z = [1.0, 0.5, 0.5]; // 3 entries, not 2x2
        let err = Similarity::Matrix(&z)
            .weighted_abundance(&[0.5, 0.5])
            .unwrap_err();
        assert!(matches!(
            err,
            DivpartError::DimensionMismatch { len: 3, n_species: 2 }
        ));
    }
}
