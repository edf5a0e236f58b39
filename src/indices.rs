//! Classic diversity indices as exact transforms of the measure family.
//!
//! Each index here is a fixed-order reading of the partition measures:
//! richness is alpha at order 0, Shannon entropy the log of alpha at order
//! 1, Simpson's index the reciprocal of alpha at order 2, and the Jaccard
//! index a ratio of supercommunity alpha to gamma at order 0. The
//! `generalized_*` forms accept a similarity matrix; the plain forms fix
//! all species wholly distinct and recover the textbook values.

use crate::error::{DivpartError, Result};
use crate::partition::{
    subcommunity_alpha_bar, supercommunity_alpha, supercommunity_gamma,
};
use crate::similarity::Similarity;

/// Species richness of each subcommunity: the number of species present.
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn richness(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    generalized_richness(pm, n_species, n_subcommunities, &Similarity::Distinct)
}

/// Similarity-sensitive richness: normalized alpha at order 0.
pub fn generalized_richness(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    sim: &Similarity,
) -> Result<Vec<f64>> {
    subcommunity_alpha_bar(pm, n_species, n_subcommunities, &[0.0], sim)
}

/// Shannon entropy of each subcommunity, in nats.
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn shannon(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    generalized_shannon(pm, n_species, n_subcommunities, &Similarity::Distinct)
}

/// Similarity-sensitive Shannon entropy: the log of normalized alpha at
/// order 1.
pub fn generalized_shannon(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    sim: &Similarity,
) -> Result<Vec<f64>> {
    let alpha = subcommunity_alpha_bar(pm, n_species, n_subcommunities, &[1.0], sim)?;
    Ok(alpha.iter().map(|&d| d.ln()).collect())
}

/// Simpson's index of each subcommunity: the probability two random
/// individuals are the same species.
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn simpson(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    generalized_simpson(pm, n_species, n_subcommunities, &Similarity::Distinct)
}

/// Similarity-sensitive Simpson's index: the reciprocal of normalized
/// alpha at order 2.
pub fn generalized_simpson(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    sim: &Similarity,
) -> Result<Vec<f64>> {
    let alpha = subcommunity_alpha_bar(pm, n_species, n_subcommunities, &[2.0], sim)?;
    Ok(alpha.iter().map(|&d| 1.0 / d).collect())
}

/// Jaccard index of two subcommunities: shared species over total species,
/// abundance-blind.
///
/// # Errors
///
/// `Domain` unless the matrix has exactly 2 subcommunities; shape errors
/// as in the partition measures.
///
/// # Example
///
/// ```
/// use divpart::jaccard;
///
/// // Species 2 and 3 are shared; 5 species in the union.
/// let pm = [
///     1.0, 0.0, //
///     2.0, 1.0, //
///     1.0, 3.0, //
///     0.0, 1.0, //
///     0.0, 2.0,
/// ];
/// let j = jaccard(&pm, 5, 2).unwrap();
/// assert!((j - 0.4).abs() < 1e-10);
/// ```
pub fn jaccard(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<f64> {
    let per_q = generalized_jaccard(
        pm,
        n_species,
        n_subcommunities,
        &[0.0],
        &Similarity::Distinct,
    )?;
    Ok(per_q[0])
}

/// Generalized Jaccard index over a grid of orders:
/// `supercommunity_alpha / supercommunity_gamma - 1` per order. At order 0
/// with distinct species this is the classic intersection-over-union.
///
/// # Errors
///
/// `Domain` unless the matrix has exactly 2 subcommunities; shape errors
/// as in the partition measures.
pub fn generalized_jaccard(
    pm: &[f64],
    n_species: usize,
    n_subcommunities: usize,
    qs: &[f64],
    sim: &Similarity,
) -> Result<Vec<f64>> {
    if n_subcommunities != 2 {
        return Err(DivpartError::Domain(format!(
            "can only calculate the Jaccard index for 2 subcommunities, got {n_subcommunities}",
        )));
    }
    let alpha = supercommunity_alpha(pm, n_species, n_subcommunities, qs, sim)?;
    let gamma = supercommunity_gamma(pm, n_species, n_subcommunities, qs, sim)?;
    Ok(alpha
        .iter()
        .zip(gamma.iter())
        .map(|(&a, &g)| a / g - 1.0)
        .collect())
}

/// Pielou's evenness of each subcommunity: Shannon entropy over its
/// maximum `ln(richness)`, in `[0, 1]`. Defined as 0 for subcommunities
/// with a single species.
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn pielou_evenness(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    let h = shannon(pm, n_species, n_subcommunities)?;
    let s = richness(pm, n_species, n_subcommunities)?;
    Ok(h.iter()
        .zip(s.iter())
        .map(|(&h, &s)| if s > 1.0 + 1e-9 { h / s.ln() } else { 0.0 })
        .collect())
}

/// Berger-Parker dominance of each subcommunity: the proportion of the
/// most abundant species, the reciprocal of alpha at order infinity.
///
/// # Errors
///
/// Shape errors as in the partition measures.
pub fn berger_parker(pm: &[f64], n_species: usize, n_subcommunities: usize) -> Result<Vec<f64>> {
    let alpha = subcommunity_alpha_bar(
        pm,
        n_species,
        n_subcommunities,
        &[f64::INFINITY],
        &Similarity::Distinct,
    )?;
    Ok(alpha.iter().map(|&d| 1.0 / d).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::identity;

    // 4 species x 2 subcommunities; second column misses species 0.
    fn sample() -> Vec<f64> {
        vec![
            4.0, 0.0, //
            3.0, 5.0, //
            2.0, 3.0, //
            1.0, 2.0,
        ]
    }

    fn manual_shannon(p: &[f64]) -> f64 {
        let total: f64 = p.iter().sum();
        -p.iter()
            .filter(|&&x| x > 0.0)
            .map(|&x| {
                let r = x / total;
                r * r.ln()
            })
            .sum::<f64>()
    }

    fn manual_simpson(p: &[f64]) -> f64 {
        let total: f64 = p.iter().sum();
        p.iter().map(|&x| (x / total) * (x / total)).sum()
    }

    #[test]
    fn richness_counts_present_species() {
        let r = richness(&sample(), 4, 2).unwrap();
        assert!((r[0] - 4.0).abs() < 1e-10, "{}", r[0]);
        assert!((r[1] - 3.0).abs() < 1e-10, "{}", r[1]);
    }

    #[test]
    fn shannon_matches_manual_formula() {
        let h = shannon(&sample(), 4, 2).unwrap();
        let expected = [
            manual_shannon(&[4.0, 3.0, 2.0, 1.0]),
            manual_shannon(&[0.0, 5.0, 3.0, 2.0]),
        ];
        for j in 0..2 {
            assert!(
                (h[j] - expected[j]).abs() < 1e-10,
                "subcommunity {j}: {} vs {}",
                h[j],
                expected[j]
            );
        }
    }

    #[test]
    fn simpson_matches_manual_formula() {
        let s = simpson(&sample(), 4, 2).unwrap();
        let expected = [
            manual_simpson(&[4.0, 3.0, 2.0, 1.0]),
            manual_simpson(&[0.0, 5.0, 3.0, 2.0]),
        ];
        for j in 0..2 {
            assert!((s[j] - expected[j]).abs() < 1e-10, "subcommunity {j}");
        }
    }

    #[test]
    fn generalized_forms_reduce_to_plain_under_identity() {
        let pm = sample();
        let z = identity(4);
        let sim = Similarity::Matrix(&z);
        let pairs = [
            (richness(&pm, 4, 2).unwrap(), generalized_richness(&pm, 4, 2, &sim).unwrap()),
            (shannon(&pm, 4, 2).unwrap(), generalized_shannon(&pm, 4, 2, &sim).unwrap()),
            (simpson(&pm, 4, 2).unwrap(), generalized_simpson(&pm, 4, 2, &sim).unwrap()),
        ];
        for (plain, general) in &pairs {
            for (a, b) in plain.iter().zip(general.iter()) {
                assert!((a - b).abs() < 1e-10, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn total_similarity_flattens_the_indices() {
        let pm = sample();
        let z = [1.0; 16];
        let sim = Similarity::Matrix(&z);
        for r in generalized_richness(&pm, 4, 2, &sim).unwrap() {
            assert!((r - 1.0).abs() < 1e-10);
        }
        for h in generalized_shannon(&pm, 4, 2, &sim).unwrap() {
            assert!(h.abs() < 1e-10);
        }
        for s in generalized_simpson(&pm, 4, 2, &sim).unwrap() {
            assert!((s - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn jaccard_is_intersection_over_union() {
        // Supports {0,1,2} and {1,2,3}: 2 shared of 4 total.
        let pm = vec![
            2.0, 0.0, //
            1.0, 3.0, //
            5.0, 1.0, //
            0.0, 4.0,
        ];
        let j = jaccard(&pm, 4, 2).unwrap();
        assert!((j - 0.5).abs() < 1e-10, "{j}");
    }

    #[test]
    fn jaccard_extremes() {
        let same = vec![
            1.0, 2.0, //
            3.0, 6.0,
        ];
        let j = jaccard(&same, 2, 2).unwrap();
        assert!((j - 1.0).abs() < 1e-10, "identical supports: {j}");

        let disjoint = vec![
            1.0, 0.0, //
            0.0, 1.0,
        ];
        let j = jaccard(&disjoint, 2, 2).unwrap();
        assert!(j.abs() < 1e-10, "disjoint supports: {j}");
    }

    #[test]
    fn jaccard_requires_exactly_two_subcommunities() {
        let pm = vec![1.0; 9];
        let err = jaccard(&pm, 3, 3).unwrap_err();
        assert!(matches!(err, DivpartError::Domain(_)));
        assert!(
            err.to_string().contains("2 subcommunities, got 3"),
            "{err}"
        );
        assert!(jaccard(&[1.0, 2.0], 2, 1).is_err());
    }

    #[test]
    fn pielou_evenness_bounds() {
        // Uniform column is perfectly even; single-species column is 0.
        let pm = vec![
            1.0, 3.0, //
            1.0, 0.0, //
            1.0, 0.0,
        ];
        let e = pielou_evenness(&pm, 3, 2).unwrap();
        assert!((e[0] - 1.0).abs() < 1e-10, "uniform: {}", e[0]);
        assert_eq!(e[1], 0.0, "single species: {}", e[1]);
    }

    #[test]
    fn berger_parker_is_top_proportion() {
        let pm = sample();
        let d = berger_parker(&pm, 4, 2).unwrap();
        assert!((d[0] - 0.4).abs() < 1e-10, "{}", d[0]);
        assert!((d[1] - 0.5).abs() < 1e-10, "{}", d[1]);
    }
}
