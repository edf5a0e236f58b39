//! Similarity-sensitive diversity measures and their partitioning.
//!
//! Computes Hill numbers (effective species counts) and Leinster-Cobbold
//! similarity-sensitive diversity over one or many weighted subcommunities,
//! partitions supercommunity diversity into alpha, beta, rho and gamma
//! components, and derives the classic named indices (richness, Shannon,
//! Simpson, Jaccard, Pielou, Berger-Parker) and Jost's multiplicative
//! alpha/beta decomposition from the same power-mean core.
//!
//! Abundance data is a row-major `&[f64]` matrix with explicit dimensions:
//! rows are species, columns are subcommunities. Partition-level functions
//! accept raw counts and normalize internally; the vector-level Hill
//! functions take proportions as given.
//!
//! # Quick start
//!
//! ```
//! use divpart::{hill_number, jost_beta, partition_diversity, Similarity};
//!
//! // Two disjoint subcommunities of two even species each.
//! let pm = [
//!     1.0, 0.0, //
//!     1.0, 0.0, //
//!     0.0, 1.0, //
//!     0.0, 1.0,
//! ];
//! let part = partition_diversity(&pm, 4, 2, 1.0, &Similarity::Distinct).unwrap();
//! assert!((part.gamma - 4.0).abs() < 1e-10);
//! assert!((part.beta_bar - 2.0).abs() < 1e-10);
//!
//! // Jost's turnover agrees: two completely distinct subcommunities.
//! let beta = jost_beta(&pm, 4, 2, &[0.0, 1.0, 2.0]).unwrap();
//! assert!(beta.iter().all(|b| (b - 2.0).abs() < 1e-10));
//!
//! // Each half on its own holds two effective species.
//! let d = hill_number(&[0.5, 0.5, 0.0, 0.0], 1.0).unwrap();
//! assert!((d - 2.0).abs() < 1e-10);
//! ```

pub mod error;
pub mod abundance;
pub mod powermean;
pub mod similarity;
pub mod hill;
pub mod partition;
pub mod indices;
pub mod jost;

pub use error::{DivpartError, Result};
pub use powermean::{power_mean, power_mean_many, uniform_weights};
pub use similarity::{identity, Similarity};
pub use hill::{
    hill_number, hill_profile, hill_profile_matrix, leinster_cobbold, leinster_cobbold_profile,
    leinster_cobbold_profile_matrix,
};
pub use partition::{
    partition_diversity, subcommunity_alpha, subcommunity_alpha_bar, subcommunity_beta,
    subcommunity_beta_bar, subcommunity_gamma, subcommunity_rho, subcommunity_rho_bar,
    supercommunity_alpha, supercommunity_alpha_bar, supercommunity_beta, supercommunity_beta_bar,
    supercommunity_gamma, supercommunity_rho, supercommunity_rho_bar, DiversityPartition,
};
pub use indices::{
    berger_parker, generalized_jaccard, generalized_richness, generalized_shannon,
    generalized_simpson, jaccard, pielou_evenness, richness, shannon, simpson,
};
pub use jost::{jost_alpha, jost_beta};
