//! Clustering via Lloyd's k-means.
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: minimize the mean squared distance to the assigned centroid:
//!
//! ```text
//! J = (1/n) Σᵢ ||xᵢ - z_label(i)||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! Two things set this implementation apart from a textbook sketch. First,
//! initial centroids come from the caller, so runs are comparable and a fit
//! can be resumed from a previous result. Second, the loop reports *why* it
//! stopped ([`StopReason`]) along with the per-iteration objective history,
//! which is what you want when deciding whether to raise the budget or
//! tighten the tolerance.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::{first_k_centroids, Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![10.0, 0.0],
//!     vec![0.5, 0.5],
//!     vec![9.5, 0.5],
//! ];
//!
//! // Full report: centroids, labels, objective history, stop reason.
//! let init = first_k_centroids(&data, 2).unwrap();
//! let fit = Kmeans::new(2).with_seed(7).fit(&data, &init).unwrap();
//! assert_eq!(fit.labels, vec![0, 1, 0, 1]);
//! assert!(fit.stop.is_converged());
//!
//! // Labels only, initialized from the first two rows.
//! let labels = Kmeans::new(2).with_seed(7).fit_predict(&data).unwrap();
//! assert_eq!(labels, fit.labels);
//! ```

mod kmeans;
mod traits;

#[cfg(test)]
mod kmeans_tests;

pub use kmeans::{first_k_centroids, Kmeans, KmeansFit, StopReason};
pub use traits::Clustering;
