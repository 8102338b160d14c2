//! # lloyd
//!
//! Lloyd's k-means over dense `f64` rows: caller-supplied initial centroids, a
//! per-iteration objective history, and an explicit stop reason.
//!
//! The fit loop is deterministic given a seed. Its only randomness is
//! empty-cluster recovery, which draws one replacement row per degenerate
//! cluster; assignment can run in parallel via the `parallel` feature without
//! changing any result.

pub mod cluster;
/// Error types used across `lloyd`.
pub mod error;

pub use cluster::{first_k_centroids, Clustering, Kmeans, KmeansFit, StopReason};
pub use error::{Error, Result};
