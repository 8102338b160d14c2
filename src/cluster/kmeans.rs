//! K-means clustering (Lloyd's algorithm) with caller-supplied initial centroids.
//!
//! Partitions data into k clusters by alternating nearest-centroid assignment
//! and centroid recomputation. The foundational clustering algorithm, dating
//! to 1957 (Lloyd).
//!
//! # The Objective
//!
//! Each iteration is scored by the mean squared distance from every point to
//! its assigned centroid:
//!
//! ```text
//! J = (1/n) Σᵢ ||xᵢ - z_label(i)||²
//! ```
//!
//! Note the 1/n: this is a global per-sample mean, not a per-cluster one, so
//! large clusters dominate the value. J is recorded once per iteration,
//! measured against the centroids that iteration produced, and the full
//! history comes back in the fit report.
//!
//! # Lloyd's Algorithm
//!
//! 1. Start from the centroids the caller supplies
//! 2. **Assign**: each point goes to its nearest centroid under Euclidean
//!    distance; exact ties go to the lowest centroid index
//! 3. **Update**: each centroid becomes the mean of its assigned points; a
//!    cluster that lost all its points is restarted on a data point drawn
//!    uniformly at random
//! 4. Repeat until a stop condition fires
//!
//! **Why it converges**: absent restarts, J decreases monotonically and is
//! bounded below by 0.
//!
//! # Stopping
//!
//! Checked in a fixed order at the end of every iteration:
//!
//! 1. [`StopReason::CentroidShift`]: no centroid moved by `tol` or more
//! 2. [`StopReason::StableLabels`]: the assignment is identical to the
//!    previous iteration's. Never fires on the first iteration, which has no
//!    previous assignment to compare against.
//! 3. [`StopReason::MaxIterations`]: the iteration budget ran out
//!
//! A run that satisfies both convergence conditions at once reports the
//! shift-based stop. Budget exhaustion is not an error; callers that need to
//! tell it apart from convergence check [`StopReason::is_converged`].
//!
//! # Reproducibility
//!
//! The only randomness in the loop is empty-cluster recovery. The generator
//! is advanced exactly once per empty cluster, in increasing cluster-index
//! order, so a seeded run is bit-for-bit reproducible, and a run that never
//! sees an empty cluster never touches the generator at all.

use core::fmt;

use super::traits::Clustering;
use crate::error::{Error, Result};
use ndarray::Array2;
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Why a fit run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No centroid moved by at least the configured tolerance.
    CentroidShift,
    /// The label assignment repeated the previous iteration's exactly.
    StableLabels,
    /// The iteration budget ran out before either convergence condition.
    MaxIterations,
}

impl StopReason {
    /// True for the two convergence stops, false for budget exhaustion.
    pub fn is_converged(self) -> bool {
        !matches!(self, StopReason::MaxIterations)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::CentroidShift => write!(f, "centroid shift below tolerance"),
            StopReason::StableLabels => write!(f, "labels unchanged"),
            StopReason::MaxIterations => write!(f, "iteration budget exhausted"),
        }
    }
}

/// Everything a fit run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Final centroids, k rows.
    pub centroids: Vec<Vec<f64>>,
    /// Final cluster label per input row.
    pub labels: Vec<usize>,
    /// Objective value per executed iteration, in order. Its length always
    /// equals `iterations`.
    pub objective: Vec<f64>,
    /// Iterations actually executed.
    pub iterations: usize,
    /// Why the run stopped.
    pub stop: StopReason,
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on centroid movement.
    tol: f64,
    /// Random seed for empty-cluster recovery.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            tol: 1e-6,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run Lloyd's algorithm from the given initial centroids.
    ///
    /// `data` is one row per point; `initial_centroids` must have exactly k
    /// rows of the same width as the data. All inputs are validated before
    /// the first iteration, so no partial work happens on bad input.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidClusterCount`] if k is zero
    /// - [`Error::InvalidParameter`] if `max_iter` is zero, or `tol` is
    ///   negative or NaN
    /// - [`Error::EmptyInput`] if `data` has no rows, or rows of width zero
    /// - [`Error::DimensionMismatch`] if any data or centroid row has the
    ///   wrong width
    /// - [`Error::CentroidCountMismatch`] if `initial_centroids` does not
    ///   have exactly k rows
    pub fn fit(&self, data: &[Vec<f64>], initial_centroids: &[Vec<f64>]) -> Result<KmeansFit> {
        if self.k == 0 {
            return Err(Error::InvalidClusterCount {
                requested: 0,
                n_items: data.len(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.tol < 0.0 || self.tol.is_nan() {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be non-negative",
            });
        }
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = data.len();
        let d = data[0].len();
        if d == 0 {
            return Err(Error::EmptyInput);
        }

        // Convert to ndarray
        let data_arr = Self::to_matrix(data, d)?;

        if initial_centroids.len() != self.k {
            return Err(Error::CentroidCountMismatch {
                expected: self.k,
                found: initial_centroids.len(),
            });
        }
        let mut centroids = Self::to_matrix(initial_centroids, d)?;

        // Initialize RNG
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut labels = vec![0usize; n];
        let mut prev_labels: Option<Vec<usize>> = None;
        let mut objective = Vec::new();
        let mut iterations = 0usize;
        let mut stop = StopReason::MaxIterations;

        for _ in 0..self.max_iter {
            // Assignment step - parallel when feature enabled
            #[cfg(feature = "parallel")]
            {
                let centroids_ref = &centroids;
                labels.par_iter_mut().enumerate().for_each(|(i, label)| {
                    *label = Self::nearest_centroid(&data_arr.row(i), centroids_ref);
                });
            }

            #[cfg(not(feature = "parallel"))]
            for (i, label) in labels.iter_mut().enumerate() {
                *label = Self::nearest_centroid(&data_arr.row(i), &centroids);
            }

            // Update step, then score the iteration against the centroids it
            // just produced.
            let new_centroids = Self::update_centroids(&data_arr, &labels, self.k, &mut rng);
            objective.push(Self::clustering_cost(&data_arr, &new_centroids, &labels));

            let shift = Self::max_centroid_shift(&centroids, &new_centroids);
            let labels_stable = prev_labels.as_deref() == Some(labels.as_slice());

            centroids = new_centroids;
            prev_labels = Some(labels.clone());
            iterations += 1;

            if shift < self.tol {
                stop = StopReason::CentroidShift;
                break;
            }
            if labels_stable {
                stop = StopReason::StableLabels;
                break;
            }
        }

        Ok(KmeansFit {
            centroids: (0..self.k).map(|c| centroids.row(c).to_vec()).collect(),
            labels,
            objective,
            iterations,
            stop,
        })
    }

    /// Copy a slice-of-rows matrix into an `Array2`, checking row widths.
    fn to_matrix(rows: &[Vec<f64>], d: usize) -> Result<Array2<f64>> {
        let mut flat: Vec<f64> = Vec::with_capacity(rows.len() * d);
        for row in rows {
            if row.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: row.len(),
                });
            }
            flat.extend(row);
        }
        Array2::from_shape_vec((rows.len(), d), flat).map_err(|e| Error::Other(e.to_string()))
    }

    /// Index of the nearest centroid; exact ties go to the lowest index.
    fn nearest_centroid(point: &ndarray::ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f64::MAX;

        for c in 0..centroids.nrows() {
            let dist = Self::squared_distance(point, &centroids.row(c));
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }
        best_cluster
    }

    /// Recompute centroids as per-cluster means.
    ///
    /// A cluster with no members is restarted on a data row drawn uniformly
    /// at random. Draws happen in increasing cluster-index order, one per
    /// empty cluster, and the generator is untouched otherwise.
    fn update_centroids(
        data: &Array2<f64>,
        labels: &[usize],
        k: usize,
        rng: &mut impl Rng,
    ) -> Array2<f64> {
        let n = data.nrows();
        let d = data.ncols();
        let mut centroids = Array2::zeros((k, d));
        let mut counts = vec![0usize; k];

        for i in 0..n {
            let c = labels[i];
            for j in 0..d {
                centroids[[c, j]] += data[[i, j]];
            }
            counts[c] += 1;
        }

        for c in 0..k {
            if counts[c] > 0 {
                for j in 0..d {
                    centroids[[c, j]] /= counts[c] as f64;
                }
            } else {
                // Empty cluster: restart it on a random data point
                let idx = rng.random_range(0..n);
                centroids.row_mut(c).assign(&data.row(idx));
            }
        }

        centroids
    }

    /// Mean squared distance from each point to its assigned centroid.
    fn clustering_cost(data: &Array2<f64>, centroids: &Array2<f64>, labels: &[usize]) -> f64 {
        let n = data.nrows();
        let mut total = 0.0;
        for i in 0..n {
            total += Self::squared_distance(&data.row(i), &centroids.row(labels[i]));
        }
        total / n as f64
    }

    /// Largest Euclidean distance between corresponding old and new centroids.
    fn max_centroid_shift(old: &Array2<f64>, new: &Array2<f64>) -> f64 {
        let mut max_shift = 0.0f64;
        for c in 0..old.nrows() {
            let shift = Self::squared_distance(&old.row(c), &new.row(c)).sqrt();
            if shift > max_shift {
                max_shift = shift;
            }
        }
        max_shift
    }

    /// Compute squared Euclidean distance.
    fn squared_distance(a: &ndarray::ArrayView1<'_, f64>, b: &ndarray::ArrayView1<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }
}

/// Take the first `k` rows of `data` as an initial centroid set.
///
/// The usual deterministic initialization for [`Kmeans::fit`], and the one
/// [`Clustering::fit_predict`] uses.
///
/// # Errors
///
/// [`Error::InvalidClusterCount`] if `k` is zero or larger than the number
/// of rows.
pub fn first_k_centroids(data: &[Vec<f64>], k: usize) -> Result<Vec<Vec<f64>>> {
    if k == 0 || k > data.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: data.len(),
        });
    }
    Ok(data[..k].to_vec())
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let init = first_k_centroids(data, self.k)?;
        Ok(self.fit(data, &init)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
