//! A k-means sibling to the grid-indexed DBSCAN entry point.
//!
//! This module exists because the algorithm's original host header
//! declares `kmeans_run` alongside `dbscan_run` in the same clustering
//! API; it receives none of the spatial-grid machinery `dbscan` is
//! built around; and it does not model the performance/scratch-buffer
//! aspects covered in detail there. Lloyd's algorithm over the full
//! point set is sufficient for a sibling of this scope.

use rayon::prelude::*;

use gridscan_core::{ClusterSummary, Error, Point, PointView, Result};

/// Configuration for a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of centroids to fit.
    pub k: usize,
    /// Hard cap on Lloyd's-algorithm iterations.
    pub max_iterations: usize,
    /// Convergence threshold: stop once no centroid moves further than this.
    pub tolerance: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl KMeansConfig {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

fn validate(points: &PointView<'_>, config: &KMeansConfig, labels: &[i32]) -> Result<()> {
    if points.is_empty() {
        log::error!("kmeans::run: point set is empty");
        return Err(Error::EmptyInput);
    }
    if labels.len() != points.len() {
        log::error!(
            "kmeans::run: labels length {} does not match point count {}",
            labels.len(),
            points.len()
        );
        return Err(Error::LabelLengthMismatch {
            labels: labels.len(),
            points: points.len(),
        });
    }
    if config.k == 0 || config.k > points.len() {
        log::error!(
            "kmeans::run: k={} is out of range for {} points",
            config.k,
            points.len()
        );
        return Err(Error::InvalidK {
            k: config.k,
            n: points.len(),
        });
    }
    Ok(())
}

/// Runs Lloyd's algorithm over `points`, writing a centroid index
/// (`0..config.k`) per point into `labels`.
///
/// Centroids are seeded from the first `k` distinct points in input
/// order, which keeps the run fully deterministic without pulling in a
/// random-number-generator dependency for a sibling this small. If fewer
/// than `k` distinct points exist, the run proceeds with as many
/// distinct centroids as were found; `ClusterSummary::clusters_found`
/// reflects the actual count.
pub fn run(points: PointView<'_>, config: &KMeansConfig, labels: &mut [i32]) -> Result<ClusterSummary> {
    validate(&points, config, labels)?;

    let mut centroids: Vec<Point> = Vec::with_capacity(config.k);
    for idx in 0..points.len() {
        let candidate = points.get(idx);
        if centroids.iter().any(|c| *c == candidate) {
            continue;
        }
        centroids.push(candidate);
        if centroids.len() == config.k {
            break;
        }
    }

    for _iteration in 0..config.max_iterations {
        // The nearest-centroid assignment is the one step of this sibling
        // that's embarrassingly parallel, so it's the one place k-means
        // reaches for rayon.
        labels.par_iter_mut().enumerate().for_each(|(idx, label)| {
            let p = points.get(idx);
            let (best, _) = centroids
                .iter()
                .enumerate()
                .map(|(c, centroid)| (c, p.distance_squared(centroid)))
                .fold((0usize, f64::INFINITY), |acc, cur| if cur.1 < acc.1 { cur } else { acc });
            *label = best as i32;
        });

        let mut sums = vec![(0.0_f64, 0.0_f64, 0.0_f64, 0usize); config.k];
        for idx in 0..points.len() {
            let p = points.get(idx);
            let c = labels[idx] as usize;
            sums[c].0 += p.x;
            sums[c].1 += p.y;
            sums[c].2 += p.z;
            sums[c].3 += 1;
        }

        let mut max_shift = 0.0_f64;
        for (c, (sx, sy, sz, count)) in sums.into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            let new_centroid = Point {
                x: sx / count as f64,
                y: sy / count as f64,
                z: sz / count as f64,
            };
            max_shift = max_shift.max(centroids[c].distance_squared(&new_centroid).sqrt());
            centroids[c] = new_centroid;
        }

        if max_shift <= config.tolerance {
            break;
        }
    }

    let clusters_found = centroids.len() as u32;
    Ok(ClusterSummary::new(points.len(), clusters_found, 0))
}
