//! Grid-indexed DBSCAN: region query, cluster expansion, and the driver.

use std::collections::VecDeque;

use gridscan_core::{ClusterSummary, Error, Label, PointView, Result};

use crate::grid::SpatialHashGrid;

/// Configuration for a DBSCAN run.
#[derive(Debug, Clone, PartialEq)]
pub struct DbscanConfig {
    /// Neighborhood radius.
    pub eps: f64,
    /// Minimum neighborhood size (including the point itself) for a core point.
    pub min_points: usize,
    /// Hash table size for the spatial grid. `0` uses the library default.
    pub table_size: usize,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            eps: 1.0,
            min_points: 4,
            table_size: 0,
        }
    }
}

impl DbscanConfig {
    #[must_use]
    pub fn new(eps: f64, min_points: usize) -> Self {
        Self {
            eps,
            min_points,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    #[must_use]
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    #[must_use]
    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }
}

/// Scratch buffers reused across every expansion in a single `run` call.
///
/// Mirrors the original algorithm's pointer-to-pointer scratch buffers
/// (`seed_buf`/`tmp_buf`), generalized into a pair of reusable,
/// driver-owned containers: a temp neighbor buffer sized by the region
/// query, and a FIFO seed queue sized by the expansion's breadth-first walk.
#[derive(Debug, Default)]
pub struct Scratch {
    neighbor_buf: Vec<usize>,
    seed_queue: VecDeque<usize>,
}

impl Scratch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            neighbor_buf: Vec::with_capacity(256),
            seed_queue: VecDeque::new(),
        }
    }
}

/// Finds every point within `grid.eps()` of point `p`, including `p` itself.
///
/// Scans the 3x3 (2D) or 3x3x3 (3D) cell neighborhood around `p` and
/// applies an exact squared-distance test to every candidate, since the
/// grid's buckets may hold points from multiple cell coordinates that
/// happened to hash together.
fn region_query(grid: &SpatialHashGrid, points: &PointView<'_>, p: usize, out: &mut Vec<usize>) {
    out.clear();
    let eps_sq = grid.eps() * grid.eps();
    let cell = points.cell_coord(p, grid.eps());
    for bucket in grid.neighborhood(cell, points.dim()) {
        if bucket.is_empty() {
            continue;
        }
        for &idx in bucket.indices() {
            if points.distance_squared(p, idx) <= eps_sq {
                out.push(idx);
            }
        }
    }
}

/// Grows one cluster, breadth-first, from seed point `p`.
///
/// Returns `true` if a cluster was formed (and `p` is no longer
/// `Unclassified`), `false` if `p` was marked `Noise`.
///
/// Border points (`Noise` points reached while expanding a cluster)
/// are promoted to the cluster label but are not themselves re-enqueued
/// for expansion; only points that were `Unclassified` when reached
/// extend the search. This is the classic DBSCAN core/border
/// distinction.
fn expand_cluster(
    grid: &SpatialHashGrid,
    points: &PointView<'_>,
    labels: &mut [i32],
    p: usize,
    cluster_id: u32,
    min_points: usize,
    scratch: &mut Scratch,
) -> bool {
    region_query(grid, points, p, &mut scratch.neighbor_buf);
    if scratch.neighbor_buf.len() < min_points {
        labels[p] = Label::Noise.to_raw();
        return false;
    }

    let cluster_raw = Label::Cluster(cluster_id).to_raw();
    scratch.seed_queue.clear();
    for &idx in &scratch.neighbor_buf {
        labels[idx] = cluster_raw;
        scratch.seed_queue.push_back(idx);
    }

    while let Some(q) = scratch.seed_queue.pop_front() {
        region_query(grid, points, q, &mut scratch.neighbor_buf);
        if scratch.neighbor_buf.len() < min_points {
            continue;
        }
        for &r in &scratch.neighbor_buf {
            match Label::from_raw(labels[r]) {
                Label::Unclassified => {
                    labels[r] = cluster_raw;
                    scratch.seed_queue.push_back(r);
                }
                Label::Noise => {
                    labels[r] = cluster_raw;
                }
                Label::Cluster(_) => {}
            }
        }
    }
    true
}

fn validate(points: &PointView<'_>, config: &DbscanConfig, labels: &[i32]) -> Result<()> {
    if points.is_empty() {
        log::error!("dbscan::run: point set is empty");
        return Err(Error::EmptyInput);
    }
    if labels.len() != points.len() {
        log::error!(
            "dbscan::run: labels length {} does not match point count {}",
            labels.len(),
            points.len()
        );
        return Err(Error::LabelLengthMismatch {
            labels: labels.len(),
            points: points.len(),
        });
    }
    if config.eps <= 0.0 {
        log::error!("dbscan::run: eps must be positive, got {}", config.eps);
        return Err(Error::NonPositiveEpsilon(config.eps));
    }
    if config.min_points == 0 {
        log::error!("dbscan::run: min_points must be at least 1");
        return Err(Error::NonPositiveMinPoints);
    }
    Ok(())
}

/// Runs grid-indexed DBSCAN over `points`, writing a label per point into
/// `labels` and returning a [`ClusterSummary`].
///
/// On any validation failure, a diagnostic is logged via the `log` facade
/// and `labels` is left untouched: no label is written until every
/// input has been checked.
///
/// Iteration proceeds in point-index order; this determines both which
/// cluster id a given seed receives and, when a border point is
/// reachable from more than one cluster, which cluster claims it (the
/// one whose expansion reaches it first).
pub fn run(points: PointView<'_>, config: &DbscanConfig, labels: &mut [i32]) -> Result<ClusterSummary> {
    validate(&points, config, labels)?;

    for label in labels.iter_mut() {
        *label = Label::Unclassified.to_raw();
    }

    let grid = if config.table_size == 0 {
        SpatialHashGrid::new(config.eps)
    } else {
        SpatialHashGrid::with_table_size(config.table_size, config.eps)
    };
    let mut grid = grid;
    for idx in 0..points.len() {
        grid.insert(idx, points.cell_coord(idx, config.eps));
    }

    let mut scratch = Scratch::new();
    let mut cluster_id: u32 = 0;

    for i in 0..points.len() {
        if Label::from_raw(labels[i]).is_visited() {
            continue;
        }
        let candidate_id = cluster_id + 1;
        if expand_cluster(&grid, &points, labels, i, candidate_id, config.min_points, &mut scratch) {
            cluster_id = candidate_id;
        }
    }

    let noise_points = labels.iter().filter(|&&l| l == Label::NOISE_RAW).count();
    Ok(ClusterSummary::new(points.len(), cluster_id, noise_points))
}
