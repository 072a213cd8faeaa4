//! Fixed-size spatial hash grid over integer cell coordinates.
//!
//! This is the "hard part" the workspace is built around: a custom,
//! open-addressing-free hash table keyed by 3D integer cell coordinates,
//! sized once at construction and never resized.

use gridscan_core::{CellCoord, Dimension, PointView};

/// Default bucket-table size: a prime, large enough that well-tuned
/// `eps` values give a low load factor for typical datasets.
pub const DEFAULT_TABLE_SIZE: usize = 200_003;

/// Hash constants for 3D integer spatial hashing (Teschner et al.). The
/// algorithm this crate reimplements pins these exact values, so they
/// are not tunable.
const HASH_GX: i64 = 73_856_093;
const HASH_GY: i64 = 19_349_663;
const HASH_GZ: i64 = 83_492_791;

/// One slot of the hash table: the point indices that hashed here.
///
/// Multiple distinct cell coordinates can land in the same bucket (see
/// [`SpatialHashGrid`]); `first_cell` records the coordinates of
/// whichever point was inserted first, purely as a debugging/identity
/// hint. It is never consulted to disambiguate a lookup.
#[derive(Debug, Clone, Default)]
pub struct CellBucket {
    indices: Vec<usize>,
    first_cell: Option<CellCoord>,
}

impl CellBucket {
    #[inline]
    fn push(&mut self, idx: usize, cell: CellCoord) {
        if self.first_cell.is_none() {
            self.first_cell = Some(cell);
            self.indices.reserve(8);
        }
        self.indices.push(idx);
    }

    /// Point indices stored in this bucket, in insertion order.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The cell coordinate of the first point ever inserted here, if any.
    #[inline]
    #[must_use]
    pub fn first_cell(&self) -> Option<CellCoord> {
        self.first_cell
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Hashes a cell coordinate into a table slot.
///
/// `h = (73856093*gx) XOR (19349663*gy) XOR (83492791*gz)`, computed in
/// wrapping 64-bit signed arithmetic, then taken absolute and reduced
/// modulo the table size.
#[inline]
#[must_use]
pub fn hash_cell(cell: CellCoord, table_size: usize) -> usize {
    let h = HASH_GX.wrapping_mul(cell.gx) ^ HASH_GY.wrapping_mul(cell.gy) ^ HASH_GZ.wrapping_mul(cell.gz);
    (h.unsigned_abs() as usize) % table_size
}

const OFFSETS_2D: [(i64, i64); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size table of [`CellBucket`]s indexed by [`hash_cell`].
///
/// This table does NOT resolve hash collisions: two distinct cell
/// coordinates that hash to the same slot are merged into one bucket.
/// Correctness survives because every region query re-checks exact
/// Euclidean distance after a bucket lookup; only performance degrades
/// as the load factor rises. This is a deliberate divergence from a
/// conventional `HashMap`-keyed spatial index (which resolves collisions
/// by chaining on the exact key); see `DESIGN.md`.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    buckets: Vec<CellBucket>,
    eps: f64,
}

impl SpatialHashGrid {
    /// Builds an empty grid with the default table size.
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self::with_table_size(DEFAULT_TABLE_SIZE, eps)
    }

    /// Builds an empty grid with a custom table size. `table_size == 0`
    /// substitutes the default.
    #[must_use]
    pub fn with_table_size(table_size: usize, eps: f64) -> Self {
        let size = if table_size == 0 {
            DEFAULT_TABLE_SIZE
        } else {
            table_size
        };
        Self {
            buckets: vec![CellBucket::default(); size],
            eps,
        }
    }

    /// Builds a grid by inserting every point of `points`.
    #[must_use]
    pub fn build(points: &PointView<'_>, eps: f64) -> Self {
        let mut grid = Self::new(eps);
        for idx in 0..points.len() {
            grid.insert(idx, points.cell_coord(idx, eps));
        }
        grid
    }

    #[inline]
    #[must_use]
    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Inserts point `idx`, whose cell coordinate is `cell`, into its bucket.
    pub fn insert(&mut self, idx: usize, cell: CellCoord) {
        let h = hash_cell(cell, self.buckets.len());
        self.buckets[h].push(idx, cell);
    }

    /// Returns the buckets covering the 3x3 (2D) or 3x3x3 (3D)
    /// neighborhood of `center`.
    ///
    /// In 2D the z-offset ranges over `{0}` only; in 3D it ranges over
    /// `{-1, 0, 1}`. This is the intended behavior spelled out by this
    /// algorithm's design notes, not the z-range bug present in its
    /// original C ancestor (which computed `z_min == z_max == 3` for
    /// `dim == 3` and so silently skipped the z-neighborhood).
    #[must_use]
    pub fn neighborhood(&self, center: CellCoord, dim: Dimension) -> Vec<&CellBucket> {
        let z_offsets: &[i64] = match dim {
            Dimension::Two => &[0],
            Dimension::Three => &[-1, 0, 1],
        };
        let mut buckets = Vec::with_capacity(OFFSETS_2D.len() * z_offsets.len());
        for &(dx, dy) in &OFFSETS_2D {
            for &dz in z_offsets {
                let cell = CellCoord::new(center.gx + dx, center.gy + dy, center.gz + dz);
                let h = hash_cell(cell, self.buckets.len());
                buckets.push(&self.buckets[h]);
            }
        }
        buckets
    }
}
