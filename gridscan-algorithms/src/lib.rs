//! gridscan-algorithms: grid-indexed DBSCAN and a k-means sibling.
//!
//! `dbscan::run` is the primary entry point this workspace exists for;
//! `kmeans::run` is a lighter-weight sibling, kept alongside it because
//! the algorithm's original host header exposes both from one API.

pub mod dbscan;
pub mod grid;
pub mod kmeans;

pub use dbscan::{DbscanConfig, Scratch};
pub use grid::{hash_cell, CellBucket, SpatialHashGrid, DEFAULT_TABLE_SIZE};
pub use kmeans::KMeansConfig;
