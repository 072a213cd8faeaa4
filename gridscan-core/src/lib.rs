//! gridscan-core: point/label data model and error types shared by every
//! clustering algorithm in this workspace.
//!
//! This crate holds no algorithm logic; it is the dependency-light
//! foundation that `gridscan-algorithms` builds on, the same role
//! `rustpix-core` plays for its own clustering algorithms.

mod error;
mod label;
mod point;
mod summary;

pub use error::{Error, Result};
pub use label::Label;
pub use point::{CellCoord, Dimension, Point, PointCloud, PointView};
pub use summary::ClusterSummary;
