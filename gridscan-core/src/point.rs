//! Point views and the owned, columnar point cloud type.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The dimensionality of a point set.
///
/// Replaces the raw `dim: i32 ∈ {2,3}` of the algorithm's original
/// language-neutral signature with a type that makes the invalid cases
/// (0, 1, 4, ...) unrepresentable rather than runtime-validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    /// Number of axes (2 or 3), for display and loop bounds.
    #[inline]
    #[must_use]
    pub fn axes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// The integer cell coordinate a point falls into, for a given `eps`.
///
/// `gz` is fixed at 0 for 2D points. Cell coordinates may be negative
/// (points with negative axes) and are kept in 64-bit signed integers
/// because floor-dividing extreme coordinates by a small `eps` can
/// exceed 32-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub gx: i64,
    pub gy: i64,
    pub gz: i64,
}

impl CellCoord {
    #[inline]
    #[must_use]
    pub fn new(gx: i64, gy: i64, gz: i64) -> Self {
        Self { gx, gy, gz }
    }
}

#[inline]
fn floor_div(v: f64, eps: f64) -> i64 {
    (v / eps).floor() as i64
}

/// A single point's coordinates, as returned by [`PointView::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Squared Euclidean distance to another point.
    ///
    /// `z` is `0.0` for both points in 2D input, so this is safe to use
    /// unconditionally regardless of dimensionality.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// A borrowed, immutable view over parallel coordinate arrays.
///
/// This is the "point set" of the algorithm: an external caller owns the
/// `x`/`y`/`z` buffers, and a `PointView` borrows them for the duration
/// of a clustering call. For 2D input `z` is `None` and treated as `0.0`
/// everywhere a 3D computation would otherwise read it.
#[derive(Debug, Clone, Copy)]
pub struct PointView<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: Option<&'a [f64]>,
    dim: Dimension,
}

impl<'a> PointView<'a> {
    /// The raw constructor, closest to the algorithm's original
    /// language-neutral entry point: `z` is independently nullable from
    /// `dim`, so calling this with `dim: Three` and `z: None` is
    /// reachable and produces [`Error::MissingZ`] rather than being
    /// ruled out by the type system the way [`Self::new_2d`] /
    /// [`Self::new_3d`] do.
    pub fn new(x: &'a [f64], y: &'a [f64], z: Option<&'a [f64]>, dim: Dimension) -> Result<Self> {
        if dim == Dimension::Three && z.is_none() {
            return Err(Error::MissingZ);
        }
        let z_len = z.map(<[f64]>::len);
        if x.len() != y.len() || z_len.is_some_and(|len| len != x.len()) {
            return Err(Error::MismatchedLengths {
                x: x.len(),
                y: y.len(),
                z: z_len,
            });
        }
        Ok(Self { x, y, z, dim })
    }

    /// Builds a 2D point view. Fails if `x` and `y` disagree in length.
    pub fn new_2d(x: &'a [f64], y: &'a [f64]) -> Result<Self> {
        Self::new(x, y, None, Dimension::Two)
    }

    /// Builds a 3D point view. Fails if `x`, `y`, and `z` disagree in length.
    pub fn new_3d(x: &'a [f64], y: &'a [f64], z: &'a [f64]) -> Result<Self> {
        Self::new(x, y, Some(z), Dimension::Three)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// Returns the coordinates of point `idx` (z is `0.0` for 2D views,
    /// regardless of whether a `z` slice happens to be present).
    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> Point {
        let z = match self.dim {
            Dimension::Two => 0.0,
            Dimension::Three => self.z.map_or(0.0, |z| z[idx]),
        };
        Point {
            x: self.x[idx],
            y: self.y[idx],
            z,
        }
    }

    /// Squared Euclidean distance between two points in this view.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, a: usize, b: usize) -> f64 {
        self.get(a).distance_squared(&self.get(b))
    }

    /// The cell coordinate point `idx` falls into for the given `eps`.
    #[inline]
    #[must_use]
    pub fn cell_coord(&self, idx: usize, eps: f64) -> CellCoord {
        let p = self.get(idx);
        let gz = match self.dim {
            Dimension::Two => 0,
            Dimension::Three => floor_div(p.z, eps),
        };
        CellCoord::new(floor_div(p.x, eps), floor_div(p.y, eps), gz)
    }
}

/// An owned, columnar (structure-of-arrays) point set.
///
/// Companion to [`PointView`] for callers who are assembling a dataset
/// in-process rather than receiving it as caller-owned arrays. The CLI
/// and the test suite both build one of these before handing a borrowed
/// [`PointView`] to a clustering entry point.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    dim: Option<Dimension>,
}

impl PointCloud {
    #[must_use]
    pub fn with_capacity(dim: Dimension, capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(if dim == Dimension::Three { capacity } else { 0 }),
            dim: Some(dim),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Appends a 2D point. Panics if this cloud was created for 3D points.
    pub fn push_2d(&mut self, x: f64, y: f64) {
        assert_ne!(self.dim, Some(Dimension::Three), "cloud is 3D, use push_3d");
        self.dim.get_or_insert(Dimension::Two);
        self.x.push(x);
        self.y.push(y);
    }

    /// Appends a 3D point. Panics if this cloud was created for 2D points.
    pub fn push_3d(&mut self, x: f64, y: f64, z: f64) {
        assert_ne!(self.dim, Some(Dimension::Two), "cloud is 2D, use push_2d");
        self.dim.get_or_insert(Dimension::Three);
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Borrows this cloud as a [`PointView`].
    pub fn view(&self) -> Result<PointView<'_>> {
        match self.dim {
            Some(Dimension::Three) => PointView::new_3d(&self.x, &self.y, &self.z),
            _ => PointView::new_2d(&self.x, &self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_view_2d_distance() {
        let x = [0.0, 3.0];
        let y = [0.0, 4.0];
        let view = PointView::new_2d(&x, &y).unwrap();
        assert_relative_eq!(view.distance_squared(0, 1), 25.0);
    }

    #[test]
    fn point_view_3d_cell_coord_negative() {
        let x = [-0.5];
        let y = [-1.5];
        let z = [2.5];
        let view = PointView::new_3d(&x, &y, &z).unwrap();
        let cell = view.cell_coord(0, 1.0);
        assert_eq!(cell, CellCoord::new(-1, -2, 2));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let x = [0.0, 1.0];
        let y = [0.0];
        assert!(PointView::new_2d(&x, &y).is_err());
    }

    #[test]
    fn missing_z_for_3d_is_rejected() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let err = PointView::new(&x, &y, None, Dimension::Three).unwrap_err();
        assert_eq!(err, Error::MissingZ);
    }

    #[test]
    fn two_d_view_ignores_a_z_slice_passed_through_the_raw_constructor() {
        // `new` takes `dim` and `z` independently, so a 2D view can be built
        // with a non-null `z`. Distance must stay purely 2D regardless.
        let x = [0.0, 3.0];
        let y = [0.0, 4.0];
        let z = [0.0, 100.0];
        let view = PointView::new(&x, &y, Some(&z), Dimension::Two).unwrap();
        assert_relative_eq!(view.distance_squared(0, 1), 25.0);
        assert_relative_eq!(view.get(1).z, 0.0);
    }

    #[test]
    fn point_cloud_round_trips_through_view() {
        let mut cloud = PointCloud::with_capacity(Dimension::Two, 2);
        cloud.push_2d(1.0, 2.0);
        cloud.push_2d(3.0, 4.0);
        let view = cloud.view().unwrap();
        assert_eq!(view.len(), 2);
        assert_relative_eq!(view.get(1).x, 3.0);
    }
}
