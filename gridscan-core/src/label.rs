//! Point label semantics shared by every clustering algorithm in this workspace.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The classification state of a single point.
///
/// The public output of a clustering run is a raw `&mut [i32]` slice (see
/// the crate-level docs), matching the convention of the original C
/// implementation this workspace descends from: `-1` unclassified, `0`
/// noise, `1..=K` dense cluster ids. `Label` gives the internal state
/// machine a type that cannot represent an invalid raw value, while still
/// round-tripping losslessly to and from that slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Label {
    /// Not yet visited by the driver. Never present once a run completes.
    Unclassified,
    /// Visited, but not density-reachable from any core point (yet).
    Noise,
    /// Member of the given dense cluster id (`>= 1`).
    Cluster(u32),
}

impl Label {
    /// Raw value written for [`Label::Unclassified`].
    pub const UNCLASSIFIED_RAW: i32 = -1;
    /// Raw value written for [`Label::Noise`].
    pub const NOISE_RAW: i32 = 0;

    /// Decodes a raw output-slice value into a `Label`.
    #[inline]
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            Self::UNCLASSIFIED_RAW => Self::Unclassified,
            Self::NOISE_RAW => Self::Noise,
            k => Self::Cluster(k as u32),
        }
    }

    /// Encodes this label as the raw value the output slice expects.
    #[inline]
    #[must_use]
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Unclassified => Self::UNCLASSIFIED_RAW,
            Self::Noise => Self::NOISE_RAW,
            Self::Cluster(id) => id as i32,
        }
    }

    /// True once a point has been visited (i.e. is no longer `Unclassified`).
    #[inline]
    #[must_use]
    pub fn is_visited(self) -> bool {
        !matches!(self, Self::Unclassified)
    }

    /// True if this label is a cluster membership.
    #[inline]
    #[must_use]
    pub fn is_clustered(self) -> bool {
        matches!(self, Self::Cluster(_))
    }
}
