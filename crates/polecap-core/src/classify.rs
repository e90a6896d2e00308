//! Hemisphere and cap-overlap classification.

use polecap_geo::{GeoBox, GeoPoint, MERCATOR_MAXIMUM_LATITUDE, Projection};

use crate::CapError;

/// Which pole a tile caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// North iff the box lies entirely at or above the equator with a positive
    /// northern edge; South otherwise.
    #[must_use]
    pub fn of(geo_box: &GeoBox) -> Self {
        if geo_box.north > 0.0 && geo_box.south >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    /// Signed latitude of the cap boundary in this hemisphere.
    #[must_use]
    pub fn pole_latitude(self, threshold: PolarCapThreshold) -> f64 {
        match self {
            Hemisphere::North => threshold.latitude(),
            Hemisphere::South => -threshold.latitude(),
        }
    }

    /// Feature kind presented to the style rules.
    #[must_use]
    pub fn style_kind(self) -> &'static str {
        match self {
            Hemisphere::North => "north_pole",
            Hemisphere::South => "south_pole",
        }
    }

    /// Order the tile corners, given as bottom-left, bottom-right, top-right,
    /// top-left, into this hemisphere's winding.
    ///
    /// North keeps the counter-clockwise order; South uses the mirrored order
    /// bottom-left, top-left, top-right, bottom-right.
    #[must_use]
    pub fn order_corners(self, [bl, br, tr, tl]: [GeoPoint; 4]) -> [GeoPoint; 4] {
        match self {
            Hemisphere::North => [bl, br, tr, tl],
            Hemisphere::South => [bl, tl, tr, br],
        }
    }

    /// Returns true if `latitude` is at or beyond `limit` on this side.
    #[must_use]
    pub fn is_beyond(self, latitude: f64, limit: f64) -> bool {
        match self {
            Hemisphere::North => latitude >= limit,
            Hemisphere::South => latitude <= -limit,
        }
    }

    /// Index of the first corner closest to this hemisphere's pole.
    #[must_use]
    pub fn nearest_corner(self, corners: &[GeoPoint; 4]) -> usize {
        let mut best = 0;
        for (i, corner) in corners.iter().enumerate().skip(1) {
            let closer = match self {
                Hemisphere::North => corner.latitude > corners[best].latitude,
                Hemisphere::South => corner.latitude < corners[best].latitude,
            };
            if closer {
                best = i;
            }
        }
        best
    }
}

/// Maximum latitude magnitude the map projection represents; beyond it the
/// cap geometry takes over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarCapThreshold(f64);

impl PolarCapThreshold {
    /// Create a threshold from a latitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`CapError::InvalidThreshold`] unless `0 < latitude <= 90`.
    pub fn new(latitude: f64) -> Result<Self, CapError> {
        if latitude > 0.0 && latitude <= 90.0 {
            Ok(Self(latitude))
        } else {
            Err(CapError::InvalidThreshold(latitude))
        }
    }

    /// Threshold matching a projection's own representable limit.
    ///
    /// # Errors
    ///
    /// Returns [`CapError::InvalidThreshold`] if the projection reports a
    /// limit outside `(0, 90]`.
    pub fn from_projection(projection: &dyn Projection) -> Result<Self, CapError> {
        Self::new(projection.maximum_latitude())
    }

    /// Latitude magnitude in degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.0
    }
}

impl Default for PolarCapThreshold {
    fn default() -> Self {
        Self(MERCATOR_MAXIMUM_LATITUDE)
    }
}

/// Constants that drive the cap clip.
///
/// `threshold` places the cap boundary and drives classification.
/// `max_latitude` is the map projection's own representable limit, used only
/// to decide whether a corner adjacent to the farthest corner is itself
/// unrepresentable. The two usually coincide but are kept apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapSettings {
    pub threshold: PolarCapThreshold,
    pub max_latitude: f64,
}

impl CapSettings {
    /// Settings where both constants come from the map projection.
    ///
    /// # Errors
    ///
    /// Returns [`CapError::InvalidThreshold`] for an out-of-range projection limit.
    pub fn for_projection(projection: &dyn Projection) -> Result<Self, CapError> {
        Ok(Self {
            threshold: PolarCapThreshold::from_projection(projection)?,
            max_latitude: projection.maximum_latitude(),
        })
    }

    /// Replace the threshold, keeping `max_latitude`.
    #[must_use]
    pub fn with_threshold(self, threshold: PolarCapThreshold) -> Self {
        Self { threshold, ..self }
    }
}

impl Default for CapSettings {
    fn default() -> Self {
        Self {
            threshold: PolarCapThreshold::default(),
            max_latitude: MERCATOR_MAXIMUM_LATITUDE,
        }
    }
}

/// Returns true if the box reaches beyond the threshold at either pole.
#[must_use]
pub fn touches_polar_cap(geo_box: &GeoBox, threshold: PolarCapThreshold) -> bool {
    geo_box.north > threshold.latitude() || geo_box.south < -threshold.latitude()
}

/// How a tile's corners relate to the cap boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapOverlap {
    /// Every corner lies equator-side of the boundary: nothing to cap.
    Outside,
    /// Every corner lies pole-side of the boundary: the quad is used as is.
    Inside,
    /// The boundary runs through the tile: the quad must be clipped.
    Crossing,
}

/// Classify ordered corners against the signed cap latitude `pole_latitude`.
#[must_use]
pub fn classify_overlap(
    hemisphere: Hemisphere,
    corners: &[GeoPoint; 4],
    pole_latitude: f64,
) -> CapOverlap {
    let lmax = corners.iter().map(|c| c.latitude).fold(f64::MIN, f64::max);
    let lmin = corners.iter().map(|c| c.latitude).fold(f64::MAX, f64::min);

    let (outside, some_outside) = match hemisphere {
        Hemisphere::North => (lmax < pole_latitude, lmin < pole_latitude),
        Hemisphere::South => (lmin > pole_latitude, lmax > pole_latitude),
    };

    if outside {
        CapOverlap::Outside
    } else if some_outside {
        CapOverlap::Crossing
    } else {
        CapOverlap::Inside
    }
}
