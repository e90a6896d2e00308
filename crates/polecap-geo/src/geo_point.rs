//! Geographic coordinates and bounding boxes, in degrees.

use serde::{Deserialize, Serialize};

/// A geographic position.
///
/// Latitude is in \[-90, 90\]. Longitude is left free: the aligner may move it
/// outside \[-180, 180\] so that neighbouring corners share one branch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in meters above the reference surface.
    pub altitude: f64,
}

impl GeoPoint {
    /// Construct a point, clamping latitude to \[-90, 90\].
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude,
            altitude,
        }
    }

    /// A point on the reference surface.
    #[must_use]
    pub fn surface(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }

    /// Returns true if this point sits exactly on a pole, where longitude has
    /// no meaning.
    #[must_use]
    pub fn is_pole(&self) -> bool {
        self.latitude.abs() == 90.0
    }
}

/// Geographic bounding box of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBox {
    /// Build a box from its edges. `south`/`north` and `west`/`east` are
    /// swapped if given in the wrong order.
    #[must_use]
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north: north.max(south),
            south: north.min(south),
            east: east.max(west),
            west: east.min(west),
        }
    }

    /// Smallest box containing both points.
    #[must_use]
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self::new(a.latitude, b.latitude, a.longitude, b.longitude)
    }

    /// Center of the box on the reference surface.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::surface(
            (self.north + self.south) * 0.5,
            (self.east + self.west) * 0.5,
        )
    }

    /// Extent in latitude (degrees).
    #[must_use]
    pub fn latitude_span(&self) -> f64 {
        self.north - self.south
    }

    /// Extent in longitude (degrees).
    #[must_use]
    pub fn longitude_span(&self) -> f64 {
        self.east - self.west
    }
}
