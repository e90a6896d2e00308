//! Cap boundary tessellation.
//!
//! Ordinary tiles at geometry level `g` subdivide their edges on a longitude
//! grid of `2^g` cells around the globe. The cap arc places its interior
//! vertices on the same grid so that cap and ordinary geometry meet without
//! cracks.

use polecap_geo::GeoPoint;

/// Finest geometry level used for the cap arc grid.
pub const MAX_GEOMETRY_LEVEL: u32 = 30;

/// Tolerance, in grid cells, for treating a cut longitude as on the grid.
const GRID_EPSILON: f64 = 1e-9;

/// Geometry level of a tile: `level - storage_level_offset + geometry_level_offset`,
/// clamped to `[0, MAX_GEOMETRY_LEVEL]`.
#[must_use]
pub fn geometry_level(level: u32, storage_level_offset: i32, geometry_level_offset: i32) -> u32 {
    let g = i64::from(level) - i64::from(storage_level_offset) + i64::from(geometry_level_offset);
    g.clamp(0, i64::from(MAX_GEOMETRY_LEVEL)) as u32
}

/// Iterator over the grid vertices strictly between two cut points on the
/// cap boundary, in increasing longitude.
#[derive(Clone, Debug)]
pub struct CapArc {
    pole_latitude: f64,
    step: f64,
    next: i64,
    end: i64,
}

impl Iterator for CapArc {
    type Item = GeoPoint;

    fn next(&mut self) -> Option<GeoPoint> {
        if self.next >= self.end {
            return None;
        }
        let longitude = self.next as f64 * self.step - 180.0;
        self.next += 1;
        Some(GeoPoint::surface(self.pole_latitude, longitude))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CapArc {}

/// Grid vertices along the cap boundary between `start` and `end`.
///
/// The start longitude is floored and the end longitude ceiled onto the grid
/// of `2^geometry_level` cells; every grid index strictly between the two is
/// emitted at `pole_latitude`. Cut points that already sit on the grid, up to
/// rounding noise, are therefore never duplicated.
#[must_use]
pub fn cap_arc(start: GeoPoint, end: GeoPoint, pole_latitude: f64, geometry_level: u32) -> CapArc {
    let subdivisions = 2f64.powi(geometry_level.min(MAX_GEOMETRY_LEVEL) as i32);
    let step = 360.0 / subdivisions;
    let first = ((start.longitude + 180.0) / step + GRID_EPSILON).floor() as i64;
    let last = ((end.longitude + 180.0) / step - GRID_EPSILON).ceil() as i64;
    CapArc {
        pole_latitude,
        step,
        next: first + 1,
        end: last,
    }
}
