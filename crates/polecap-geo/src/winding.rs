//! Winding order helpers for globe meshes.
//!
//! Triangles must wind counter-clockwise when viewed from outside the globe so
//! that backface culling keeps them.

use glam::DVec3;

use crate::GeoPoint;

/// Check if a triangle has outward-facing winding order.
///
/// Returns `true` if the triangle's normal (via cross product) points away
/// from the globe center, i.e. has a positive dot product with the centroid.
///
/// `v0`, `v1`, `v2` are globe-centered positions.
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Emit a triangle, swapping `v1` and `v2` when `flip` is set.
pub fn emit_triangle(v0: u32, v1: u32, v2: u32, flip: bool) -> [u32; 3] {
    if flip { [v0, v2, v1] } else { [v0, v1, v2] }
}

/// Signed area of a closed ring in the (longitude, latitude) plane.
///
/// Positive for counter-clockwise rings (east then north), negative for
/// clockwise rings.
pub fn signed_area_lon_lat(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        twice_area += p.longitude * q.latitude - q.longitude * p.latitude;
    }
    twice_area * 0.5
}
