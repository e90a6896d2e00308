//! Edge Intersector: where a tile edge crosses the cap boundary latitude.

use polecap_geo::GeoPoint;

use crate::CapError;

/// Point where the edge `a`–`b` crosses `target_latitude`, interpolating
/// longitude linearly in latitude.
///
/// # Errors
///
/// Returns [`CapError::InvariantViolation`] unless `target_latitude` lies
/// strictly between the endpoint latitudes. This also rejects horizontal
/// edges and NaN input.
pub fn intersect_edge(
    target_latitude: f64,
    a: GeoPoint,
    b: GeoPoint,
) -> Result<GeoPoint, CapError> {
    let lo = a.latitude.min(b.latitude);
    let hi = a.latitude.max(b.latitude);
    if !(lo < target_latitude && target_latitude < hi) {
        return Err(CapError::InvariantViolation {
            target: target_latitude,
            lat_a: a.latitude,
            lat_b: b.latitude,
        });
    }

    let t = (target_latitude - a.latitude) / (b.latitude - a.latitude);
    Ok(GeoPoint::surface(
        target_latitude,
        a.longitude + t * (b.longitude - a.longitude),
    ))
}
