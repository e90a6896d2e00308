//! Projections between geographic coordinates and world space.
//!
//! Three projections are provided:
//! - **Equirectangular**: planar, linear in latitude and longitude. Covers the
//!   poles, so it serves as the source projection of the geographic tiling scheme.
//! - **Mercator**: planar, conformal, limited to [`MERCATOR_MAXIMUM_LATITUDE`].
//!   Its limit is what leaves a hole at the poles.
//! - **Sphere**: Earth-centered Cartesian positions on a spherical globe.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::DVec3;

use crate::{GeoPoint, WorldBox};

/// Equatorial radius of the Earth in meters.
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// Highest latitude the Mercator projection maps into a square world,
/// `atan(sinh(π))` in degrees.
pub const MERCATOR_MAXIMUM_LATITUDE: f64 = 85.051_128_779_806_59;

/// Bidirectional mapping between geographic coordinates and world space.
pub trait Projection: Send + Sync {
    /// Geographic position to world space.
    fn project(&self, geo: GeoPoint) -> DVec3;

    /// World-space position back to geographic coordinates.
    fn unproject(&self, world: DVec3) -> GeoPoint;

    /// Largest latitude magnitude this projection represents faithfully.
    fn maximum_latitude(&self) -> f64 {
        90.0
    }

    /// World-space box covering everything the projection can represent.
    fn world_extent(&self) -> WorldBox;
}

/// Plate carrée: `x = R·λ`, `y = R·φ`, `z = altitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquirectangularProjection {
    pub radius: f64,
}

impl Default for EquirectangularProjection {
    fn default() -> Self {
        Self {
            radius: EARTH_EQUATORIAL_RADIUS,
        }
    }
}

impl Projection for EquirectangularProjection {
    fn project(&self, geo: GeoPoint) -> DVec3 {
        DVec3::new(
            self.radius * geo.longitude.to_radians(),
            self.radius * geo.latitude.to_radians(),
            geo.altitude,
        )
    }

    fn unproject(&self, world: DVec3) -> GeoPoint {
        GeoPoint::new(
            (world.y / self.radius).to_degrees(),
            (world.x / self.radius).to_degrees(),
            world.z,
        )
    }

    fn world_extent(&self) -> WorldBox {
        let half_x = PI * self.radius;
        let half_y = FRAC_PI_2 * self.radius;
        WorldBox::new(
            DVec3::new(-half_x, -half_y, 0.0),
            DVec3::new(half_x, half_y, 0.0),
        )
    }
}

/// Spherical Mercator: `x = R·λ`, `y = R·ln(tan(π/4 + φ/2))`.
///
/// Latitudes beyond [`MERCATOR_MAXIMUM_LATITUDE`] are clamped on projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorProjection {
    pub radius: f64,
}

impl Default for MercatorProjection {
    fn default() -> Self {
        Self {
            radius: EARTH_EQUATORIAL_RADIUS,
        }
    }
}

impl Projection for MercatorProjection {
    fn project(&self, geo: GeoPoint) -> DVec3 {
        let lat = geo
            .latitude
            .clamp(-MERCATOR_MAXIMUM_LATITUDE, MERCATOR_MAXIMUM_LATITUDE)
            .to_radians();
        DVec3::new(
            self.radius * geo.longitude.to_radians(),
            self.radius * (FRAC_PI_4 + lat * 0.5).tan().ln(),
            geo.altitude,
        )
    }

    fn unproject(&self, world: DVec3) -> GeoPoint {
        let lat = 2.0 * (world.y / self.radius).exp().atan() - FRAC_PI_2;
        GeoPoint::new(
            lat.to_degrees(),
            (world.x / self.radius).to_degrees(),
            world.z,
        )
    }

    fn maximum_latitude(&self) -> f64 {
        MERCATOR_MAXIMUM_LATITUDE
    }

    fn world_extent(&self) -> WorldBox {
        let half = PI * self.radius;
        WorldBox::new(DVec3::new(-half, -half, 0.0), DVec3::new(half, half, 0.0))
    }
}

/// Globe projection: Earth-centered positions on a sphere of `radius`.
///
/// +Z points to the north pole, +X to (0°, 0°), +Y to (0°, 90°E).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereProjection {
    pub radius: f64,
}

impl Default for SphereProjection {
    fn default() -> Self {
        Self {
            radius: EARTH_EQUATORIAL_RADIUS,
        }
    }
}

impl Projection for SphereProjection {
    fn project(&self, geo: GeoPoint) -> DVec3 {
        let lat = geo.latitude.to_radians();
        let lon = geo.longitude.to_radians();
        let r = self.radius + geo.altitude;
        DVec3::new(r * lat.cos() * lon.cos(), r * lat.cos() * lon.sin(), r * lat.sin())
    }

    fn unproject(&self, world: DVec3) -> GeoPoint {
        let r = world.length();
        if r == 0.0 {
            return GeoPoint::new(0.0, 0.0, -self.radius);
        }
        let lat = (world.z / r).clamp(-1.0, 1.0).asin();
        let lon = world.y.atan2(world.x);
        GeoPoint::new(lat.to_degrees(), lon.to_degrees(), r - self.radius)
    }

    fn world_extent(&self) -> WorldBox {
        WorldBox::new(DVec3::splat(-self.radius), DVec3::splat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_geo_close(a: GeoPoint, b: GeoPoint, eps: f64) {
        assert!(
            (a.latitude - b.latitude).abs() < eps
                && (a.longitude - b.longitude).abs() < eps
                && (a.altitude - b.altitude).abs() < 1e-6,
            "expected {a:?} ~= {b:?}"
        );
    }

    fn samples() -> Vec<GeoPoint> {
        let mut points = Vec::new();
        for lat in [-89.5, -60.0, -12.25, 0.0, 33.3, 80.0, 89.9] {
            for lon in [-179.0, -90.0, 0.0, 45.5, 179.5] {
                points.push(GeoPoint::new(lat, lon, 0.0));
            }
        }
        points
    }

    #[test]
    fn test_equirectangular_round_trip() {
        let proj = EquirectangularProjection::default();
        for p in samples() {
            assert_geo_close(proj.unproject(proj.project(p)), p, EPSILON);
        }
    }

    #[test]
    fn test_mercator_round_trip_below_limit() {
        let proj = MercatorProjection::default();
        for p in samples()
            .into_iter()
            .filter(|p| p.latitude.abs() < MERCATOR_MAXIMUM_LATITUDE)
        {
            assert_geo_close(proj.unproject(proj.project(p)), p, 1e-7);
        }
    }

    #[test]
    fn test_sphere_round_trip() {
        let proj = SphereProjection::default();
        for p in samples() {
            assert_geo_close(proj.unproject(proj.project(p)), p, EPSILON);
        }
    }

    #[test]
    fn test_mercator_limit_maps_to_square_world() {
        let proj = MercatorProjection::default();
        let top = proj.project(GeoPoint::surface(MERCATOR_MAXIMUM_LATITUDE, 0.0));
        let extent = proj.world_extent();
        assert!((top.y - extent.max.y).abs() / extent.max.y < 1e-9);
        assert!((MERCATOR_MAXIMUM_LATITUDE - PI.sinh().atan().to_degrees()).abs() < 1e-12);
    }

    #[test]
    fn test_mercator_clamps_beyond_limit() {
        let proj = MercatorProjection::default();
        let pole = proj.project(GeoPoint::surface(90.0, 0.0));
        assert!(pole.y.is_finite());
        assert_eq!(proj.maximum_latitude(), MERCATOR_MAXIMUM_LATITUDE);
    }

    #[test]
    fn test_equirectangular_extent_matches_corners() {
        let proj = EquirectangularProjection::default();
        let extent = proj.world_extent();
        let ne = proj.unproject(extent.max);
        let sw = proj.unproject(extent.min);
        assert!((ne.latitude - 90.0).abs() < EPSILON);
        assert!((ne.longitude - 180.0).abs() < EPSILON);
        assert!((sw.latitude + 90.0).abs() < EPSILON);
        assert!((sw.longitude + 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_sphere_axes() {
        let proj = SphereProjection { radius: 1.0 };
        assert!((proj.project(GeoPoint::surface(90.0, 0.0)) - DVec3::Z).length() < EPSILON);
        assert!((proj.project(GeoPoint::surface(0.0, 0.0)) - DVec3::X).length() < EPSILON);
        assert!((proj.project(GeoPoint::surface(0.0, 90.0)) - DVec3::Y).length() < EPSILON);
    }
}
