//! Longitude alignment: puts a quad's corners on one longitude branch so that
//! edges can be interpolated without crossing the ±180° seam.

use polecap_geo::GeoPoint;

/// Move `longitude` by a multiple of 360° to the branch nearest `reference`.
#[must_use]
pub fn wrap_longitude_near(longitude: f64, reference: f64) -> f64 {
    longitude - 360.0 * ((longitude - reference) / 360.0).round()
}

/// Align every corner longitude to the branch nearest `reference`.
///
/// A corner exactly on a pole has no meaningful longitude and takes the
/// longitude of its first non-pole ring neighbour (previous, then next).
pub fn align_longitudes(corners: &mut [GeoPoint; 4], reference: GeoPoint) {
    for corner in corners.iter_mut() {
        corner.longitude = wrap_longitude_near(corner.longitude, reference.longitude);
    }

    for i in 0..corners.len() {
        if !corners[i].is_pole() {
            continue;
        }
        let prev = corners[(i + 3) % 4];
        let next = corners[(i + 1) % 4];
        if let Some(neighbour) = [prev, next].into_iter().find(|p| !p.is_pole()) {
            corners[i].longitude = neighbour.longitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_near_reference() {
        assert_eq!(wrap_longitude_near(-179.0, 179.0), 181.0);
        assert_eq!(wrap_longitude_near(179.0, -179.0), -181.0);
        assert_eq!(wrap_longitude_near(10.0, 0.0), 10.0);
        assert_eq!(wrap_longitude_near(370.0, 0.0), 10.0);
        assert_eq!(wrap_longitude_near(-350.0, 0.0), 10.0);
    }

    #[test]
    fn test_corners_across_antimeridian() {
        let mut corners = [
            GeoPoint::surface(84.0, 170.0),
            GeoPoint::surface(84.0, -170.0),
            GeoPoint::surface(86.0, -170.0),
            GeoPoint::surface(86.0, 170.0),
        ];
        align_longitudes(&mut corners, GeoPoint::surface(85.0, 180.0));
        let lons: Vec<f64> = corners.iter().map(|c| c.longitude).collect();
        assert_eq!(lons, [170.0, 190.0, 190.0, 170.0]);
    }

    #[test]
    fn test_pole_corner_inherits_previous_neighbour() {
        let mut corners = [
            GeoPoint::surface(80.0, 10.0),
            GeoPoint::surface(80.0, 20.0),
            GeoPoint::surface(90.0, 123.0),
            GeoPoint::surface(90.0, -77.0),
        ];
        align_longitudes(&mut corners, GeoPoint::surface(85.0, 15.0));
        // Corner 2 follows corner 1; corner 3's previous neighbour is a pole,
        // so it follows corner 0.
        assert_eq!(corners[2].longitude, 20.0);
        assert_eq!(corners[3].longitude, 10.0);
        assert_eq!(corners[2].latitude, 90.0);
    }

    #[test]
    fn test_south_pole_corner() {
        let mut corners = [
            GeoPoint::surface(-90.0, 45.0),
            GeoPoint::surface(-80.0, -30.0),
            GeoPoint::surface(-80.0, -20.0),
            GeoPoint::surface(-85.0, -25.0),
        ];
        align_longitudes(&mut corners, GeoPoint::surface(-85.0, -25.0));
        assert_eq!(corners[0].longitude, -25.0);
    }

    #[test]
    fn test_all_pole_corners_keep_wrapped_longitudes() {
        let mut corners = [GeoPoint::surface(90.0, 400.0); 4];
        align_longitudes(&mut corners, GeoPoint::surface(90.0, 0.0));
        assert!(corners.iter().all(|c| c.longitude == 40.0));
    }
}
