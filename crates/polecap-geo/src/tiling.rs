//! Tiling schemes: map tile addresses to world and geographic boxes.

use glam::DVec3;

use crate::{EquirectangularProjection, GeoBox, Projection, TileAddress, WorldBox};

/// Maps tile addresses to bounding boxes in a projection's world space.
pub trait TilingScheme: Send + Sync {
    /// The projection whose world space the tiles partition.
    fn projection(&self) -> &dyn Projection;

    /// Planar world box of a tile.
    fn world_box(&self, address: TileAddress) -> WorldBox;

    /// Geographic box of a tile, obtained by unprojecting its world box.
    fn geo_box(&self, address: TileAddress) -> GeoBox {
        let world = self.world_box(address);
        let projection = self.projection();
        GeoBox::from_corners(projection.unproject(world.min), projection.unproject(world.max))
    }
}

/// Quadtree over the equirectangular world: level `l` splits the globe into
/// `2^l` columns of longitude and `2^l` rows of latitude.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeographicTilingScheme {
    projection: EquirectangularProjection,
}

impl GeographicTilingScheme {
    pub fn new(projection: EquirectangularProjection) -> Self {
        Self { projection }
    }
}

impl TilingScheme for GeographicTilingScheme {
    fn projection(&self) -> &dyn Projection {
        &self.projection
    }

    fn world_box(&self, address: TileAddress) -> WorldBox {
        let extent = self.projection.world_extent();
        let size = extent.size();
        let (x0, y0, x1, y1) = address.unit_bounds();
        WorldBox::new(
            DVec3::new(extent.min.x + x0 * size.x, extent.min.y + y0 * size.y, 0.0),
            DVec3::new(extent.min.x + x1 * size.x, extent.min.y + y1 * size.y, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn test_root_covers_globe() {
        let scheme = GeographicTilingScheme::default();
        let geo = scheme.geo_box(TileAddress::root());
        assert_close(geo.north, 90.0);
        assert_close(geo.south, -90.0);
        assert_close(geo.east, 180.0);
        assert_close(geo.west, -180.0);
    }

    #[test]
    fn test_level_one_rows() {
        let scheme = GeographicTilingScheme::default();
        let north = scheme.geo_box(TileAddress::new(1, 1, 0));
        assert_close(north.south, 0.0);
        assert_close(north.north, 90.0);
        assert_close(north.west, -180.0);
        assert_close(north.east, 0.0);

        let south = scheme.geo_box(TileAddress::new(1, 0, 1));
        assert_close(south.south, -90.0);
        assert_close(south.north, 0.0);
        assert_close(south.west, 0.0);
        assert_close(south.east, 180.0);
    }

    #[test]
    fn test_children_partition_parent_world_box() {
        let scheme = GeographicTilingScheme::default();
        let parent = TileAddress::new(3, 5, 2);
        let parent_box = scheme.world_box(parent);
        let children = parent.children().expect("children");
        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for child in children {
            let b = scheme.world_box(child);
            min = min.min(b.min);
            max = max.max(b.max);
        }
        assert!((min - parent_box.min).length() < 1e-6);
        assert!((max - parent_box.max).length() < 1e-6);
    }
}
