//! Geographic primitives for polar-cap generation: coordinates, tile addressing,
//! planar world boxes, projections, tiling schemes and winding helpers.

mod geo_point;
mod projection;
mod tile_address;
mod tiling;
mod winding;
mod world_box;

pub use geo_point::{GeoBox, GeoPoint};
pub use projection::{
    EARTH_EQUATORIAL_RADIUS, EquirectangularProjection, MERCATOR_MAXIMUM_LATITUDE,
    MercatorProjection, Projection, SphereProjection,
};
pub use tile_address::TileAddress;
pub use tiling::{GeographicTilingScheme, TilingScheme};
pub use winding::{emit_triangle, signed_area_lon_lat, triangle_winds_outward};
pub use world_box::WorldBox;
