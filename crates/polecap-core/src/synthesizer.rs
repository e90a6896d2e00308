//! Polar tile geometry synthesis: classification, clipping against the cap
//! boundary, projection to the destination space and triangle-fan emission.

use std::sync::Arc;

use glam::DVec3;
use polecap_geo::{GeoBox, GeoPoint, Projection, TileAddress, WorldBox, emit_triangle};
use polecap_style::Appearance;

use crate::{
    CapError, CapOverlap, CapSettings, Hemisphere, StyleBundle, align_longitudes, cap_arc,
    classify_overlap, intersect_edge,
};

/// Everything the synthesizer needs to know about one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapRequest {
    pub address: TileAddress,
    /// Geographic box, used for hemisphere classification.
    pub geo_box: GeoBox,
    /// Tile box in the source projection's world space.
    pub world_box: WorldBox,
    /// Tile center in destination space; output positions are relative to it.
    pub center: DVec3,
    /// Tessellation density of the cap arc.
    pub geometry_level: u32,
}

/// Ordered cap polygon in geographic coordinates.
///
/// North polygons wind counter-clockwise in (longitude, latitude), South
/// polygons the mirrored way. A clipped polygon starts at the corner nearest
/// the pole.
#[derive(Clone, Debug, PartialEq)]
pub struct CapPolygon {
    pub hemisphere: Hemisphere,
    pub overlap: CapOverlap,
    pub points: Vec<GeoPoint>,
}

/// Tile-local positions plus a triangle fan anchored at vertex 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapGeometry {
    pub positions: Vec<DVec3>,
    pub indices: Vec<u32>,
}

impl CapGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triplets of the fan.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// A synthesized cap surface and the appearance it is drawn with.
#[derive(Clone, Debug)]
pub struct PolarTile {
    pub address: TileAddress,
    pub hemisphere: Hemisphere,
    pub geometry: CapGeometry,
    pub appearance: Arc<Appearance>,
}

/// Clip an ordered corner quad against the cap boundary.
///
/// `corners` must already be in `hemisphere`'s winding (see
/// [`Hemisphere::order_corners`]). `reference` is the unprojected tile center
/// used to align longitudes. Returns `None` when the quad lies entirely
/// equator-side of the boundary.
///
/// For a quad crossing the boundary, the corners are visited from the one
/// nearest the pole, `a`, through its neighbours `b` and `d` and the opposite
/// corner `c`. The boundary is cut on `b–c` when `b` is itself beyond the
/// projection's representable latitude, on `a–b` otherwise; `d` likewise.
/// Corners beyond that latitude are kept around the arc between the cuts.
///
/// # Errors
///
/// Returns [`CapError::InvariantViolation`] if a selected edge does not cross
/// the boundary, which happens when a corner lies between the cap threshold
/// and the projection limit.
pub fn clip_to_cap(
    corners: [GeoPoint; 4],
    hemisphere: Hemisphere,
    reference: GeoPoint,
    settings: CapSettings,
    geometry_level: u32,
) -> Result<Option<CapPolygon>, CapError> {
    let pole_latitude = hemisphere.pole_latitude(settings.threshold);
    let overlap = classify_overlap(hemisphere, &corners, pole_latitude);

    let points = match overlap {
        CapOverlap::Outside => return Ok(None),
        CapOverlap::Inside => corners.to_vec(),
        CapOverlap::Crossing => {
            let mut aligned = corners;
            align_longitudes(&mut aligned, reference);

            let offset = hemisphere.nearest_corner(&aligned);
            let at = |k: usize| aligned[(offset + k) % 4];
            let (a, b, c, d) = (at(0), at(1), at(2), at(3));

            let b_beyond = hemisphere.is_beyond(b.latitude, settings.max_latitude);
            let d_beyond = hemisphere.is_beyond(d.latitude, settings.max_latitude);

            let cut_start = if b_beyond {
                intersect_edge(pole_latitude, b, c)?
            } else {
                intersect_edge(pole_latitude, a, b)?
            };
            let cut_end = if d_beyond {
                intersect_edge(pole_latitude, d, c)?
            } else {
                intersect_edge(pole_latitude, a, d)?
            };

            let arc = cap_arc(cut_start, cut_end, pole_latitude, geometry_level);
            let mut points = Vec::with_capacity(arc.len() + 5);
            points.push(a);
            if b_beyond {
                points.push(b);
            }
            points.push(cut_start);
            points.extend(arc);
            points.push(cut_end);
            if d_beyond {
                points.push(d);
            }
            points
        }
    };

    Ok(Some(CapPolygon {
        hemisphere,
        overlap,
        points,
    }))
}

/// Triangle fan over `count` vertices anchored at vertex 0.
///
/// North fans use `(0, i, i + 1)`, South fans the mirrored `(0, i + 1, i)`.
pub fn fan_indices(count: usize, hemisphere: Hemisphere) -> Vec<u32> {
    let flip = hemisphere == Hemisphere::South;
    let count = count as u32;
    let mut indices = Vec::with_capacity(count.saturating_sub(2) as usize * 3);
    for i in 1..count.saturating_sub(1) {
        indices.extend_from_slice(&emit_triangle(0, i, i + 1, flip));
    }
    indices
}

/// Builds polar cap geometry from a source (tiling) projection and a
/// destination (map) projection.
pub struct CapSynthesizer<'a> {
    source: &'a dyn Projection,
    destination: &'a dyn Projection,
    settings: CapSettings,
}

impl<'a> CapSynthesizer<'a> {
    pub fn new(
        source: &'a dyn Projection,
        destination: &'a dyn Projection,
        settings: CapSettings,
    ) -> Self {
        Self {
            source,
            destination,
            settings,
        }
    }

    pub fn settings(&self) -> CapSettings {
        self.settings
    }

    /// Synthesize the cap surface for one tile.
    ///
    /// Returns `Ok(None)` when the hemisphere has no appearance in `style` or
    /// when the tile lies entirely outside the cap.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the clip.
    pub fn synthesize(
        &self,
        request: &CapRequest,
        style: &StyleBundle,
    ) -> Result<Option<PolarTile>, CapError> {
        let hemisphere = Hemisphere::of(&request.geo_box);
        let Some(appearance) = style.appearance(hemisphere) else {
            tracing::debug!(
                "No appearance for {}, skipping tile {}",
                hemisphere.style_kind(),
                request.address
            );
            return Ok(None);
        };

        let Some(geometry) = self.synthesize_geometry(request, hemisphere)? else {
            return Ok(None);
        };

        Ok(Some(PolarTile {
            address: request.address,
            hemisphere,
            geometry,
            appearance: Arc::clone(appearance),
        }))
    }

    /// Geometry only, for an explicitly chosen hemisphere.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the clip.
    pub fn synthesize_geometry(
        &self,
        request: &CapRequest,
        hemisphere: Hemisphere,
    ) -> Result<Option<CapGeometry>, CapError> {
        let Some(polygon) = self.cap_polygon(request, hemisphere)? else {
            tracing::trace!("Tile {} lies outside the cap", request.address);
            return Ok(None);
        };

        let geometry = self.to_geometry(&polygon, request.center);
        tracing::trace!(
            "Tile {}: {:?} {:?}, {} vertices, {} triangles",
            request.address,
            polygon.hemisphere,
            polygon.overlap,
            geometry.vertex_count(),
            geometry.triangle_count()
        );
        Ok(Some(geometry))
    }

    /// The cap polygon of a tile in geographic coordinates.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the clip.
    pub fn cap_polygon(
        &self,
        request: &CapRequest,
        hemisphere: Hemisphere,
    ) -> Result<Option<CapPolygon>, CapError> {
        let corners = request
            .world_box
            .planar_corners()
            .map(|corner| self.source.unproject(corner));
        let reference = self.source.unproject(request.world_box.center());
        clip_to_cap(
            hemisphere.order_corners(corners),
            hemisphere,
            reference,
            self.settings,
            request.geometry_level,
        )
    }

    /// Project a polygon to destination space relative to `center` and fan it.
    pub fn to_geometry(&self, polygon: &CapPolygon, center: DVec3) -> CapGeometry {
        let positions = polygon
            .points
            .iter()
            .map(|&p| self.destination.project(p) - center)
            .collect::<Vec<_>>();
        let indices = fan_indices(positions.len(), polygon.hemisphere);
        CapGeometry { positions, indices }
    }
}
