//! Polar tile source: decides which tiles carry cap geometry and produces it.

use std::sync::Arc;

use glam::DVec3;
use polecap_geo::{GeoBox, Projection, TileAddress, TilingScheme};

use crate::{
    CapError, CapRequest, CapSettings, CapSynthesizer, PolarTile, StyleBundle, StyleContext,
    geometry_level, touches_polar_cap,
};

/// Host settings of a polar tile source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceSettings {
    pub min_zoom_level: u32,
    pub max_zoom_level: u32,
    /// Offset between display zoom and storage level.
    pub storage_level_offset: i32,
    /// Extra geometry subdivision relative to the storage level.
    pub geometry_level_offset: i32,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            min_zoom_level: 1,
            max_zoom_level: 20,
            storage_level_offset: -1,
            geometry_level_offset: -1,
        }
    }
}

/// Produces polar cap tiles for a tiling scheme and a destination projection.
///
/// Tile boxes come from `scheme`, whose projection is also the source
/// projection used to unproject tile corners. Geometry is emitted in the
/// `destination` projection, relative to each tile's center.
pub struct PolarTileSource {
    scheme: Arc<dyn TilingScheme>,
    destination: Arc<dyn Projection>,
    cap: CapSettings,
    settings: SourceSettings,
    style: StyleContext,
}

impl PolarTileSource {
    pub fn new(
        scheme: Arc<dyn TilingScheme>,
        destination: Arc<dyn Projection>,
        cap: CapSettings,
        settings: SourceSettings,
    ) -> Self {
        Self {
            scheme,
            destination,
            cap,
            settings,
            style: StyleContext::default(),
        }
    }

    pub fn cap_settings(&self) -> CapSettings {
        self.cap
    }

    pub fn settings(&self) -> SourceSettings {
        self.settings
    }

    pub fn scheme(&self) -> &dyn TilingScheme {
        self.scheme.as_ref()
    }

    pub fn destination(&self) -> &dyn Projection {
        self.destination.as_ref()
    }

    /// Swap in a new style, returning the previous one.
    pub fn set_style(&self, bundle: StyleBundle) -> Arc<StyleBundle> {
        tracing::debug!("Replacing polar style");
        self.style.replace(bundle)
    }

    /// Snapshot of the current style.
    pub fn style(&self) -> Arc<StyleBundle> {
        self.style.current()
    }

    fn touches(&self, address: TileAddress) -> bool {
        touches_polar_cap(&self.scheme.geo_box(address), self.cap.threshold)
    }

    /// A tile is rendered at exactly its own zoom level, never at level 0,
    /// and only if it reaches into a cap.
    pub fn should_render(&self, zoom_level: u32, address: TileAddress) -> bool {
        zoom_level == address.level && address.level >= 1 && self.touches(address)
    }

    /// Children of a tile are worth visiting while the zoom level has not
    /// been passed and the tile reaches into a cap.
    pub fn should_subdivide(&self, zoom_level: u32, address: TileAddress) -> bool {
        zoom_level >= address.level && self.touches(address)
    }

    pub fn geometry_level(&self, address: TileAddress) -> u32 {
        geometry_level(
            address.level,
            self.settings.storage_level_offset,
            self.settings.geometry_level_offset,
        )
    }

    /// Tile center in destination space.
    pub fn tile_center(&self, geo_box: &GeoBox) -> DVec3 {
        self.destination.project(geo_box.center())
    }

    /// Assemble the synthesizer input for a tile.
    pub fn request(&self, address: TileAddress, geo_box: GeoBox, center: DVec3) -> CapRequest {
        CapRequest {
            address,
            geo_box,
            world_box: self.scheme.world_box(address),
            center,
            geometry_level: self.geometry_level(address),
        }
    }

    /// Synthesize a tile with the current style.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the synthesizer.
    pub fn synthesize(
        &self,
        address: TileAddress,
        geo_box: GeoBox,
        center: DVec3,
    ) -> Result<Option<PolarTile>, CapError> {
        let style = self.style();
        self.synthesize_with(&self.request(address, geo_box, center), &style)
    }

    /// Synthesize a tile against an explicit style snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the synthesizer.
    pub fn synthesize_with(
        &self,
        request: &CapRequest,
        style: &StyleBundle,
    ) -> Result<Option<PolarTile>, CapError> {
        CapSynthesizer::new(self.scheme.projection(), self.destination.as_ref(), self.cap)
            .synthesize(request, style)
    }

    /// Synthesize a tile, deriving its geo box and center from the scheme.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the synthesizer.
    pub fn generate(&self, address: TileAddress) -> Result<Option<PolarTile>, CapError> {
        let style = self.style();
        self.generate_with(address, &style)
    }

    /// Like [`Self::generate`], with an explicit style snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`CapError`] from the synthesizer.
    pub fn generate_with(
        &self,
        address: TileAddress,
        style: &StyleBundle,
    ) -> Result<Option<PolarTile>, CapError> {
        let geo_box = self.scheme.geo_box(address);
        let center = self.tile_center(&geo_box);
        self.synthesize_with(&self.request(address, geo_box, center), style)
    }

    /// Every tile address rendered at `zoom_level`, in depth-first order.
    pub fn collect_polar_tiles(&self, zoom_level: u32) -> Vec<TileAddress> {
        let mut tiles = Vec::new();
        if zoom_level < self.settings.min_zoom_level || zoom_level > self.settings.max_zoom_level
        {
            tracing::debug!(
                "Zoom level {zoom_level} outside [{}, {}]",
                self.settings.min_zoom_level,
                self.settings.max_zoom_level
            );
            return tiles;
        }

        let mut stack = vec![TileAddress::root()];
        while let Some(address) = stack.pop() {
            if self.should_render(zoom_level, address) {
                tiles.push(address);
            }
            if address.level < zoom_level
                && self.should_subdivide(zoom_level, address)
                && let Some(children) = address.children()
            {
                stack.extend(children.into_iter().rev());
            }
        }
        tracing::debug!("{} polar tiles at zoom level {zoom_level}", tiles.len());
        tiles
    }
}
