//! Polar-cap geometry synthesis.
//!
//! Projections such as Mercator cannot represent latitudes beyond a fixed
//! limit, which leaves a hole around each pole. This crate builds the polygons
//! that close those holes: tiles reaching past the cap threshold are clipped
//! against the constant-latitude cap boundary, tessellated to match the
//! longitude grid of ordinary tiles, projected to the destination projection
//! and fanned into triangles.

mod align;
mod classify;
mod error;
mod intersect;
mod pipeline;
mod source;
mod style_bundle;
mod synthesizer;
mod tessellate;

pub use align::{align_longitudes, wrap_longitude_near};
pub use classify::{
    CapOverlap, CapSettings, Hemisphere, PolarCapThreshold, classify_overlap, touches_polar_cap,
};
pub use error::CapError;
pub use intersect::intersect_edge;
pub use pipeline::{CapPipeline, CapResult, CapTask};
pub use source::{PolarTileSource, SourceSettings};
pub use style_bundle::{POLAR_LAYER, StyleBundle, StyleContext};
pub use synthesizer::{
    CapGeometry, CapPolygon, CapRequest, CapSynthesizer, PolarTile, clip_to_cap, fan_indices,
};
pub use tessellate::{CapArc, MAX_GEOMETRY_LEVEL, cap_arc, geometry_level};
