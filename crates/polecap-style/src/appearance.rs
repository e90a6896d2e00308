//! Appearance descriptors and the handles built from them.

use serde::{Deserialize, Serialize};

use crate::StyleError;

/// How a surface with this appearance should be shaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    /// Flat unlit fill.
    #[default]
    Fill,
    /// Lit surface.
    Standard,
}

/// Appearance descriptor as written in a style manifest.
///
/// All fields are validated and clamped via [`AppearanceDef::validated`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceDef {
    /// Human-readable name (e.g., "arctic_ice").
    pub name: String,

    /// Shading technique.
    pub technique: Technique,

    /// Base color in linear RGBA. Each component is clamped to `[0.0, 1.0]`.
    pub color: [f32; 4],

    /// Opacity: 1.0 = fully opaque. Clamped to `[0.0, 1.0]`.
    pub opacity: f32,

    /// Draw order relative to other surfaces of the same tile.
    pub render_order: i32,
}

impl Default for AppearanceDef {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            technique: Technique::Fill,
            color: [0.8, 0.8, 0.8, 1.0],
            opacity: 1.0,
            render_order: 0,
        }
    }
}

impl AppearanceDef {
    /// Validates and clamps all fields to their legal ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::EmptyName`] if the name is empty.
    pub fn validated(mut self) -> Result<Self, StyleError> {
        if self.name.is_empty() {
            return Err(StyleError::EmptyName);
        }
        for c in &mut self.color {
            *c = c.clamp(0.0, 1.0);
        }
        self.opacity = self.opacity.clamp(0.0, 1.0);
        Ok(self)
    }
}

/// Renderable appearance handle, built from the first matching descriptor.
///
/// Handles are shared via `Arc` between the style bundle and produced tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    def: AppearanceDef,
}

impl Appearance {
    /// Build a handle from a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] if the descriptor does not validate.
    pub fn from_def(def: AppearanceDef) -> Result<Self, StyleError> {
        Ok(Self {
            def: def.validated()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn technique(&self) -> Technique {
        self.def.technique
    }

    pub fn render_order(&self) -> i32 {
        self.def.render_order
    }

    /// Base color with opacity folded into alpha.
    pub fn premultiplied_color(&self) -> [f32; 4] {
        let [r, g, b, a] = self.def.color;
        let alpha = a * self.def.opacity;
        [r * alpha, g * alpha, b * alpha, alpha]
    }

    /// The descriptor this handle was built from.
    pub fn def(&self) -> &AppearanceDef {
        &self.def
    }
}
