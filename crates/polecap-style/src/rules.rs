//! Style rules and the feature environment they are matched against.

use serde::{Deserialize, Serialize};

use crate::AppearanceDef;

/// Geometry type of a styled feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    Line,
    Polygon,
}

/// Attributes of a feature presented to the style rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleEnvironment {
    pub geometry_type: GeometryType,
    pub layer: String,
    pub kind: String,
}

impl StyleEnvironment {
    /// Environment for a polygon feature on `layer` with the given `kind`.
    pub fn polygon(layer: &str, kind: &str) -> Self {
        Self {
            geometry_type: GeometryType::Polygon,
            layer: layer.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Conditions a rule places on the environment. Absent fields match anything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFilter {
    pub geometry_type: Option<GeometryType>,
    pub layer: Option<String>,
    pub kind: Option<String>,
}

impl RuleFilter {
    /// Returns true if every present condition holds for `env`.
    pub fn matches(&self, env: &StyleEnvironment) -> bool {
        self.geometry_type.is_none_or(|g| g == env.geometry_type)
            && self.layer.as_deref().is_none_or(|l| l == env.layer)
            && self.kind.as_deref().is_none_or(|k| k == env.kind)
    }
}

/// A single style rule: filter plus the appearance it selects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    #[serde(default)]
    pub when: RuleFilter,
    pub appearance: AppearanceDef,
}
