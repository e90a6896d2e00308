//! Style system: rule-based selection of surface appearances.
//!
//! Style rules are loaded from a RON manifest. Each rule filters on a feature
//! environment (geometry type, layer, kind) and names the appearance to use
//! when it matches.

mod appearance;
mod error;
mod evaluator;
mod rules;

pub use appearance::{Appearance, AppearanceDef, Technique};
pub use error::StyleError;
pub use evaluator::{StyleEvaluator, StyleManifest};
pub use rules::{GeometryType, RuleFilter, StyleEnvironment, StyleRule};
