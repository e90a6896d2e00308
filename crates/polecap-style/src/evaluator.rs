//! Style evaluator: ordered rule matching over a RON manifest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AppearanceDef, StyleEnvironment, StyleError, StyleRule};

/// Top-level RON manifest for style rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleManifest {
    #[serde(default)]
    pub rules: Vec<StyleRule>,
}

/// Evaluates style rules against feature environments.
///
/// Rules keep manifest order; evaluation returns every match in that order.
/// The evaluator is immutable after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleEvaluator {
    rules: Vec<StyleRule>,
}

impl StyleEvaluator {
    /// Build an evaluator, validating every rule's appearance.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] if an appearance fails validation.
    pub fn new(rules: Vec<StyleRule>) -> Result<Self, StyleError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                Ok(StyleRule {
                    when: rule.when,
                    appearance: rule.appearance.validated()?,
                })
            })
            .collect::<Result<Vec<_>, StyleError>>()?;
        Ok(Self { rules })
    }

    /// Load the evaluator from a RON manifest file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] on I/O, parse, or validation failures.
    pub fn from_ron(path: &Path) -> Result<Self, StyleError> {
        let contents = std::fs::read_to_string(path)?;
        let evaluator = Self::from_ron_str(&contents)?;
        tracing::debug!(
            "Loaded {} style rules from {}",
            evaluator.len(),
            path.display()
        );
        Ok(evaluator)
    }

    /// Load the evaluator from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] on parse or validation failures.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, StyleError> {
        let manifest: StyleManifest = ron::from_str(ron_str)?;
        Self::new(manifest.rules)
    }

    /// All appearances whose rule matches `env`, in rule order.
    pub fn evaluate(&self, env: &StyleEnvironment) -> Vec<&AppearanceDef> {
        self.rules
            .iter()
            .filter(|rule| rule.when.matches(env))
            .map(|rule| &rule.appearance)
            .collect()
    }

    /// The first matching appearance, if any.
    pub fn first_match(&self, env: &StyleEnvironment) -> Option<&AppearanceDef> {
        self.rules
            .iter()
            .find(|rule| rule.when.matches(env))
            .map(|rule| &rule.appearance)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryType;

    const POLAR_STYLE: &str = r#"
        // Polar caps
        (
            rules: [
                (
                    when: (geometry_type: Some(Polygon), layer: Some("earth"), kind: Some("north_pole")),
                    appearance: (name: "arctic", color: (0.9, 0.95, 1.0, 1.0)),
                ),
                (
                    when: (layer: Some("earth"), kind: Some("south_pole")),
                    appearance: (name: "antarctic", opacity: 0.9),
                ),
                (
                    when: (layer: Some("earth")),
                    appearance: (name: "land"),
                ),
            ],
        )
    "#;

    #[test]
    fn test_manifest_parses() {
        let evaluator = StyleEvaluator::from_ron_str(POLAR_STYLE).unwrap();
        assert_eq!(evaluator.len(), 3);
        assert!(!evaluator.is_empty());
    }

    #[test]
    fn test_evaluate_returns_matches_in_order() {
        let evaluator = StyleEvaluator::from_ron_str(POLAR_STYLE).unwrap();
        let env = StyleEnvironment::polygon("earth", "north_pole");
        let names: Vec<_> = evaluator
            .evaluate(&env)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, ["arctic", "land"]);
        assert_eq!(evaluator.first_match(&env).unwrap().name, "arctic");
    }

    #[test]
    fn test_no_match() {
        let evaluator = StyleEvaluator::from_ron_str(POLAR_STYLE).unwrap();
        let env = StyleEnvironment {
            geometry_type: GeometryType::Polygon,
            layer: "water".to_string(),
            kind: "north_pole".to_string(),
        };
        assert!(evaluator.evaluate(&env).is_empty());
        assert!(evaluator.first_match(&env).is_none());
    }

    #[test]
    fn test_empty_manifest() {
        let evaluator = StyleEvaluator::from_ron_str("()").unwrap();
        assert!(evaluator.is_empty());
    }

    #[test]
    fn test_invalid_appearance_rejected() {
        let result =
            StyleEvaluator::from_ron_str(r#"(rules: [(appearance: (name: ""))])"#);
        assert!(matches!(result, Err(StyleError::EmptyName)));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result = StyleEvaluator::from_ron_str("{{not valid}}");
        assert!(matches!(result, Err(StyleError::Ron(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.ron");
        std::fs::write(&path, POLAR_STYLE).unwrap();
        let evaluator = StyleEvaluator::from_ron(&path).unwrap();
        assert_eq!(evaluator.len(), 3);

        let missing = StyleEvaluator::from_ron(&dir.path().join("missing.ron"));
        assert!(matches!(missing, Err(StyleError::Io(_))));
    }
}
