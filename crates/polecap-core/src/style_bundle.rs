//! Style state for polar tiles.
//!
//! A [`StyleBundle`] is an immutable snapshot: the evaluator plus the
//! appearance resolved for each hemisphere. [`StyleContext`] holds the current
//! bundle and swaps it as a whole, so readers never observe an evaluator from
//! one style next to appearances from another.

use std::sync::{Arc, RwLock};

use polecap_style::{Appearance, StyleError, StyleEnvironment, StyleEvaluator};

use crate::Hemisphere;

/// Layer name polar cap features are presented under.
pub const POLAR_LAYER: &str = "earth";

/// Evaluator and per-hemisphere appearances resolved from it.
#[derive(Clone, Debug, Default)]
pub struct StyleBundle {
    evaluator: Arc<StyleEvaluator>,
    north: Option<Arc<Appearance>>,
    south: Option<Arc<Appearance>>,
}

impl StyleBundle {
    /// A bundle with no rules and no appearances; nothing is synthesized.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve both hemisphere appearances from `evaluator`.
    ///
    /// The first matching descriptor wins. A hemisphere without a match is
    /// left without an appearance.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] if a matched descriptor fails validation.
    pub fn from_evaluator(evaluator: Arc<StyleEvaluator>) -> Result<Self, StyleError> {
        let resolve = |hemisphere: Hemisphere| -> Result<Option<Arc<Appearance>>, StyleError> {
            let env = StyleEnvironment::polygon(POLAR_LAYER, hemisphere.style_kind());
            let matches = evaluator.evaluate(&env);
            let Some(first) = matches.first() else {
                tracing::warn!(
                    "No style rule matches {}/{}, its cap will not be drawn",
                    POLAR_LAYER,
                    hemisphere.style_kind()
                );
                return Ok(None);
            };
            let appearance = Appearance::from_def((*first).clone())?;
            tracing::debug!(
                "{} uses appearance '{}' ({} matching rules)",
                hemisphere.style_kind(),
                appearance.name(),
                matches.len()
            );
            Ok(Some(Arc::new(appearance)))
        };

        let north = resolve(Hemisphere::North)?;
        let south = resolve(Hemisphere::South)?;
        Ok(Self {
            evaluator,
            north,
            south,
        })
    }

    /// A bundle with explicitly chosen appearances.
    pub fn with_appearances(
        evaluator: Arc<StyleEvaluator>,
        north: Option<Appearance>,
        south: Option<Appearance>,
    ) -> Self {
        Self {
            evaluator,
            north: north.map(Arc::new),
            south: south.map(Arc::new),
        }
    }

    pub fn appearance(&self, hemisphere: Hemisphere) -> Option<&Arc<Appearance>> {
        match hemisphere {
            Hemisphere::North => self.north.as_ref(),
            Hemisphere::South => self.south.as_ref(),
        }
    }

    pub fn evaluator(&self) -> &Arc<StyleEvaluator> {
        &self.evaluator
    }
}

/// Shared holder of the current [`StyleBundle`].
#[derive(Debug, Default)]
pub struct StyleContext {
    current: RwLock<Arc<StyleBundle>>,
}

impl StyleContext {
    pub fn new(bundle: StyleBundle) -> Self {
        Self {
            current: RwLock::new(Arc::new(bundle)),
        }
    }

    /// Snapshot of the current bundle.
    pub fn current(&self) -> Arc<StyleBundle> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new bundle, returning the previous one.
    pub fn replace(&self, bundle: StyleBundle) -> Arc<StyleBundle> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, Arc::new(bundle))
    }
}
