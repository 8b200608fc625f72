//! Scoring functions: leaves over backend primitives, composites, caching.
//!
//! A scoring function maps a molecule string to a score in [0, 1].
//! Invalid molecules score `None`; that is the normal filtered-out case,
//! not an error. Scores are deterministic per molecule string, which is
//! what makes the per-run cache sound.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use moleval_chem::formula::{parse_formula, total_atoms};
use moleval_chem::{ChemBackend, Descriptor, Fingerprint, FingerprintKind};
use moleval_common::{math, MolevalError, Result};

use crate::modifiers::ScoreModifier;

/// Maps a molecule to a score in [0, 1]. `None` signals an invalid molecule.
pub trait ScoringFunction: Send + Sync {
    fn score(&self, smiles: &str) -> Option<f64>;

    fn score_list(&self, smiles_list: &[String]) -> Vec<Option<f64>> {
        smiles_list.iter().map(|s| self.score(s)).collect()
    }
}

/// How a composite combines its sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanKind {
    Arithmetic,
    Geometric,
}

/// One physicochemical descriptor, rescaled by a modifier.
pub struct DescriptorScoringFunction {
    backend: Arc<dyn ChemBackend>,
    descriptor: Descriptor,
    modifier: ScoreModifier,
}

impl DescriptorScoringFunction {
    pub fn new(backend: Arc<dyn ChemBackend>, descriptor: Descriptor, modifier: ScoreModifier) -> Self {
        Self {
            backend,
            descriptor,
            modifier,
        }
    }
}

impl ScoringFunction for DescriptorScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        let raw = self.backend.descriptor(smiles, self.descriptor)?;
        Some(self.modifier.apply(raw))
    }
}

/// Fingerprint similarity to a fixed target molecule.
pub struct TanimotoScoringFunction {
    backend: Arc<dyn ChemBackend>,
    kind: FingerprintKind,
    target_fingerprint: Fingerprint,
    modifier: ScoreModifier,
}

impl TanimotoScoringFunction {
    /// Fails if the target molecule itself is invalid: a benchmark built
    /// around an unparseable target is a configuration error.
    pub fn new(
        backend: Arc<dyn ChemBackend>,
        target: &str,
        kind: FingerprintKind,
        modifier: ScoreModifier,
    ) -> Result<Self> {
        let target_fingerprint = backend.fingerprint(target, kind).ok_or_else(|| {
            MolevalError::Config(format!("invalid similarity target molecule: {target}"))
        })?;
        Ok(Self {
            backend,
            kind,
            target_fingerprint,
            modifier,
        })
    }
}

impl ScoringFunction for TanimotoScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        let fingerprint = self.backend.fingerprint(smiles, self.kind)?;
        let similarity = fingerprint.tanimoto(&self.target_fingerprint);
        Some(self.modifier.apply(similarity))
    }
}

/// Presence (or, with `inverse`, absence) of a SMARTS substructure.
pub struct SmartsScoringFunction {
    backend: Arc<dyn ChemBackend>,
    smarts: String,
    inverse: bool,
}

impl SmartsScoringFunction {
    pub fn new(backend: Arc<dyn ChemBackend>, smarts: &str, inverse: bool) -> Self {
        Self {
            backend,
            smarts: smarts.to_string(),
            inverse,
        }
    }
}

impl ScoringFunction for SmartsScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        let matches = self.backend.substructure_count(smiles, &self.smarts)?;
        let present = matches > 0;
        Some(if present != self.inverse { 1.0 } else { 0.0 })
    }
}

/// Per-element Gaussian applied to the molecule's atom counts.
const ELEMENT_COUNT_SIGMA: f64 = 1.0;
/// Gaussian width for the total-atom-count term.
const TOTAL_ATOMS_SIGMA: f64 = 2.0;

/// Molecular-formula match: how close is the molecule to being an isomer
/// of the target formula?
pub struct IsomerScoringFunction {
    backend: Arc<dyn ChemBackend>,
    target_counts: BTreeMap<String, u32>,
    target_total: u32,
    mean: MeanKind,
}

impl IsomerScoringFunction {
    pub fn new(backend: Arc<dyn ChemBackend>, formula: &str, mean: MeanKind) -> Result<Self> {
        let target_counts = parse_formula(formula)?;
        let target_total = total_atoms(&target_counts);
        Ok(Self {
            backend,
            target_counts,
            target_total,
            mean,
        })
    }
}

impl ScoringFunction for IsomerScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        let formula = self.backend.molecular_formula(smiles)?;
        let counts = parse_formula(&formula).ok()?;

        // One term per target element, plus one for the total atom count so
        // that extra elements outside the formula are penalized too.
        let mut terms: Vec<f64> = self
            .target_counts
            .iter()
            .map(|(element, target)| {
                let count = counts.get(element).copied().unwrap_or(0);
                ScoreModifier::Gaussian {
                    mu: *target as f64,
                    sigma: ELEMENT_COUNT_SIGMA,
                }
                .apply(count as f64)
            })
            .collect();
        terms.push(
            ScoreModifier::Gaussian {
                mu: self.target_total as f64,
                sigma: TOTAL_ATOMS_SIGMA,
            }
            .apply(total_atoms(&counts) as f64),
        );

        Some(match self.mean {
            MeanKind::Arithmetic => math::arithmetic_mean(&terms),
            MeanKind::Geometric => math::geometric_mean(&terms),
        })
    }
}

/// Weighted arithmetic or geometric mean over sub-scoring-functions.
///
/// The component list and weights are fixed at construction. A geometric
/// composite with any zero sub-score is exactly 0; that zero propagation
/// is required behavior, not an optimization.
pub struct MeanScoringFunction {
    components: Vec<(Arc<dyn ScoringFunction>, f64)>,
    kind: MeanKind,
}

impl MeanScoringFunction {
    pub fn arithmetic(components: Vec<Arc<dyn ScoringFunction>>) -> Self {
        Self::weighted(MeanKind::Arithmetic, components.into_iter().map(|c| (c, 1.0)).collect())
    }

    pub fn geometric(components: Vec<Arc<dyn ScoringFunction>>) -> Self {
        Self::weighted(MeanKind::Geometric, components.into_iter().map(|c| (c, 1.0)).collect())
    }

    pub fn with_kind(kind: MeanKind, components: Vec<Arc<dyn ScoringFunction>>) -> Self {
        Self::weighted(kind, components.into_iter().map(|c| (c, 1.0)).collect())
    }

    pub fn weighted(kind: MeanKind, components: Vec<(Arc<dyn ScoringFunction>, f64)>) -> Self {
        Self { components, kind }
    }
}

impl ScoringFunction for MeanScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        let mut scores = Vec::with_capacity(self.components.len());
        for (function, weight) in &self.components {
            scores.push((function.score(smiles)?, *weight));
        }

        let weight_sum: f64 = scores.iter().map(|(_, w)| w).sum();
        if weight_sum == 0.0 {
            return Some(0.0);
        }

        Some(match self.kind {
            MeanKind::Arithmetic => {
                scores.iter().map(|(s, w)| s * w).sum::<f64>() / weight_sum
            }
            MeanKind::Geometric => {
                if scores.iter().any(|(s, _)| *s == 0.0) {
                    0.0
                } else {
                    let product: f64 = scores.iter().map(|(s, w)| s.powf(*w)).product();
                    product.powf(1.0 / weight_sum)
                }
            }
        })
    }
}

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100_000) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Memoizing wrapper keyed by the molecule string.
///
/// Scoped to a single benchmark run: each `assess_model` call creates its
/// own instance, so concurrent runs never share state. Caches the invalid
/// sentinel as well as real scores.
pub struct CachedScoringFunction {
    inner: Arc<dyn ScoringFunction>,
    cache: Mutex<LruCache<String, Option<f64>>>,
}

impl CachedScoringFunction {
    pub fn new(inner: Arc<dyn ScoringFunction>) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(CACHE_CAPACITY)),
        }
    }
}

impl ScoringFunction for CachedScoringFunction {
    fn score(&self, smiles: &str) -> Option<f64> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(smiles) {
                return *cached;
            }
        }
        let score = self.inner.score(smiles);
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(smiles.to_string(), score);
        }
        score
    }
}
