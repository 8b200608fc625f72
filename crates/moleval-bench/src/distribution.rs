//! Distribution-learning benchmarks: validity, uniqueness, novelty.
//!
//! Each benchmark scores a generator's sampled set, either against itself
//! or against a reference dataset. The KL-divergence and Fréchet
//! benchmarks live in their own modules.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use moleval_chem::{canonicalize_list, ChemBackend};
use moleval_common::{data, Result};

/// Interface for distribution-matching molecule generators.
pub trait DistributionMatchingGenerator {
    /// Sample molecule strings from the generator. Should return exactly
    /// `number_samples` strings; returning fewer is tolerated, and any
    /// retry policy belongs to the generator, not the harness.
    fn generate(&self, number_samples: usize) -> anyhow::Result<Vec<String>>;
}

/// Immutable record of one distribution-learning assessment.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionLearningBenchmarkResult {
    pub benchmark_name: String,
    pub score: f64,
    pub sampling_time_s: f64,
    pub metadata: serde_json::Value,
}

/// A stateless scorer over a generator's sampled output.
pub trait DistributionLearningBenchmark: Send + Sync {
    fn name(&self) -> &str;

    fn number_samples(&self) -> usize;

    fn assess_model(
        &self,
        generator: &dyn DistributionMatchingGenerator,
    ) -> Result<DistributionLearningBenchmarkResult>;
}

pub(crate) fn sample(
    generator: &dyn DistributionMatchingGenerator,
    number_samples: usize,
) -> anyhow::Result<(Vec<String>, f64)> {
    let start = Instant::now();
    let molecules = generator.generate(number_samples)?;
    if molecules.len() != number_samples {
        warn!(
            "Generator returned {} molecules instead of the requested {}",
            molecules.len(),
            number_samples
        );
    }
    Ok((molecules, start.elapsed().as_secs_f64()))
}

/// Fraction of sampled molecules that are valid.
pub struct ValidityBenchmark {
    backend: Arc<dyn ChemBackend>,
    number_samples: usize,
}

impl ValidityBenchmark {
    pub fn new(backend: Arc<dyn ChemBackend>, number_samples: usize) -> Self {
        Self {
            backend,
            number_samples,
        }
    }
}

impl DistributionLearningBenchmark for ValidityBenchmark {
    fn name(&self) -> &str {
        "Validity"
    }

    fn number_samples(&self) -> usize {
        self.number_samples
    }

    fn assess_model(
        &self,
        generator: &dyn DistributionMatchingGenerator,
    ) -> Result<DistributionLearningBenchmarkResult> {
        let (molecules, sampling_time_s) = sample(generator, self.number_samples)?;
        let number_valid = molecules
            .iter()
            .filter(|m| self.backend.is_valid(m))
            .count();
        // The denominator is the requested sample count: a generator that
        // returns fewer molecules than asked is scored against the request,
        // not against what it chose to deliver.
        let score = if self.number_samples == 0 {
            0.0
        } else {
            number_valid as f64 / self.number_samples as f64
        };

        info!("Validity: {}/{} -> {:.4}", number_valid, self.number_samples, score);
        Ok(DistributionLearningBenchmarkResult {
            benchmark_name: self.name().to_string(),
            score,
            sampling_time_s,
            metadata: json!({
                "number_samples": molecules.len(),
                "number_valid": number_valid,
            }),
        })
    }
}

/// Fraction of sampled molecules that are distinct after canonicalization.
pub struct UniquenessBenchmark {
    backend: Arc<dyn ChemBackend>,
    number_samples: usize,
}

impl UniquenessBenchmark {
    pub fn new(backend: Arc<dyn ChemBackend>, number_samples: usize) -> Self {
        Self {
            backend,
            number_samples,
        }
    }
}

impl DistributionLearningBenchmark for UniquenessBenchmark {
    fn name(&self) -> &str {
        "Uniqueness"
    }

    fn number_samples(&self) -> usize {
        self.number_samples
    }

    fn assess_model(
        &self,
        generator: &dyn DistributionMatchingGenerator,
    ) -> Result<DistributionLearningBenchmarkResult> {
        let (molecules, sampling_time_s) = sample(generator, self.number_samples)?;
        // Validity filter first, then deduplicate by canonical form. As for
        // validity, the denominator is the requested sample count.
        let canonical = canonicalize_list(&*self.backend, &molecules);
        let unique = data::remove_duplicates(&canonical);
        let score = if self.number_samples == 0 {
            0.0
        } else {
            unique.len() as f64 / self.number_samples as f64
        };

        info!("Uniqueness: {}/{} -> {:.4}", unique.len(), self.number_samples, score);
        Ok(DistributionLearningBenchmarkResult {
            benchmark_name: self.name().to_string(),
            score,
            sampling_time_s,
            metadata: json!({
                "number_samples": molecules.len(),
                "number_unique": unique.len(),
            }),
        })
    }
}

/// Fraction of sampled unique valid molecules absent from the training set.
pub struct NoveltyBenchmark {
    backend: Arc<dyn ChemBackend>,
    number_samples: usize,
    training_set: HashSet<String>,
}

impl NoveltyBenchmark {
    /// The training set is canonicalized once, up front. Membership tests
    /// are exact canonical-form comparisons.
    pub fn new(
        backend: Arc<dyn ChemBackend>,
        training_set: &[String],
        number_samples: usize,
    ) -> Self {
        let training_set = canonicalize_list(&*backend, training_set)
            .into_iter()
            .collect();
        Self {
            backend,
            number_samples,
            training_set,
        }
    }
}

impl DistributionLearningBenchmark for NoveltyBenchmark {
    fn name(&self) -> &str {
        "Novelty"
    }

    fn number_samples(&self) -> usize {
        self.number_samples
    }

    fn assess_model(
        &self,
        generator: &dyn DistributionMatchingGenerator,
    ) -> Result<DistributionLearningBenchmarkResult> {
        let (molecules, sampling_time_s) = sample(generator, self.number_samples)?;
        let canonical = canonicalize_list(&*self.backend, &molecules);
        let unique = data::remove_duplicates(&canonical);
        let novel = unique
            .iter()
            .filter(|m| !self.training_set.contains(*m))
            .count();
        let score = if unique.is_empty() {
            0.0
        } else {
            novel as f64 / unique.len() as f64
        };

        info!("Novelty: {}/{} -> {:.4}", novel, unique.len(), score);
        Ok(DistributionLearningBenchmarkResult {
            benchmark_name: self.name().to_string(),
            score,
            sampling_time_s,
            metadata: json!({
                "number_samples": molecules.len(),
                "number_unique": unique.len(),
                "number_novel": novel,
            }),
        })
    }
}
