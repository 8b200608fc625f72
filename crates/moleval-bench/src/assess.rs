//! Suite runners: drive a generator through a whole benchmark suite and
//! write a timestamped JSON report.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use moleval_chem::ChemBackend;
use moleval_common::Result;

use crate::distribution::{
    DistributionLearningBenchmark, DistributionLearningBenchmarkResult,
    DistributionMatchingGenerator,
};
use crate::goal_directed::{GoalDirectedBenchmarkResult, GoalDirectedGenerator};
use crate::suites::{
    distribution_learning_benchmark_suite, goal_directed_benchmark_suite,
    DistributionSuiteVersion, SuiteVersion,
};

/// Everything needed to reproduce or compare a run: which suite was run,
/// when, and what each benchmark scored.
#[derive(Debug, Serialize)]
pub struct AssessmentReport<R> {
    pub timestamp: DateTime<Utc>,
    pub suite_version: String,
    pub results: Vec<R>,
}

impl<R: Serialize> AssessmentReport<R> {
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        info!("Wrote assessment report to {}", path.as_ref().display());
        Ok(())
    }
}

/// Run every goal-directed benchmark of `version` against `generator`.
///
/// Benchmarks run sequentially in suite order. A failing benchmark aborts
/// the run; partial reports would not be comparable to published scores.
pub fn assess_goal_directed_generation(
    generator: &dyn GoalDirectedGenerator,
    version: SuiteVersion,
    backend: &Arc<dyn ChemBackend>,
) -> Result<AssessmentReport<GoalDirectedBenchmarkResult>> {
    let benchmarks = goal_directed_benchmark_suite(version, backend)?;
    info!(
        "Assessing goal-directed generation: {} benchmarks ({:?})",
        benchmarks.len(),
        version
    );

    let mut results = Vec::with_capacity(benchmarks.len());
    for (i, benchmark) in benchmarks.iter().enumerate() {
        info!("Running benchmark {}/{}: {}", i + 1, benchmarks.len(), benchmark.name());
        let result = benchmark.assess_model(generator)?;
        info!("{}: {:.4}", result.benchmark_name, result.score);
        results.push(result);
    }

    Ok(AssessmentReport {
        timestamp: Utc::now(),
        suite_version: format!("{version:?}").to_lowercase(),
        results,
    })
}

/// Run every distribution-learning benchmark of `version` against
/// `generator`, with `reference_file` as the training/reference dataset.
pub fn assess_distribution_learning<P: AsRef<Path>>(
    generator: &dyn DistributionMatchingGenerator,
    version: DistributionSuiteVersion,
    reference_file: P,
    number_samples: usize,
    backend: &Arc<dyn ChemBackend>,
) -> Result<AssessmentReport<DistributionLearningBenchmarkResult>> {
    let benchmarks =
        distribution_learning_benchmark_suite(version, reference_file, number_samples, backend)?;
    info!(
        "Assessing distribution learning: {} benchmarks, {} samples each",
        benchmarks.len(),
        number_samples
    );

    let mut results = Vec::with_capacity(benchmarks.len());
    for (i, benchmark) in benchmarks.iter().enumerate() {
        info!("Running benchmark {}/{}: {}", i + 1, benchmarks.len(), benchmark.name());
        let result = benchmark.assess_model(generator)?;
        info!("{}: {:.4}", result.benchmark_name, result.score);
        results.push(result);
    }

    Ok(AssessmentReport {
        timestamp: Utc::now(),
        suite_version: format!("{version:?}").to_lowercase(),
        results,
    })
}
