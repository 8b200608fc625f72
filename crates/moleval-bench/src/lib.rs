//! moleval-bench — The benchmark core of the moleval harness.
//!
//! Evaluates molecule-generation models along two axes:
//! 1. Goal-directed optimization: given a scoring function, can the
//!    generator produce molecules that maximize it?
//! 2. Distribution learning: does the generator's output distribution
//!    resemble a reference chemical dataset?
//!
//! Generators plug in through the [`goal_directed::GoalDirectedGenerator`]
//! and [`distribution::DistributionMatchingGenerator`] traits. The harness
//! computes scores, aggregates them, and reports structured results;
//! cheminformatics is delegated to a [`moleval_chem::ChemBackend`].

pub mod assess;
pub mod config;
pub mod contributions;
pub mod distribution;
pub mod frechet;
pub mod goal_directed;
pub mod kldiv;
pub mod modifiers;
pub mod scoring;
pub mod standard_benchmarks;
pub mod suites;

pub use contributions::ContributionSpecification;
pub use distribution::{
    DistributionLearningBenchmark, DistributionLearningBenchmarkResult,
    DistributionMatchingGenerator,
};
pub use goal_directed::{GoalDirectedBenchmark, GoalDirectedBenchmarkResult, GoalDirectedGenerator};
pub use modifiers::ScoreModifier;
pub use scoring::{MeanKind, ScoringFunction};
pub use suites::{distribution_learning_benchmark_suite, goal_directed_benchmark_suite};
