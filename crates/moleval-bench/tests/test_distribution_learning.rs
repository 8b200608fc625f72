mod common;

use std::sync::Arc;

use moleval_bench::distribution::{
    NoveltyBenchmark, UniquenessBenchmark, ValidityBenchmark,
};
use moleval_bench::frechet::FrechetBenchmark;
use moleval_bench::kldiv::KlDivBenchmark;
use moleval_bench::DistributionLearningBenchmark;
use moleval_chem::mock::MockChemBackend;
use moleval_chem::ChemBackend;

use common::MockDistributionGenerator;

fn backend() -> Arc<dyn ChemBackend> {
    Arc::new(MockChemBackend::new())
}

fn owned(molecules: &[&str]) -> Vec<String> {
    molecules.iter().map(|s| s.to_string()).collect()
}

/// A small but varied reference set: different sizes, heteroatoms, rings.
const REFERENCE: [&str; 6] = ["CCO", "CCC", "CCN", "CCCC", "CCCO", "C1CCCCC1"];

#[test]
fn test_validity_is_the_fraction_of_valid_molecules() {
    let benchmark = ValidityBenchmark::new(backend(), 4);
    let generator = MockDistributionGenerator::new(&["OCC", "invalid", "CCO", "C"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 0.75).abs() < 1e-9);
}

#[test]
fn test_validity_scores_missing_samples_against_the_request() {
    // 4 requested, 2 delivered, 1 valid: the denominator stays 4
    let benchmark = ValidityBenchmark::new(backend(), 4);
    let generator = MockDistributionGenerator::new(&["CCO", "invalid"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 0.25).abs() < 1e-9, "score was {}", result.score);
}

#[test]
fn test_uniqueness_scores_missing_samples_against_the_request() {
    let benchmark = UniquenessBenchmark::new(backend(), 4);
    // 4 requested, 3 delivered, 2 unique
    let generator = MockDistributionGenerator::new(&["CCO", "OCC", "C"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 0.5).abs() < 1e-9, "score was {}", result.score);
}

#[test]
fn test_uniqueness_counts_canonical_forms_once() {
    let benchmark = UniquenessBenchmark::new(backend(), 3);
    // OCC and CCO are the same molecule
    let generator = MockDistributionGenerator::new(&["OCC", "CCO", "C"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_novelty_excludes_training_set_molecules() {
    let training_set = owned(&["CCO"]);
    let benchmark = NoveltyBenchmark::new(backend(), &training_set, 3);
    // OCC is CCO under canonicalization, so only 2 of 3 are novel
    let generator = MockDistributionGenerator::new(&["OCC", "C", "N"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_kldiv_of_identical_distributions_is_one() {
    let reference = owned(&REFERENCE);
    let benchmark = KlDivBenchmark::new(backend(), &reference, REFERENCE.len()).unwrap();
    let generator = MockDistributionGenerator::new(&REFERENCE);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 1.0).abs() < 1e-6, "score was {}", result.score);
}

#[test]
fn test_kldiv_penalizes_a_shifted_distribution() {
    let reference = owned(&REFERENCE);
    let benchmark = KlDivBenchmark::new(backend(), &reference, REFERENCE.len()).unwrap();
    // much larger molecules than the reference
    let generator = MockDistributionGenerator::new(&[
        "CCCCCCCCCCCC",
        "CCCCCCCCCCCCC",
        "CCCCCCCCCCCCCC",
        "NCCCCCCCCCCCCCC",
        "OCCCCCCCCCCCCCC",
        "CCCCCCCCCCCCCCCC",
    ]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!(result.score < 0.9);
}

#[test]
fn test_kldiv_tolerates_an_under_delivering_generator() {
    let reference = owned(&REFERENCE);
    let benchmark = KlDivBenchmark::new(backend(), &reference, REFERENCE.len()).unwrap();
    // 6 requested, 4 delivered: assessed over what arrived
    let generator = MockDistributionGenerator::new(&["CCO", "CCC", "CCN", "CCCC"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!(result.score > 0.0 && result.score <= 1.0);
}

#[test]
fn test_kldiv_rejects_a_degenerate_reference_set() {
    // one unique molecule is not enough to compare distributions
    let reference = owned(&["CCO", "OCC"]);
    assert!(KlDivBenchmark::new(backend(), &reference, 2).is_err());
}

#[test]
fn test_frechet_of_identical_sets_is_one() {
    let reference = owned(&REFERENCE);
    let benchmark = FrechetBenchmark::new(backend(), &reference, REFERENCE.len()).unwrap();
    let generator = MockDistributionGenerator::new(&REFERENCE);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 1.0).abs() < 1e-6, "score was {}", result.score);
}

#[test]
fn test_frechet_scores_zero_without_enough_valid_molecules() {
    let reference = owned(&REFERENCE);
    let benchmark = FrechetBenchmark::new(backend(), &reference, REFERENCE.len()).unwrap();
    let generator = MockDistributionGenerator::new(&["invalid", "alsoinvalid"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert_eq!(result.score, 0.0);
}

#[test]
fn test_generator_chunks_are_consumed_sequentially() {
    let generator = MockDistributionGenerator::new(&["C", "CC", "CCC", "CCCC"]);

    let first = ValidityBenchmark::new(backend(), 2)
        .assess_model(&generator)
        .unwrap();
    let second = ValidityBenchmark::new(backend(), 2)
        .assess_model(&generator)
        .unwrap();
    assert_eq!(first.score, 1.0);
    assert_eq!(second.score, 1.0);

    // the pool is exhausted now
    let third = ValidityBenchmark::new(backend(), 2)
        .assess_model(&generator)
        .unwrap();
    assert_eq!(third.score, 0.0);
}
