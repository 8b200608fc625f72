mod common;

use std::sync::Arc;

use moleval_bench::scoring::{DescriptorScoringFunction, ScoringFunction};
use moleval_bench::{ContributionSpecification, GoalDirectedBenchmark, ScoreModifier};
use moleval_chem::mock::MockChemBackend;
use moleval_chem::{ChemBackend, Descriptor};

use common::MockGoalDirectedGenerator;

fn backend() -> Arc<dyn ChemBackend> {
    Arc::new(MockChemBackend::new())
}

/// 0.1 per atom, saturating at 10 atoms: "OCC" scores 0.3, "CCCCOCCCC" 0.9.
fn atom_count_objective(backend: &Arc<dyn ChemBackend>) -> Arc<dyn ScoringFunction> {
    Arc::new(DescriptorScoringFunction::new(
        backend.clone(),
        Descriptor::NumAtoms,
        ScoreModifier::Thresholded { threshold: 10.0 },
    ))
}

fn top3_benchmark(backend: &Arc<dyn ChemBackend>) -> GoalDirectedBenchmark {
    GoalDirectedBenchmark::new(
        "benchmark",
        atom_count_objective(backend),
        ContributionSpecification::uniform(&[3]),
        backend.clone(),
    )
}

#[test]
fn test_removes_duplicates() {
    // Duplicated molecules, even as different strings, count only once.
    let backend = backend();
    let benchmark = top3_benchmark(&backend);
    let generator = MockGoalDirectedGenerator::new(&["OCC", "CCO", "C(O)C"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 0.3 / 3.0).abs() < 1e-9);
    assert_eq!(result.optimized_molecules.len(), 1);
}

#[test]
fn test_removes_invalid_molecules() {
    // Invalid strings are excluded entirely, not scored as 0.
    let backend = backend();
    let benchmark = top3_benchmark(&backend);
    let generator = MockGoalDirectedGenerator::new(&["OCC", "invalid", "invalid2"]);

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - 0.3 / 3.0).abs() < 1e-9);
    assert_eq!(result.optimized_molecules.len(), 1);
}

#[test]
fn test_correct_score_averaging() {
    let backend = backend();
    let benchmark = top3_benchmark(&backend);
    let generator = MockGoalDirectedGenerator::new(&["OCC", "CCCCOCCCC", "C"]);

    let expected = (0.3 + 0.9 + 0.1) / 3.0;
    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - expected).abs() < 1e-9);
}

#[test]
fn test_correct_score_with_multiple_contributions() {
    // 0.5 * (top1 + top3)
    let backend = backend();
    let benchmark = GoalDirectedBenchmark::new(
        "benchmark",
        atom_count_objective(&backend),
        ContributionSpecification::uniform(&[1, 3]),
        backend.clone(),
    );
    let generator = MockGoalDirectedGenerator::new(&["OCC", "CCCCOCCCC", "C"]);

    let top3 = (0.3 + 0.9 + 0.1) / 3.0;
    let top1 = 0.9;
    let expected = (top1 + top3) / 2.0;

    let result = benchmark.assess_model(&generator).unwrap();
    assert!((result.score - expected).abs() < 1e-9);
}

#[test]
fn test_assess_model_is_idempotent() {
    // Deterministic generator + deterministic scoring: re-running the same
    // benchmark instance must not carry state between calls.
    let backend = backend();
    let benchmark = top3_benchmark(&backend);
    let generator = MockGoalDirectedGenerator::new(&["OCC", "CCCCOCCCC", "C"]);

    let first = benchmark.assess_model(&generator).unwrap();
    let second = benchmark.assess_model(&generator).unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.optimized_molecules, second.optimized_molecules);
}

#[test]
fn test_result_molecules_are_sorted_best_first() {
    let backend = backend();
    let benchmark = top3_benchmark(&backend);
    let generator = MockGoalDirectedGenerator::new(&["C", "CCCCOCCCC", "OCC"]);

    let result = benchmark.assess_model(&generator).unwrap();
    let scores: Vec<f64> = result.optimized_molecules.iter().map(|(_, s)| *s).collect();
    assert_eq!(scores.len(), 3);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!((scores[0] - 0.9).abs() < 1e-9);
    assert!(result.execution_time_s >= 0.0);
}

#[test]
fn test_starting_population_is_passed_to_the_generator() {
    struct AssertingGenerator;

    impl moleval_bench::GoalDirectedGenerator for AssertingGenerator {
        fn generate_optimized_molecules(
            &self,
            _scoring_function: &dyn ScoringFunction,
            _number_molecules: usize,
            starting_population: Option<&[String]>,
        ) -> anyhow::Result<Vec<String>> {
            assert_eq!(starting_population, Some(&["CCO".to_string()][..]));
            Ok(vec!["CCO".to_string()])
        }
    }

    let backend = backend();
    let benchmark = GoalDirectedBenchmark::new(
        "benchmark",
        atom_count_objective(&backend),
        ContributionSpecification::uniform(&[1]),
        backend.clone(),
    )
    .with_starting_population(vec!["CCO".to_string()]);

    let result = benchmark.assess_model(&AssertingGenerator).unwrap();
    assert!((result.score - 0.3).abs() < 1e-9);
}
