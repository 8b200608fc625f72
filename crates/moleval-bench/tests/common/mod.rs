//! Shared test doubles: generators returning predefined molecules.
#![allow(dead_code)] // not every test binary uses every mock

use std::sync::Mutex;

use moleval_bench::scoring::ScoringFunction;
use moleval_bench::{DistributionMatchingGenerator, GoalDirectedGenerator};

/// Returns its predefined molecules, checking that the benchmark asked for
/// exactly that many.
pub struct MockGoalDirectedGenerator {
    molecules: Vec<String>,
}

impl MockGoalDirectedGenerator {
    pub fn new(molecules: &[&str]) -> Self {
        Self {
            molecules: molecules.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GoalDirectedGenerator for MockGoalDirectedGenerator {
    fn generate_optimized_molecules(
        &self,
        _scoring_function: &dyn ScoringFunction,
        number_molecules: usize,
        _starting_population: Option<&[String]>,
    ) -> anyhow::Result<Vec<String>> {
        assert_eq!(number_molecules, self.molecules.len());
        Ok(self.molecules.clone())
    }
}

/// Returns as many distinct alkanes as requested: "C", "CC", "CCC", ...
pub struct EnumeratingGenerator;

impl GoalDirectedGenerator for EnumeratingGenerator {
    fn generate_optimized_molecules(
        &self,
        _scoring_function: &dyn ScoringFunction,
        number_molecules: usize,
        _starting_population: Option<&[String]>,
    ) -> anyhow::Result<Vec<String>> {
        Ok((1..=number_molecules).map(|n| "C".repeat(n)).collect())
    }
}

/// Returns predefined molecules, possibly split over several `generate`
/// calls: each call consumes the next chunk.
pub struct MockDistributionGenerator {
    molecules: Vec<String>,
    cursor: Mutex<usize>,
}

impl MockDistributionGenerator {
    pub fn new(molecules: &[&str]) -> Self {
        Self {
            molecules: molecules.iter().map(|s| s.to_string()).collect(),
            cursor: Mutex::new(0),
        }
    }
}

impl DistributionMatchingGenerator for MockDistributionGenerator {
    fn generate(&self, number_samples: usize) -> anyhow::Result<Vec<String>> {
        let mut cursor = self
            .cursor
            .lock()
            .map_err(|_| anyhow::anyhow!("generator cursor poisoned"))?;
        let end = (*cursor + number_samples).min(self.molecules.len());
        let sampled = self.molecules[*cursor..end].to_vec();
        *cursor = end;
        Ok(sampled)
    }
}
