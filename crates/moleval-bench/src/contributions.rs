//! Score-contribution specifications: which top-k partial means make up a
//! goal-directed benchmark's final score, and with which weights.

use serde::{Deserialize, Serialize};

/// Size of one contribution entry: an absolute count, or a fraction of
/// however many molecules are available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TopCount {
    Count(usize),
    Fraction(f64),
}

/// Ordered collection of (top-count, weight) pairs.
///
/// Immutable after construction; the same specification instance may be
/// shared across benchmark runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSpecification {
    entries: Vec<(TopCount, f64)>,
}

impl ContributionSpecification {
    /// One entry per requested top-count, each weighted `1 / len`.
    ///
    /// Panics on an empty list: a specification with no entries cannot
    /// produce a score, and the entry weights would be undefined.
    pub fn uniform(top_counts: &[usize]) -> Self {
        assert!(
            !top_counts.is_empty(),
            "a contribution specification needs at least one entry"
        );
        let weight = 1.0 / top_counts.len() as f64;
        Self {
            entries: top_counts
                .iter()
                .map(|count| (TopCount::Count(*count), weight))
                .collect(),
        }
    }

    /// One entry per fraction of the generated count, equal weights.
    ///
    /// Panics on an empty list, as [`ContributionSpecification::uniform`].
    pub fn fractional(fractions: &[f64]) -> Self {
        assert!(
            !fractions.is_empty(),
            "a contribution specification needs at least one entry"
        );
        let weight = 1.0 / fractions.len() as f64;
        Self {
            entries: fractions
                .iter()
                .map(|fraction| (TopCount::Fraction(*fraction), weight))
                .collect(),
        }
    }

    /// Resolve to concrete (count, weight) pairs for a given number of
    /// generated molecules. Counts are clamped to that number; nothing is
    /// ever indexed out of bounds.
    pub fn specification(&self, number_molecules_generated: usize) -> Vec<(usize, f64)> {
        self.entries
            .iter()
            .map(|(top_count, weight)| {
                let count = match top_count {
                    TopCount::Count(count) => *count,
                    TopCount::Fraction(fraction) => {
                        (fraction * number_molecules_generated as f64).round() as usize
                    }
                };
                (count.min(number_molecules_generated), *weight)
            })
            .collect()
    }

    /// How many molecules a generator must be asked for, given the
    /// benchmark's configured target count.
    pub fn required_molecule_count(&self, target_count: usize) -> usize {
        self.entries
            .iter()
            .map(|(top_count, _)| match top_count {
                TopCount::Count(count) => *count,
                TopCount::Fraction(fraction) => (fraction * target_count as f64).round() as usize,
            })
            .max()
            .unwrap_or(0)
    }

    /// Combine a descending-sorted score list (already deduplicated and
    /// validity-filtered) into the final benchmark score.
    ///
    /// Counts resolve against `number_molecules_generated`, the raw
    /// generator output size, not against the surviving score count: a
    /// generator that pads its output with duplicates or invalid strings
    /// still divides by the full top-k it was asked for. The sum runs over
    /// however many scores survived. No surviving molecules means score 0.
    pub fn aggregate(&self, number_molecules_generated: usize, sorted_scores_desc: &[f64]) -> f64 {
        if sorted_scores_desc.is_empty() {
            return 0.0;
        }
        self.specification(number_molecules_generated)
            .iter()
            .map(|(count, weight)| {
                if *count == 0 {
                    return 0.0;
                }
                let available = (*count).min(sorted_scores_desc.len());
                weight * sorted_scores_desc[..available].iter().sum::<f64>() / *count as f64
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_equals_top_k_mean() {
        let spec = ContributionSpecification::uniform(&[3]);
        let scores = [0.9, 0.3, 0.1];
        assert!((spec.aggregate(3, &scores) - (0.9 + 0.3 + 0.1) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_multiple_contributions_combine_with_weights() {
        let spec = ContributionSpecification::uniform(&[1, 3]);
        let scores = [0.9, 0.3, 0.1];
        let top1 = 0.9;
        let top3 = (0.9 + 0.3 + 0.1) / 3.0;
        assert!((spec.aggregate(3, &scores) - (top1 + top3) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_are_clamped_to_generated_count() {
        let spec = ContributionSpecification::uniform(&[100]);
        let scores = [0.8, 0.6];
        // top-100 with only two molecules generated uses both, not zero-padding
        assert!((spec.aggregate(2, &scores) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_duplicates_dilute_the_top_k_mean() {
        // 3 generated, 1 survivor: the divisor stays 3
        let spec = ContributionSpecification::uniform(&[3]);
        assert!((spec.aggregate(3, &[0.3]) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_score_list_scores_zero() {
        let spec = ContributionSpecification::uniform(&[1, 10, 100]);
        assert_eq!(spec.aggregate(100, &[]), 0.0);
    }

    #[test]
    fn test_fractional_specification_resolves_against_generated_count() {
        let spec = ContributionSpecification::fractional(&[0.5, 1.0]);
        assert_eq!(
            spec.specification(10),
            vec![(5, 0.5), (10, 0.5)]
        );
        assert_eq!(spec.required_molecule_count(100), 100);
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn test_uniform_rejects_an_empty_entry_list() {
        ContributionSpecification::uniform(&[]);
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn test_fractional_rejects_an_empty_entry_list() {
        ContributionSpecification::fractional(&[]);
    }

    #[test]
    fn test_required_molecule_count_is_max_entry() {
        let spec = ContributionSpecification::uniform(&[1, 10, 100]);
        assert_eq!(spec.required_molecule_count(100), 100);
        let spec = ContributionSpecification::uniform(&[159]);
        assert_eq!(spec.required_molecule_count(100), 159);
    }
}
