//! Fréchet benchmark: distance between the embedding distributions of a
//! generated sample and a reference dataset.

use std::sync::Arc;

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::{info, warn};

use moleval_chem::{canonicalize_list, ChemBackend};
use moleval_common::{data, MolevalError, Result};

use crate::distribution::{
    sample, DistributionLearningBenchmark, DistributionLearningBenchmarkResult,
    DistributionMatchingGenerator,
};

/// Score transform: exp(-FCD_SCALE * distance), mapping distance 0 to a
/// score of 1 and growing distances toward 0.
const FCD_SCALE: f64 = 0.2;

/// Same fixed seed as the KL benchmark's reference draw.
const SUBSET_SEED: u64 = 42;

pub struct FrechetBenchmark {
    backend: Arc<dyn ChemBackend>,
    number_samples: usize,
    reference: Vec<String>,
}

impl FrechetBenchmark {
    pub fn new(
        backend: Arc<dyn ChemBackend>,
        reference_set: &[String],
        number_samples: usize,
    ) -> Result<Self> {
        let canonical = canonicalize_list(&*backend, reference_set);
        if canonical.len() < 2 {
            return Err(MolevalError::Dataset(
                "Fréchet reference set needs at least 2 valid molecules".to_string(),
            ));
        }

        let reference = if canonical.len() > number_samples {
            data::random_subset(&canonical, number_samples, &mut StdRng::seed_from_u64(SUBSET_SEED))?
        } else {
            canonical
        };

        Ok(Self {
            backend,
            number_samples,
            reference,
        })
    }

    fn embeddings(&self, molecules: &[String]) -> Vec<Vec<f64>> {
        molecules
            .iter()
            .filter_map(|m| self.backend.embedding(m))
            .collect()
    }
}

impl DistributionLearningBenchmark for FrechetBenchmark {
    fn name(&self) -> &str {
        "Frechet distance"
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
        let sample_embeddings = self.embeddings(&canonical);
        if sample_embeddings.len() < 2 {
            warn!("Frechet distance: fewer than 2 valid molecules, scoring 0");
            return Ok(DistributionLearningBenchmarkResult {
                benchmark_name: self.name().to_string(),
                score: 0.0,
                sampling_time_s,
                metadata: json!({ "number_valid": sample_embeddings.len() }),
            });
        }
        let reference_embeddings = self.embeddings(&self.reference);

        let (reference_mean, reference_cov) = mean_and_covariance(&reference_embeddings);
        let (sample_mean, sample_cov) = mean_and_covariance(&sample_embeddings);
        let distance = frechet_distance(&reference_mean, &reference_cov, &sample_mean, &sample_cov);
        let score = (-FCD_SCALE * distance).exp();

        info!("Frechet distance: {:.4} -> score {:.4}", distance, score);
        Ok(DistributionLearningBenchmarkResult {
            benchmark_name: self.name().to_string(),
            score,
            sampling_time_s,
            metadata: json!({
                "number_samples": molecules.len(),
                "number_valid": sample_embeddings.len(),
                "frechet_distance": distance,
            }),
        })
    }
}

/// Sample mean vector and covariance matrix (rows are observations).
pub fn mean_and_covariance(rows: &[Vec<f64>]) -> (DVector<f64>, DMatrix<f64>) {
    let n = rows.len();
    let dim = rows.first().map(|r| r.len()).unwrap_or(0);
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let matrix = DMatrix::from_row_slice(n, dim, &flat);

    let mean = matrix.row_mean().transpose();
    let mut centered = matrix;
    for mut row in centered.row_iter_mut() {
        row -= mean.transpose();
    }
    let covariance = centered.transpose() * &centered / (n as f64 - 1.0).max(1.0);
    (mean, covariance)
}

/// Fréchet distance between two Gaussians:
/// `|mu1 - mu2|^2 + Tr(C1 + C2 - 2 (C1^1/2 C2 C1^1/2)^1/2)`.
pub fn frechet_distance(
    mu1: &DVector<f64>,
    cov1: &DMatrix<f64>,
    mu2: &DVector<f64>,
    cov2: &DMatrix<f64>,
) -> f64 {
    let diff = mu1 - mu2;
    let sqrt_cov1 = sqrt_symmetric(cov1);
    let inner = &sqrt_cov1 * cov2 * &sqrt_cov1;
    let cross_trace = sqrt_symmetric(&symmetrize(&inner)).trace();

    (diff.dot(&diff) + cov1.trace() + cov2.trace() - 2.0 * cross_trace).max(0.0)
}

/// Matrix square root of a symmetric positive semi-definite matrix.
/// Eigenvalues pushed slightly negative by rounding are clamped to zero.
fn sqrt_symmetric(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let eigen = SymmetricEigen::new(matrix.clone());
    let sqrt_eigenvalues = eigen.eigenvalues.map(|v| v.max(0.0).sqrt());
    &eigen.eigenvectors * DMatrix::from_diagonal(&sqrt_eigenvalues) * eigen.eigenvectors.transpose()
}

fn symmetrize(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    (matrix + matrix.transpose()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_covariance() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let (mean, cov) = mean_and_covariance(&rows);
        assert!((mean[0] - 3.0).abs() < 1e-12);
        assert!((mean[1] - 4.0).abs() < 1e-12);
        assert!((cov[(0, 0)] - 4.0).abs() < 1e-12);
        assert!((cov[(0, 1)] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_frechet_distance_of_identical_gaussians_is_zero() {
        let mu = DVector::from_vec(vec![1.0, -2.0]);
        let cov = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
        let distance = frechet_distance(&mu, &cov, &mu, &cov);
        assert!(distance.abs() < 1e-9);
    }

    #[test]
    fn test_frechet_distance_matches_univariate_formula() {
        // For 1-D Gaussians: (m1 - m2)^2 + s1 + s2 - 2 sqrt(s1 s2)
        let mu1 = DVector::from_vec(vec![0.0]);
        let mu2 = DVector::from_vec(vec![3.0]);
        let cov1 = DMatrix::from_row_slice(1, 1, &[4.0]);
        let cov2 = DMatrix::from_row_slice(1, 1, &[9.0]);
        let expected = 9.0 + 4.0 + 9.0 - 2.0 * 6.0;
        let distance = frechet_distance(&mu1, &cov1, &mu2, &cov2);
        assert!((distance - expected).abs() < 1e-9);
    }
}
