//! Mean and divergence helpers used by the scoring and distribution-learning code.

/// Arithmetic mean of a list of values. Returns 0.0 for an empty list.
pub fn arithmetic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Geometric mean of a list of values. Returns 0.0 for an empty list.
///
/// A single zero value makes the result exactly 0.0. Downstream benchmark
/// scores depend on this zero propagation, so it is part of the contract.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if values.iter().any(|v| *v == 0.0) {
        return 0.0;
    }
    let product: f64 = values.iter().product();
    product.powf(1.0 / values.len() as f64)
}

/// Number of histogram bins used by the continuous KL estimator.
const KLDIV_BINS: usize = 100;

/// Probability-floor applied before taking logarithms, so that empty bins
/// yield a large but finite divergence contribution.
const KLDIV_EPS: f64 = 1e-10;

/// KL divergence D(reference || sample) between two samples of a continuous
/// variable, estimated with a shared fixed-width histogram over the combined
/// range of both samples.
pub fn continuous_kldiv(reference: &[f64], sample: &[f64]) -> f64 {
    if reference.is_empty() || sample.is_empty() {
        return f64::INFINITY;
    }

    let lo = reference
        .iter()
        .chain(sample)
        .fold(f64::INFINITY, |acc, v| acc.min(*v));
    let hi = reference
        .iter()
        .chain(sample)
        .fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));

    if !(hi - lo).is_finite() || hi <= lo {
        // All mass in a single point: the distributions coincide.
        return 0.0;
    }

    let p = histogram_distribution(reference, lo, hi, KLDIV_BINS);
    let q = histogram_distribution(sample, lo, hi, KLDIV_BINS);
    kl_divergence(&p, &q)
}

/// KL divergence D(reference || sample) for integer-valued descriptors
/// (ring counts, donor counts, ...), computed over the union of observed
/// values.
pub fn discrete_kldiv(reference: &[f64], sample: &[f64]) -> f64 {
    if reference.is_empty() || sample.is_empty() {
        return f64::INFINITY;
    }

    let mut values: Vec<i64> = reference
        .iter()
        .chain(sample)
        .map(|v| v.round() as i64)
        .collect();
    values.sort_unstable();
    values.dedup();

    let count = |data: &[f64], value: i64| {
        data.iter().filter(|v| v.round() as i64 == value).count() as f64 / data.len() as f64
    };

    let p: Vec<f64> = values.iter().map(|v| count(reference, *v)).collect();
    let q: Vec<f64> = values.iter().map(|v| count(sample, *v)).collect();
    kl_divergence(&p, &q)
}

fn histogram_distribution(data: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let mut counts = vec![0usize; bins];
    let width = (hi - lo) / bins as f64;
    for v in data {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .map(|c| c as f64 / data.len() as f64)
        .collect()
}

fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .filter(|(pi, _)| **pi > 0.0)
        .map(|(pi, qi)| pi * (pi / qi.max(KLDIV_EPS)).ln())
        .sum()
}
