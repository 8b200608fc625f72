//! Monotonic rescaling curves applied to raw descriptor or similarity values.
//!
//! Leaf scoring functions produce raw values in their natural units (a logP,
//! a Tanimoto similarity, a ring count); a modifier maps the raw value into
//! the [0, 1] objective scale. The published benchmark parameters fix the
//! modifier of every objective, so the set is a closed enum.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoreModifier {
    /// Pass the raw value through unchanged.
    Identity,
    /// Gaussian bump centered on `mu`: full score at the target value,
    /// decaying on both sides.
    Gaussian { mu: f64, sigma: f64 },
    /// Full score at or below `mu`, Gaussian decay above. Used for
    /// "keep this property under X" objectives.
    MinGaussian { mu: f64, sigma: f64 },
    /// Full score at or above `mu`, Gaussian decay below. Used for
    /// "get this property over X" objectives.
    MaxGaussian { mu: f64, sigma: f64 },
    /// Linear ramp from `low_score` at `lower_x` to `high_score` at
    /// `upper_x`, clipped outside the ramp.
    Clipped {
        lower_x: f64,
        upper_x: f64,
        low_score: f64,
        high_score: f64,
    },
    /// Logistic ramp with the same asymptotes as `Clipped`.
    SmoothClipped {
        lower_x: f64,
        upper_x: f64,
        low_score: f64,
        high_score: f64,
    },
    /// `min(x, threshold) / threshold`: linear up to the threshold, then
    /// saturated at 1.
    Thresholded { threshold: f64 },
}

impl ScoreModifier {
    /// The common 0-to-1 ramp saturating at `upper_x`.
    pub fn clipped(upper_x: f64) -> Self {
        ScoreModifier::Clipped {
            lower_x: 0.0,
            upper_x,
            low_score: 0.0,
            high_score: 1.0,
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            ScoreModifier::Identity => x,
            ScoreModifier::Gaussian { mu, sigma } => gaussian(x, mu, sigma),
            ScoreModifier::MinGaussian { mu, sigma } => {
                if x <= mu {
                    1.0
                } else {
                    gaussian(x, mu, sigma)
                }
            }
            ScoreModifier::MaxGaussian { mu, sigma } => {
                if x >= mu {
                    1.0
                } else {
                    gaussian(x, mu, sigma)
                }
            }
            ScoreModifier::Clipped {
                lower_x,
                upper_x,
                low_score,
                high_score,
            } => {
                let slope = (high_score - low_score) / (upper_x - lower_x);
                let y = low_score + slope * (x - lower_x);
                y.clamp(low_score.min(high_score), low_score.max(high_score))
            }
            ScoreModifier::SmoothClipped {
                lower_x,
                upper_x,
                low_score,
                high_score,
            } => {
                let k = 4.0 / (upper_x - lower_x);
                let middle = (upper_x + lower_x) / 2.0;
                low_score + (high_score - low_score) / (1.0 + (-k * (x - middle)).exp())
            }
            ScoreModifier::Thresholded { threshold } => x.min(threshold) / threshold,
        }
    }
}

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_peaks_at_mu() {
        let m = ScoreModifier::Gaussian { mu: 8.0, sigma: 1.0 };
        assert!((m.apply(8.0) - 1.0).abs() < 1e-12);
        assert!(m.apply(10.0) < m.apply(9.0));
        assert!((m.apply(7.0) - m.apply(9.0)).abs() < 1e-12);
    }

    #[test]
    fn test_min_gaussian_is_flat_below_mu() {
        let m = ScoreModifier::MinGaussian { mu: 5.0, sigma: 1.0 };
        assert_eq!(m.apply(-3.0), 1.0);
        assert_eq!(m.apply(5.0), 1.0);
        assert!(m.apply(6.0) < 1.0);
    }

    #[test]
    fn test_max_gaussian_is_flat_above_mu() {
        let m = ScoreModifier::MaxGaussian { mu: 100.0, sigma: 10.0 };
        assert_eq!(m.apply(150.0), 1.0);
        assert!(m.apply(90.0) < 1.0);
    }

    #[test]
    fn test_clipped_ramp() {
        let m = ScoreModifier::clipped(0.8);
        assert_eq!(m.apply(-0.1), 0.0);
        assert!((m.apply(0.4) - 0.5).abs() < 1e-12);
        assert_eq!(m.apply(0.9), 1.0);
    }

    #[test]
    fn test_smooth_clipped_midpoint() {
        let m = ScoreModifier::SmoothClipped {
            lower_x: 0.0,
            upper_x: 1.0,
            low_score: 0.0,
            high_score: 1.0,
        };
        assert!((m.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(m.apply(5.0) > 0.99);
        assert!(m.apply(-5.0) < 0.01);
    }

    #[test]
    fn test_thresholded_saturates() {
        let m = ScoreModifier::Thresholded { threshold: 10.0 };
        assert!((m.apply(3.0) - 0.3).abs() < 1e-12);
        assert_eq!(m.apply(25.0), 1.0);
    }
}
