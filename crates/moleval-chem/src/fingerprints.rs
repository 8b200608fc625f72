//! Fingerprint vocabulary and similarity.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use moleval_common::MolevalError;

/// The closed set of fingerprint kinds the harness can request.
///
/// An explicit enumeration mapped by the backend through a fixed match,
/// so an unsupported kind is a compile-time impossibility rather than a
/// runtime lookup fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FingerprintKind {
    /// Atom-pair fingerprint (AP).
    AtomPair,
    /// 2D pharmacophore fingerprint (PHCO).
    Pharmacophore,
    /// Sheridan physicochemical atom-pair fingerprint (BPF).
    SheridanBp,
    /// Sheridan topological-torsion fingerprint (BTF).
    SheridanBt,
    /// Topological path fingerprint (PATH).
    Path,
    /// Extended-connectivity fingerprint, radius 2 (ECFP4).
    Ecfp4,
    /// Extended-connectivity fingerprint, radius 3 (ECFP6).
    Ecfp6,
    /// Feature-class extended-connectivity fingerprint, radius 2 (FCFP4).
    Fcfp4,
    /// Feature-class extended-connectivity fingerprint, radius 3 (FCFP6).
    Fcfp6,
}

impl FingerprintKind {
    /// Conventional short label, as used in the published benchmark names.
    pub fn label(&self) -> &'static str {
        match self {
            FingerprintKind::AtomPair => "AP",
            FingerprintKind::Pharmacophore => "PHCO",
            FingerprintKind::SheridanBp => "BPF",
            FingerprintKind::SheridanBt => "BTF",
            FingerprintKind::Path => "PATH",
            FingerprintKind::Ecfp4 => "ECFP4",
            FingerprintKind::Ecfp6 => "ECFP6",
            FingerprintKind::Fcfp4 => "FCFP4",
            FingerprintKind::Fcfp6 => "FCFP6",
        }
    }
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FingerprintKind {
    type Err = MolevalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AP" => Ok(FingerprintKind::AtomPair),
            "PHCO" => Ok(FingerprintKind::Pharmacophore),
            "BPF" => Ok(FingerprintKind::SheridanBp),
            "BTF" => Ok(FingerprintKind::SheridanBt),
            "PATH" => Ok(FingerprintKind::Path),
            "ECFP4" => Ok(FingerprintKind::Ecfp4),
            "ECFP6" => Ok(FingerprintKind::Ecfp6),
            "FCFP4" => Ok(FingerprintKind::Fcfp4),
            "FCFP6" => Ok(FingerprintKind::Fcfp6),
            other => Err(MolevalError::Config(format!(
                "{other} is not a supported fingerprint kind"
            ))),
        }
    }
}

/// Sparse count fingerprint.
///
/// Opaque to the benchmark core: the only operation the harness performs
/// on fingerprints is Tanimoto comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint {
    counts: BTreeMap<u64, u32>,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: BTreeMap<u64, u32>) -> Self {
        Self { counts }
    }

    pub fn increment(&mut self, feature: u64) {
        *self.counts.entry(feature).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Generalized (count-based) Tanimoto similarity in [0, 1].
    pub fn tanimoto(&self, other: &Fingerprint) -> f64 {
        let mut min_sum = 0u64;
        let mut max_sum = 0u64;

        for (feature, count) in &self.counts {
            let other_count = other.counts.get(feature).copied().unwrap_or(0);
            min_sum += (*count).min(other_count) as u64;
            max_sum += (*count).max(other_count) as u64;
        }
        for (feature, count) in &other.counts {
            if !self.counts.contains_key(feature) {
                max_sum += *count as u64;
            }
        }

        if max_sum == 0 {
            return 0.0;
        }
        min_sum as f64 / max_sum as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(features: &[(u64, u32)]) -> Fingerprint {
        Fingerprint::from_counts(features.iter().copied().collect())
    }

    #[test]
    fn test_tanimoto_identical_is_one() {
        let a = fp(&[(1, 2), (2, 1)]);
        assert!((a.tanimoto(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tanimoto_disjoint_is_zero() {
        let a = fp(&[(1, 2)]);
        let b = fp(&[(2, 3)]);
        assert_eq!(a.tanimoto(&b), 0.0);
    }

    #[test]
    fn test_tanimoto_partial_overlap() {
        let a = fp(&[(1, 2), (2, 2)]);
        let b = fp(&[(1, 2)]);
        // min sum = 2, max sum = 4
        assert!((a.tanimoto(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fingerprint_kind_labels_round_trip() {
        for kind in [
            FingerprintKind::AtomPair,
            FingerprintKind::Pharmacophore,
            FingerprintKind::SheridanBp,
            FingerprintKind::SheridanBt,
            FingerprintKind::Path,
            FingerprintKind::Ecfp4,
            FingerprintKind::Ecfp6,
            FingerprintKind::Fcfp4,
            FingerprintKind::Fcfp6,
        ] {
            assert_eq!(kind.label().parse::<FingerprintKind>().unwrap(), kind);
        }
        assert!("ECFP8".parse::<FingerprintKind>().is_err());
    }
}
