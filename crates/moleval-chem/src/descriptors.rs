//! Scalar descriptor vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of physicochemical descriptors the harness can request.
///
/// This covers the descriptor subset used by the KL-divergence benchmark
/// and by the goal-directed objectives of the published battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Descriptor {
    MolecularWeight,
    LogP,
    Tpsa,
    Qed,
    BertzComplexity,
    NumHDonors,
    NumHAcceptors,
    NumRotatableBonds,
    NumAromaticRings,
    NumAliphaticRings,
    NumRings,
    NumFluorineAtoms,
    NumAtoms,
}

impl Descriptor {
    /// Whether the descriptor takes integer values. Distribution
    /// comparisons use a discrete divergence estimator for these.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Descriptor::NumHDonors
                | Descriptor::NumHAcceptors
                | Descriptor::NumRotatableBonds
                | Descriptor::NumAromaticRings
                | Descriptor::NumAliphaticRings
                | Descriptor::NumRings
                | Descriptor::NumFluorineAtoms
                | Descriptor::NumAtoms
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Descriptor::MolecularWeight => "MolWt",
            Descriptor::LogP => "LogP",
            Descriptor::Tpsa => "TPSA",
            Descriptor::Qed => "QED",
            Descriptor::BertzComplexity => "BertzCT",
            Descriptor::NumHDonors => "NumHDonors",
            Descriptor::NumHAcceptors => "NumHAcceptors",
            Descriptor::NumRotatableBonds => "NumRotatableBonds",
            Descriptor::NumAromaticRings => "NumAromaticRings",
            Descriptor::NumAliphaticRings => "NumAliphaticRings",
            Descriptor::NumRings => "NumRings",
            Descriptor::NumFluorineAtoms => "NumF",
            Descriptor::NumAtoms => "NumAtoms",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
