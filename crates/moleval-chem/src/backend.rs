//! Backend traits implemented by the embedding application's toolkit.

use tracing::debug;

use crate::descriptors::Descriptor;
use crate::fingerprints::{Fingerprint, FingerprintKind};

/// Decides molecule validity and produces canonical forms.
///
/// The canonical form is the unique normalized representation of a molecule
/// and is what the harness uses for equality and deduplication. An invalid
/// molecule is a normal, non-exceptional case signalled with `None`.
pub trait MoleculeOracle: Send + Sync {
    /// Canonical form of the molecule, or `None` if the string does not
    /// describe a valid molecule.
    fn canonicalize(&self, smiles: &str) -> Option<String>;

    fn is_valid(&self, smiles: &str) -> bool {
        self.canonicalize(smiles).is_some()
    }
}

/// Full descriptor/fingerprint backend.
///
/// All methods are pure with respect to the molecule string: the same input
/// must always yield the same output, which is what makes per-run score
/// caching sound.
pub trait ChemBackend: MoleculeOracle {
    /// Scalar physicochemical descriptor, or `None` for invalid molecules.
    fn descriptor(&self, smiles: &str, descriptor: Descriptor) -> Option<f64>;

    /// Sparse count fingerprint of the requested kind.
    fn fingerprint(&self, smiles: &str, kind: FingerprintKind) -> Option<Fingerprint>;

    /// Number of matches of a SMARTS pattern in the molecule.
    fn substructure_count(&self, smiles: &str, smarts: &str) -> Option<usize>;

    /// Molecular formula, e.g. `C7H8N2O2`.
    fn molecular_formula(&self, smiles: &str) -> Option<String>;

    /// Fixed-length feature embedding used for distribution comparisons.
    fn embedding(&self, smiles: &str) -> Option<Vec<f64>>;
}

/// Canonicalize a list of molecules, dropping the invalid ones.
///
/// Dropped molecules are logged at debug level; they are filtered-out
/// cases, not errors. Ordering of the surviving molecules is preserved.
pub fn canonicalize_list<O, S>(oracle: &O, smiles: &[S]) -> Vec<String>
where
    O: MoleculeOracle + ?Sized,
    S: AsRef<str>,
{
    smiles
        .iter()
        .filter_map(|s| {
            let canonical = oracle.canonicalize(s.as_ref());
            if canonical.is_none() {
                debug!("Dropping invalid molecule: {}", s.as_ref());
            }
            canonical
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChemBackend;

    #[test]
    fn test_canonicalize_list_drops_invalid_molecules() {
        let backend = MockChemBackend::new();
        let canonical = canonicalize_list(&backend, &["OCC", "invalid", "C"]);
        assert_eq!(canonical.len(), 2);
    }
}
