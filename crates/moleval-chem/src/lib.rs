//! moleval-chem — The cheminformatics seam of the moleval harness.
//!
//! The benchmark core never parses molecules itself. It talks to an
//! implementation of [`ChemBackend`], which wraps whatever cheminformatics
//! toolkit the embedding application links against. This crate defines:
//! 1. The oracle/backend traits ([`MoleculeOracle`], [`ChemBackend`])
//! 2. The closed fingerprint and descriptor vocabularies
//! 3. Tanimoto similarity over sparse count fingerprints
//! 4. Molecular-formula parsing for isomer objectives
//! 5. A deterministic mock backend for tests and wiring checks

pub mod backend;
pub mod descriptors;
pub mod fingerprints;
pub mod formula;
pub mod mock;

pub use backend::{canonicalize_list, ChemBackend, MoleculeOracle};
pub use descriptors::Descriptor;
pub use fingerprints::{Fingerprint, FingerprintKind};
