//! Deterministic mock backend.
//!
//! A lightweight stand-in for a real cheminformatics toolkit, used by the
//! harness tests and for wiring checks of generator implementations. It
//! tokenizes SMILES atoms and derives canonical forms, descriptors and
//! fingerprints from the atom multiset alone. The numbers are stable and
//! order-independent but NOT chemically meaningful: structural isomers
//! collapse to the same canonical form, which is exactly what the
//! deduplication tests rely on.

use std::collections::BTreeMap;

use crate::backend::{ChemBackend, MoleculeOracle};
use crate::descriptors::Descriptor;
use crate::fingerprints::{Fingerprint, FingerprintKind};

const TWO_LETTER_ORGANIC: [&str; 2] = ["Cl", "Br"];
const ONE_LETTER_ORGANIC: [char; 8] = ['B', 'C', 'N', 'O', 'P', 'S', 'F', 'I'];
const AROMATIC_ORGANIC: [char; 6] = ['b', 'c', 'n', 'o', 'p', 's'];

/// Tokenized view of a SMILES string: heavy atoms in input order plus a
/// few structural tallies.
#[derive(Debug, Clone)]
struct TokenizedMolecule {
    atoms: Vec<String>,
    aromatic_atoms: usize,
    ring_closures: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockChemBackend;

impl MockChemBackend {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(&self, smiles: &str) -> Option<TokenizedMolecule> {
        let chars: Vec<char> = smiles.chars().collect();
        let mut atoms = Vec::new();
        let mut aromatic_atoms = 0;
        let mut ring_digits = 0;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '(' | ')' | '-' | '=' | '#' | '/' | '\\' | '~' | '.' | '+' => i += 1,
                '%' => {
                    // two-digit ring closure
                    if i + 2 >= chars.len()
                        || !chars[i + 1].is_ascii_digit()
                        || !chars[i + 2].is_ascii_digit()
                    {
                        return None;
                    }
                    ring_digits += 1;
                    i += 3;
                }
                '0'..='9' => {
                    ring_digits += 1;
                    i += 1;
                }
                '[' => {
                    let close = chars[i + 1..].iter().position(|c| *c == ']')? + i + 1;
                    let element = bracket_element(&chars[i + 1..close])?;
                    if element.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
                        aromatic_atoms += 1;
                    }
                    atoms.push(capitalize(&element));
                    i = close + 1;
                }
                c if c.is_ascii_uppercase() => {
                    let two: String = chars[i..].iter().take(2).collect();
                    if TWO_LETTER_ORGANIC.contains(&two.as_str()) {
                        atoms.push(two);
                        i += 2;
                    } else if ONE_LETTER_ORGANIC.contains(&c) {
                        atoms.push(c.to_string());
                        i += 1;
                    } else {
                        return None;
                    }
                }
                c if c.is_ascii_lowercase() => {
                    if !AROMATIC_ORGANIC.contains(&c) {
                        return None;
                    }
                    aromatic_atoms += 1;
                    atoms.push(c.to_ascii_uppercase().to_string());
                    i += 1;
                }
                _ => return None,
            }
        }

        if atoms.is_empty() || ring_digits % 2 != 0 {
            return None;
        }

        Some(TokenizedMolecule {
            atoms,
            aromatic_atoms,
            ring_closures: ring_digits / 2,
        })
    }

    fn element_counts(&self, mol: &TokenizedMolecule) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for atom in &mol.atoms {
            *counts.entry(atom.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn count(&self, mol: &TokenizedMolecule, element: &str) -> usize {
        mol.atoms.iter().filter(|a| *a == element).count()
    }
}

/// Extract the element symbol from a bracket-atom body like `C@H` or `13cH2`.
fn bracket_element(body: &[char]) -> Option<String> {
    let mut i = 0;
    while i < body.len() && body[i].is_ascii_digit() {
        i += 1; // isotope label
    }
    let first = *body.get(i)?;
    if first.is_ascii_uppercase() {
        let mut element = first.to_string();
        // 'H' after another element is a hydrogen count, not part of the symbol
        if let Some(next) = body.get(i + 1) {
            if next.is_ascii_lowercase() {
                element.push(*next);
            }
        }
        Some(element)
    } else if first.is_ascii_lowercase() && AROMATIC_ORGANIC.contains(&first) {
        Some(first.to_string())
    } else {
        None
    }
}

fn capitalize(element: &str) -> String {
    let mut chars = element.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in bytes {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn atomic_weight(element: &str) -> f64 {
    match element {
        "B" => 10.8,
        "C" => 12.0,
        "N" => 14.0,
        "O" => 16.0,
        "F" => 19.0,
        "P" => 31.0,
        "S" => 32.1,
        "Cl" => 35.5,
        "Br" => 79.9,
        "I" => 126.9,
        _ => 100.0,
    }
}

impl MoleculeOracle for MockChemBackend {
    fn canonicalize(&self, smiles: &str) -> Option<String> {
        let mol = self.tokenize(smiles)?;
        let mut sorted = mol.atoms.clone();
        sorted.sort();
        let mut canonical = sorted.concat();
        // Ring count is kept as balanced closure digits so that the
        // canonical form is itself a valid input: harness pipelines score
        // molecules by their canonical string.
        for _ in 0..mol.ring_closures {
            canonical.push_str("11");
        }
        Some(canonical)
    }
}

impl ChemBackend for MockChemBackend {
    fn descriptor(&self, smiles: &str, descriptor: Descriptor) -> Option<f64> {
        let mol = self.tokenize(smiles)?;
        let atoms = mol.atoms.len() as f64;
        let rings = mol.ring_closures as f64;
        let carbons = self.count(&mol, "C") as f64;
        let nitrogens = self.count(&mol, "N") as f64;
        let oxygens = self.count(&mol, "O") as f64;
        let fluorines = self.count(&mol, "F") as f64;
        let halogens =
            fluorines + (self.count(&mol, "Cl") + self.count(&mol, "Br") + self.count(&mol, "I")) as f64;
        let aromatic_rings = (mol.aromatic_atoms / 5) as f64;

        let value = match descriptor {
            Descriptor::NumAtoms => atoms,
            Descriptor::MolecularWeight => mol.atoms.iter().map(|a| atomic_weight(a)).sum(),
            Descriptor::LogP => 0.5 * carbons + 0.3 * halogens - 0.7 * (nitrogens + oxygens),
            Descriptor::Tpsa => 20.3 * oxygens + 11.7 * nitrogens,
            Descriptor::Qed => 1.0 / (1.0 + (atoms - 25.0).abs() / 25.0),
            Descriptor::BertzComplexity => 15.0 * atoms + 40.0 * rings,
            Descriptor::NumHDonors => oxygens,
            Descriptor::NumHAcceptors => nitrogens + oxygens,
            Descriptor::NumRotatableBonds => ((atoms - 1.0) / 4.0).max(0.0).floor(),
            Descriptor::NumAromaticRings => aromatic_rings,
            Descriptor::NumAliphaticRings => (rings - aromatic_rings).max(0.0),
            Descriptor::NumRings => rings,
            Descriptor::NumFluorineAtoms => fluorines,
        };
        Some(value)
    }

    fn fingerprint(&self, smiles: &str, kind: FingerprintKind) -> Option<Fingerprint> {
        let canonical = self.canonicalize(smiles)?;
        let window = match kind {
            FingerprintKind::Pharmacophore => 1,
            FingerprintKind::Ecfp4 | FingerprintKind::Fcfp4 => 2,
            FingerprintKind::Ecfp6 | FingerprintKind::Fcfp6 => 3,
            FingerprintKind::AtomPair | FingerprintKind::SheridanBp | FingerprintKind::SheridanBt => 2,
            FingerprintKind::Path => 4,
        };

        let bytes: Vec<u8> = canonical.bytes().collect();
        let mut fingerprint = Fingerprint::new();
        for w in 1..=window.min(bytes.len()) {
            for chunk in bytes.windows(w) {
                let mut key = kind.label().as_bytes().to_vec();
                key.extend_from_slice(chunk);
                fingerprint.increment(fnv1a64(&key));
            }
        }
        Some(fingerprint)
    }

    fn substructure_count(&self, smiles: &str, smarts: &str) -> Option<usize> {
        let mol = self.tokenize(smiles)?;
        let haystack = mol.atoms.concat();
        let needle = smarts_atom_sequence(smarts);
        if needle.is_empty() {
            return Some(0);
        }

        let mut count = 0;
        let mut start = 0;
        while let Some(pos) = haystack[start..].find(&needle) {
            count += 1;
            start += pos + 1;
        }
        Some(count)
    }

    fn molecular_formula(&self, smiles: &str) -> Option<String> {
        let mol = self.tokenize(smiles)?;
        let counts = self.element_counts(&mol);

        // Hill-like ordering: carbon first, then the rest alphabetically.
        // Hydrogens are implicit in SMILES and not modelled by the mock.
        let mut formula = String::new();
        let mut push = |element: &str, count: usize| {
            formula.push_str(element);
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        };
        if let Some(c) = counts.get("C") {
            push("C", *c);
        }
        for (element, count) in &counts {
            if element != "C" {
                push(element, *count);
            }
        }
        Some(formula)
    }

    fn embedding(&self, smiles: &str) -> Option<Vec<f64>> {
        let mol = self.tokenize(smiles)?;
        Some(vec![
            mol.atoms.len() as f64,
            self.count(&mol, "C") as f64,
            self.count(&mol, "N") as f64,
            self.count(&mol, "O") as f64,
            mol.ring_closures as f64,
            self.descriptor(smiles, Descriptor::LogP)?,
            self.descriptor(smiles, Descriptor::MolecularWeight)? / 100.0,
            self.descriptor(smiles, Descriptor::Tpsa)? / 10.0,
        ])
    }
}

/// Reduce a SMARTS pattern to its element-symbol sequence. Atomic-number
/// primitives (`#6`, `#7`, ...) map to their symbols; logic operators and
/// ring/charge constraints are ignored.
fn smarts_atom_sequence(smarts: &str) -> String {
    let chars: Vec<char> = smarts.chars().collect();
    let mut sequence = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '#' {
            let mut digits = String::new();
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                digits.push(chars[i]);
                i += 1;
            }
            sequence.push_str(match digits.as_str() {
                "5" => "B",
                "6" => "C",
                "7" => "N",
                "8" => "O",
                "9" => "F",
                "15" => "P",
                "16" => "S",
                "17" => "Cl",
                "35" => "Br",
                "53" => "I",
                _ => "",
            });
        } else if c.is_ascii_uppercase() {
            let two: String = chars[i..].iter().take(2).collect();
            if TWO_LETTER_ORGANIC.contains(&two.as_str()) {
                sequence.push_str(&two);
                i += 1;
            } else {
                sequence.push(c);
            }
            i += 1;
        } else if c.is_ascii_lowercase() && AROMATIC_ORGANIC.contains(&c) {
            // skip the 'h' of hydrogen-count primitives like [c;h1]
            let in_h_primitive = i > 0 && (chars[i - 1] == ';' || chars[i - 1] == ',') && c == 'h';
            if !in_h_primitive {
                sequence.push(c.to_ascii_uppercase());
            }
            i += 1;
        } else {
            i += 1;
        }
    }
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_smiles_share_a_canonical_form() {
        let backend = MockChemBackend::new();
        let a = backend.canonicalize("OCC").unwrap();
        let b = backend.canonicalize("CCO").unwrap();
        let c = backend.canonicalize("C(O)C").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let backend = MockChemBackend::new();
        for smiles in ["CCO", "c1ccccc1", "C1CC1C2CC2"] {
            let canonical = backend.canonicalize(smiles).unwrap();
            assert_eq!(backend.canonicalize(&canonical), Some(canonical.clone()));
        }
    }

    #[test]
    fn test_invalid_strings_are_rejected() {
        let backend = MockChemBackend::new();
        assert!(backend.canonicalize("invalid").is_none());
        assert!(backend.canonicalize("").is_none());
        assert!(backend.canonicalize("C1CC").is_none()); // unbalanced ring closure
    }

    #[test]
    fn test_atom_count_descriptor() {
        let backend = MockChemBackend::new();
        assert_eq!(backend.descriptor("OCC", Descriptor::NumAtoms), Some(3.0));
        assert_eq!(backend.descriptor("CCCCOCCCC", Descriptor::NumAtoms), Some(9.0));
        assert_eq!(backend.descriptor("C", Descriptor::NumAtoms), Some(1.0));
        assert_eq!(backend.descriptor("invalid", Descriptor::NumAtoms), None);
    }

    #[test]
    fn test_bracket_atoms_and_ring_closures() {
        let backend = MockChemBackend::new();
        // benzene: six aromatic carbons, one ring
        assert_eq!(
            backend.descriptor("c1ccccc1", Descriptor::NumAromaticRings),
            Some(1.0)
        );
        assert_eq!(backend.descriptor("c1ccccc1", Descriptor::NumRings), Some(1.0));
        assert!(backend.canonicalize("[C@H](O)C").is_some());
    }

    #[test]
    fn test_fingerprint_kinds_are_distinguished() {
        let backend = MockChemBackend::new();
        let ecfp4 = backend.fingerprint("CCO", FingerprintKind::Ecfp4).unwrap();
        let fcfp4 = backend.fingerprint("CCO", FingerprintKind::Fcfp4).unwrap();
        assert_ne!(ecfp4, fcfp4);
        assert!((ecfp4.tanimoto(&ecfp4) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_substructure_count_maps_atomic_numbers() {
        let backend = MockChemBackend::new();
        // "#7 bonded to carbons" reduced to the NC sequence
        assert_eq!(backend.substructure_count("CNC", "[#7]-C"), Some(1));
        assert_eq!(backend.substructure_count("CCC", "[#7]-C"), Some(0));
    }

    #[test]
    fn test_molecular_formula_orders_carbon_first() {
        let backend = MockChemBackend::new();
        assert_eq!(backend.molecular_formula("OCC").unwrap(), "C2O");
        assert_eq!(backend.molecular_formula("ClCCl").unwrap(), "CCl2");
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let backend = MockChemBackend::new();
        let a = backend.embedding("CCO").unwrap();
        let b = backend.embedding("OCC").unwrap();
        assert_eq!(a.len(), 8);
        assert_eq!(a, b); // order-independent by construction
    }
}
