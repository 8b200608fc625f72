//! Reference-dataset loading and list utilities.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{MolevalError, Result};

/// Load a newline-delimited molecule file.
///
/// Each line holds one SMILES string, optionally followed by
/// whitespace-separated annotations which are ignored. Blank lines are
/// skipped. I/O failures propagate; a reference-set load failure is never
/// silently treated as an empty reference.
pub fn load_smiles_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let molecules: Vec<String> = content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(|s| s.to_string())
        .collect();

    if molecules.is_empty() {
        return Err(MolevalError::Dataset(format!(
            "no molecules found in {}",
            path.as_ref().display()
        )));
    }

    debug!("Loaded {} molecules from {}", molecules.len(), path.as_ref().display());
    Ok(molecules)
}

/// Remove duplicates while keeping the ordering of the original list.
/// The first occurrence is kept, later occurrences are dropped.
pub fn remove_duplicates<S: AsRef<str>>(molecules: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(molecules.len());
    let mut unique = Vec::with_capacity(molecules.len());
    for molecule in molecules {
        if seen.insert(molecule.as_ref()) {
            unique.push(molecule.as_ref().to_string());
        }
    }
    unique
}

/// Draw a random subset of a dataset without replacement.
///
/// The caller supplies the random number generator; seeding that generator
/// gives a reproducible subset without touching any process-wide state.
pub fn random_subset<R: Rng + ?Sized>(
    dataset: &[String],
    subset_size: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    if dataset.len() < subset_size {
        return Err(MolevalError::Dataset(format!(
            "the dataset to extract a subset from is too small: {} < {}",
            dataset.len(),
            subset_size
        )));
    }

    Ok(dataset
        .choose_multiple(rng, subset_size)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_remove_duplicates_keeps_first_occurrence() {
        let input = ["CCO", "CCC", "CCO", "C"];
        assert_eq!(remove_duplicates(&input), vec!["CCO", "CCC", "C"]);
    }

    #[test]
    fn test_random_subset_is_reproducible_for_a_given_seed() {
        let dataset: Vec<String> = (0..100).map(|i| format!("C{i}")).collect();

        let a = random_subset(&dataset, 10, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = random_subset(&dataset, 10, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_random_subset_rejects_short_dataset() {
        let dataset = vec!["CCO".to_string()];
        let err = random_subset(&dataset, 5, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(err.to_string().contains("1 < 5"));
    }

    #[test]
    fn test_load_smiles_file_ignores_annotations_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CCO ethanol").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "C methane").unwrap();

        let molecules = load_smiles_file(file.path()).unwrap();
        assert_eq!(molecules, vec!["CCO", "C"]);
    }

    #[test]
    fn test_load_smiles_file_missing_file_is_an_error() {
        assert!(load_smiles_file("/nonexistent/dataset.smiles").is_err());
    }
}
