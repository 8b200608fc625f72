//! Molecular-formula parsing for isomer objectives.

use std::collections::BTreeMap;

use moleval_common::{MolevalError, Result};

/// Parse a molecular formula such as `C9H10N2O2PF2Cl` into element counts.
///
/// Elements are an uppercase letter optionally followed by one lowercase
/// letter, each with an optional decimal count (default 1). Parenthesized
/// groups are not supported; the published targets do not use them.
pub fn parse_formula(formula: &str) -> Result<BTreeMap<String, u32>> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let chars: Vec<char> = formula.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            return Err(MolevalError::Config(format!(
                "invalid molecular formula: {formula}"
            )));
        }

        let mut element = chars[i].to_string();
        i += 1;
        if i < chars.len() && chars[i].is_ascii_lowercase() {
            element.push(chars[i]);
            i += 1;
        }

        let mut digits = String::new();
        while i < chars.len() && chars[i].is_ascii_digit() {
            digits.push(chars[i]);
            i += 1;
        }
        let count: u32 = if digits.is_empty() {
            1
        } else {
            digits.parse().map_err(|_| {
                MolevalError::Config(format!("invalid molecular formula: {formula}"))
            })?
        };

        *counts.entry(element).or_insert(0) += count;
    }

    if counts.is_empty() {
        return Err(MolevalError::Config(format!(
            "invalid molecular formula: {formula}"
        )));
    }
    Ok(counts)
}

/// Total atom count of a parsed formula.
pub fn total_atoms(counts: &BTreeMap<String, u32>) -> u32 {
    counts.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_formula() {
        let counts = parse_formula("C11H24").unwrap();
        assert_eq!(counts.get("C"), Some(&11));
        assert_eq!(counts.get("H"), Some(&24));
        assert_eq!(total_atoms(&counts), 35);
    }

    #[test]
    fn test_parse_formula_with_two_letter_elements() {
        let counts = parse_formula("C9H10N2O2PF2Cl").unwrap();
        assert_eq!(counts.get("Cl"), Some(&1));
        assert_eq!(counts.get("F"), Some(&2));
        assert_eq!(counts.get("P"), Some(&1));
        assert_eq!(counts.get("N"), Some(&2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("9C").is_err());
        assert!(parse_formula("c9").is_err());
    }
}
