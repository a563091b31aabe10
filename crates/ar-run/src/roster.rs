//! Character rosters and their validation.

use std::collections::HashSet;

use crate::error::{RunError, RunResult};

/// The Rivals of Aether II cast, in portrait display order.
pub const DEFAULT_ROSTER: [&str; 14] = [
    "Absa",
    "Clairen",
    "Etalus",
    "Fleet",
    "Forsburn",
    "Galvan",
    "Kragg",
    "Loxodont",
    "Maypul",
    "Olympia",
    "Orcane",
    "Wrastor",
    "Zetterburn",
    "Ranno",
];

/// The default roster as owned names.
pub fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect()
}

/// Check that a roster can start a run: non-empty, no blank names, no
/// duplicates. Names are compared exactly.
pub fn validate(characters: &[String]) -> RunResult<()> {
    if characters.is_empty() {
        return Err(RunError::EmptyRoster);
    }

    let mut seen = HashSet::with_capacity(characters.len());
    for name in characters {
        if name.trim().is_empty() {
            return Err(RunError::BlankCharacter);
        }
        if !seen.insert(name.as_str()) {
            return Err(RunError::DuplicateCharacter(name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_roster_is_valid() {
        assert_eq!(default_roster().len(), 14);
        assert!(validate(&default_roster()).is_ok());
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(validate(&[]), Err(RunError::EmptyRoster));
    }

    #[test]
    fn duplicate_rejected() {
        let roster = names(&["Kragg", "Etalus", "Kragg"]);
        assert_eq!(
            validate(&roster),
            Err(RunError::DuplicateCharacter("Kragg".into()))
        );
    }

    #[test]
    fn blank_rejected() {
        assert_eq!(
            validate(&names(&["Kragg", "  "])),
            Err(RunError::BlankCharacter)
        );
    }

    #[test]
    fn case_differs_is_not_duplicate() {
        assert!(validate(&names(&["kragg", "Kragg"])).is_ok());
    }
}
