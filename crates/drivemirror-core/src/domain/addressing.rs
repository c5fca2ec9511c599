//! Addressing modes and identifier derivation
//!
//! A source object key is an opaque string that may contain `/` separators
//! (e.g. `reports/2026/summary.pdf`). The *identifier* derived from a key is
//! the string the reconciliation engine uses to match a source object against
//! a destination entry name. Two modes exist:
//!
//! - [`AddressingMode::Hierarchical`]: the identifier is the key verbatim and
//!   directory components become nested destination folders.
//! - [`AddressingMode::Flattened`]: every separator is replaced with `_`,
//!   collapsing the whole key space into a single-level naming scheme.
//!
//! Flattening performs no escaping, so distinct keys can map to the same
//! identifier (`a/b.txt` and `a_b.txt`). The differ resolves such collisions
//! with a logged last-write-wins policy when it builds its index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Separator used in source object keys and destination folder paths.
pub const PATH_SEPARATOR: char = '/';

/// How source keys are mapped onto destination-facing names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    /// Keep the key as-is; directory components become nested folders
    Hierarchical,
    /// Collapse the key into a single-level name by replacing `/` with `_`
    Flattened,
}

impl AddressingMode {
    /// Returns the canonical configuration name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            AddressingMode::Hierarchical => "hierarchical",
            AddressingMode::Flattened => "flattened",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AddressingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hierarchical" => Ok(AddressingMode::Hierarchical),
            "flattened" => Ok(AddressingMode::Flattened),
            other => Err(DomainError::InvalidAddressingMode(other.to_string())),
        }
    }
}

/// Derives the destination-facing identifier for a source key
///
/// Pure function with no failure modes: hierarchical mode is the identity,
/// flattened mode replaces every separator with `_`.
pub fn identifier_for(key: &str, mode: AddressingMode) -> String {
    match mode {
        AddressingMode::Hierarchical => key.to_string(),
        AddressingMode::Flattened => key.replace(PATH_SEPARATOR, "_"),
    }
}

/// Splits an identifier into `(directory_path, file_name)` at the last separator
///
/// Returns `("", identifier)` when the identifier carries no separator, which
/// addresses the destination root.
pub fn split_identifier(identifier: &str) -> (&str, &str) {
    match identifier.rsplit_once(PATH_SEPARATOR) {
        Some((dir, name)) => (dir, name),
        None => ("", identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchical_identifier_is_the_key() {
        assert_eq!(
            identifier_for("a/b/c.txt", AddressingMode::Hierarchical),
            "a/b/c.txt"
        );
        assert_eq!(
            identifier_for("c.txt", AddressingMode::Hierarchical),
            "c.txt"
        );
    }

    #[test]
    fn flattened_identifier_replaces_every_separator() {
        assert_eq!(
            identifier_for("a/b/c.txt", AddressingMode::Flattened),
            "a_b_c.txt"
        );
    }

    #[test]
    fn flattened_identifier_without_separator_is_unchanged() {
        assert_eq!(identifier_for("c.txt", AddressingMode::Flattened), "c.txt");
    }

    #[test]
    fn flattened_collisions_are_possible() {
        // No escaping takes place, so these two distinct keys collide.
        let a = identifier_for("a/b.txt", AddressingMode::Flattened);
        let b = identifier_for("a_b.txt", AddressingMode::Flattened);
        assert_eq!(a, b);
    }

    #[test]
    fn split_identifier_root_file() {
        assert_eq!(split_identifier("file.txt"), ("", "file.txt"));
    }

    #[test]
    fn split_identifier_nested() {
        assert_eq!(
            split_identifier("docs/2026/readme.md"),
            ("docs/2026", "readme.md")
        );
    }

    #[test]
    fn split_identifier_single_level() {
        assert_eq!(split_identifier("docs/readme.md"), ("docs", "readme.md"));
    }

    #[test]
    fn mode_parses_from_config_names() {
        assert_eq!(
            "hierarchical".parse::<AddressingMode>().unwrap(),
            AddressingMode::Hierarchical
        );
        assert_eq!(
            "flattened".parse::<AddressingMode>().unwrap(),
            AddressingMode::Flattened
        );
    }

    #[test]
    fn mode_parse_rejects_unknown_names() {
        let err = "sideways".parse::<AddressingMode>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidAddressingMode(_)));
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in [AddressingMode::Hierarchical, AddressingMode::Flattened] {
            assert_eq!(mode.to_string().parse::<AddressingMode>().unwrap(), mode);
        }
    }
}
