//! Alias table: colloquial names and common misspellings mapped to canonical place names
//!
//! Built once when the chat service starts and shared read-only (behind an
//! `Arc`) by the intent parser and the location resolver.

use std::collections::HashMap;

/// Built-in `(alias, canonical)` pairs. Aliases are stored lower-cased.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("bombay", "mumbai"),
    ("bangalore", "bengaluru"),
    ("banglore", "bengaluru"),
    ("bengalooru", "bengaluru"),
    ("calcutta", "kolkata"),
    ("madras", "chennai"),
    ("poona", "pune"),
    ("gurgaon", "gurugram"),
    ("mysore", "mysuru"),
    ("trivandrum", "thiruvananthapuram"),
    ("benaras", "varanasi"),
    ("banaras", "varanasi"),
    ("vizag", "visakhapatnam"),
    ("pondicherry", "puducherry"),
    ("cochin", "kochi"),
    ("baroda", "vadodara"),
    ("simla", "shimla"),
    ("nyc", "new york"),
    ("sf", "san francisco"),
    ("peking", "beijing"),
    ("saigon", "ho chi minh city"),
];

/// Immutable alias lookup table
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Table containing only the built-in aliases
    #[must_use]
    pub fn builtin() -> Self {
        Self::with_overrides(std::iter::empty::<(String, String)>())
    }

    /// Built-in aliases plus `overrides`; an override replaces a built-in with the same alias
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries: HashMap<String, String> = BUILTIN_ALIASES
            .iter()
            .map(|(alias, canonical)| ((*alias).to_string(), (*canonical).to_string()))
            .collect();

        for (alias, canonical) in overrides {
            entries.insert(
                normalize(alias.as_ref()),
                canonical.as_ref().trim().to_string(),
            );
        }

        Self { entries }
    }

    /// Canonical form for `raw`, matched lower-cased and trimmed
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.entries.get(&normalize(raw)).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
