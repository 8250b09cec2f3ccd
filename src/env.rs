//! Environment snapshot module
//!
//! Read-only view of the tracked environment variables, captured at request
//! time. Handlers never touch `std::env` directly; they receive a snapshot,
//! so tests can build synthetic environments without mutating the process.

use std::collections::HashMap;

/// Default string reported for an absent variable
pub const NOT_SET: &str = "not_set";

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const API_KEY: &str = "API_KEY";
pub const APP_CONFIG: &str = "APP_CONFIG";
pub const FEATURE_FLAGS: &str = "FEATURE_FLAGS";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const JWT_SECRET: &str = "JWT_SECRET";
pub const ENCRYPTION_KEY: &str = "ENCRYPTION_KEY";

/// All variables the server reports on
pub const TRACKED_VARS: [&str; 8] = [
    DATABASE_URL,
    API_KEY,
    APP_CONFIG,
    FEATURE_FLAGS,
    ENVIRONMENT,
    DB_PASSWORD,
    JWT_SECRET,
    ENCRYPTION_KEY,
];

/// Read-only mapping of tracked variable names to their values.
///
/// A variable absent from the map was unset (or not valid Unicode) when the
/// snapshot was captured. An empty string means it was set but empty; the
/// two cases are distinguished on purpose, see [`Self::value_or_default`]
/// and [`Self::is_present`].
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the tracked variables from the live process environment
    pub fn capture() -> Self {
        let vars = TRACKED_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| ((*name).to_string(), v)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs (used by tests)
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    /// Raw value of a variable, if set
    pub fn value(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of a variable, or `not_set` when absent.
    ///
    /// Only absence triggers the default: an explicitly empty value passes
    /// through as the empty string.
    pub fn value_or_default(&self, name: &str) -> &str {
        self.value(name).unwrap_or(NOT_SET)
    }

    /// Whether a variable is set and non-empty.
    ///
    /// Empty string counts as absent here, unlike [`Self::value_or_default`].
    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).is_some_and(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_variable() {
        let env = EnvSnapshot::default();
        assert_eq!(env.value(DATABASE_URL), None);
        assert_eq!(env.value_or_default(DATABASE_URL), NOT_SET);
        assert!(!env.is_present(DATABASE_URL));
    }

    #[test]
    fn test_set_variable() {
        let env = EnvSnapshot::from_pairs([(DATABASE_URL, "postgres://x")]);
        assert_eq!(env.value(DATABASE_URL), Some("postgres://x"));
        assert_eq!(env.value_or_default(DATABASE_URL), "postgres://x");
        assert!(env.is_present(DATABASE_URL));
    }

    #[test]
    fn test_empty_is_not_present_but_passes_through() {
        let env = EnvSnapshot::from_pairs([(API_KEY, "")]);
        // Presence requires set and non-empty
        assert!(!env.is_present(API_KEY));
        // String lookup only defaults on absence
        assert_eq!(env.value_or_default(API_KEY), "");
    }

    #[test]
    fn test_special_characters_untransformed() {
        let env = EnvSnapshot::from_pairs([(APP_CONFIG, "a=1;b=\"两\" \n")]);
        assert_eq!(env.value_or_default(APP_CONFIG), "a=1;b=\"两\" \n");
    }

    #[test]
    fn test_untracked_name_is_absent() {
        let env = EnvSnapshot::from_pairs([("PATH", "/usr/bin")]);
        assert!(!env.is_present(DB_PASSWORD));
        assert_eq!(env.value_or_default(DB_PASSWORD), NOT_SET);
    }
}
