//! Environment snapshot.
//!
//! The process environment is read once at startup. Everything downstream looks
//! variables up through [`EnvConfig`] so tests can supply their own values.

use std::collections::HashMap;

/// Build workspace root
pub const BASE_DIR: &str = "BASE_DIR";
/// Repository publishing username
pub const REPO_USER: &str = "REPO_USER";
/// Repository publishing API key
pub const REPO_API_KEY: &str = "REPO_API_KEY";

/// Immutable view of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_present() {
        let env = EnvConfig::from_pairs([(BASE_DIR, "/build")]);
        assert_eq!(env.get(BASE_DIR), Some("/build".to_string()));
    }

    #[test]
    fn test_get_missing_and_empty() {
        let env = EnvConfig::from_pairs([(REPO_USER, "")]);
        assert_eq!(env.get(REPO_USER), None);
        assert_eq!(env.get(REPO_API_KEY), None);
    }
}
