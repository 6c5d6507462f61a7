use std::path::PathBuf;

use crate::errors::AppError;

const DEFAULT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON seed file replacing the built-in data, if set.
    pub seed_path: Option<PathBuf>,
    /// Entries shown in the dashboard activity feed.
    pub activity_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading through `lookup`, so tests
    /// don't have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_path = lookup("PETCARE_SEED_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let activity_limit = lookup("PETCARE_ACTIVITY_LIMIT")
            .map(|val| val.trim().parse::<usize>())
            .unwrap_or(Ok(DEFAULT_ACTIVITY_LIMIT))
            .map_err(|_| AppError::configuration("PETCARE_ACTIVITY_LIMIT must be a valid integer"))?;

        Ok(Self {
            seed_path,
            activity_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PETCARE_SEED_PATH", "/tmp/seed.json"),
            ("PETCARE_ACTIVITY_LIMIT", "12"),
        ]))
        .unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.activity_limit, 12);
    }

    #[test]
    fn blank_seed_path_is_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("PETCARE_SEED_PATH", "  ")])).unwrap();
        assert_eq!(config.seed_path, None);
    }

    #[test]
    fn rejects_non_numeric_limit() {
        let err = AppConfig::from_lookup(lookup(&[("PETCARE_ACTIVITY_LIMIT", "lots")])).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }
}
