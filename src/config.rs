use std::env;

use crate::constants::{
    ENV_DB_HOST, ENV_DB_NAME, ENV_DB_PASSWORD, ENV_DB_USER, ENV_OPENAI_API_KEY,
};
use crate::error::{LoaderError, Result};

/// Everything the loader reads from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub tagger: Option<TaggerConfig>,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub struct TaggerConfig {
    pub api_key: String,
}

impl std::fmt::Debug for TaggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerConfig").field("api_key", &"***").finish()
    }
}

impl Config {
    /// Load from the process environment, after merging a `.env` file if one exists.
    pub fn load(require_tagger: bool) -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok(), require_tagger)
    }

    /// Build from any key lookup; empty values count as missing.
    pub fn from_lookup<F>(lookup: F, require_tagger: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                LoaderError::Config(format!("{key} environment variable not set"))
            })
        };

        let database = DatabaseConfig {
            host: required(ENV_DB_HOST)?,
            name: required(ENV_DB_NAME)?,
            user: required(ENV_DB_USER)?,
            password: required(ENV_DB_PASSWORD)?,
        };

        let tagger = if require_tagger {
            Some(TaggerConfig {
                api_key: required(ENV_OPENAI_API_KEY)?,
            })
        } else {
            None
        };

        Ok(Self { database, tagger })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FULL: [(&str, &str); 5] = [
        ("DB_HOST", "localhost"),
        ("DB_NAME", "leads"),
        ("DB_USER", "loader"),
        ("DB_PASSWORD", "hunter2"),
        ("OPENAI_API_KEY", "sk-test"),
    ];

    #[test]
    fn test_full_environment() {
        let config = Config::from_lookup(lookup(&FULL), true).unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.name, "leads");
        assert_eq!(config.tagger.unwrap().api_key, "sk-test");
    }

    #[test]
    fn test_missing_db_setting_is_config_error() {
        let err = Config::from_lookup(lookup(&FULL[1..]), false).unwrap_err();
        assert!(matches!(err, LoaderError::Config(msg) if msg.contains("DB_HOST")));
    }

    #[test]
    fn test_api_key_only_required_when_tagging() {
        let config = Config::from_lookup(lookup(&FULL[..4]), false).unwrap();
        assert!(config.tagger.is_none());

        let err = Config::from_lookup(lookup(&FULL[..4]), true).unwrap_err();
        assert!(matches!(err, LoaderError::Config(msg) if msg.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = FULL.to_vec();
        pairs[3] = ("DB_PASSWORD", "  ");
        let err = Config::from_lookup(lookup(&pairs), false).unwrap_err();
        assert!(matches!(err, LoaderError::Config(msg) if msg.contains("DB_PASSWORD")));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup(&FULL), true).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("sk-test"));
    }
}
