// splike-core - Interpreter configuration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Interpreter configuration, with overrides from the environment.

use crate::error::{Error, Result};

/// Default evaluation depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

pub const ENV_MAX_DEPTH: &str = "SPLIKE_MAX_DEPTH";
pub const ENV_ALLOW_HOST: &str = "SPLIKE_ALLOW_HOST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Evaluation depth at which a fatal stack overflow is raised.
    pub max_depth: usize,
    /// Evaluate the embedded prelude when the interpreter is created.
    pub load_prelude: bool,
    /// Host namespaces reachable through `a/b` identifiers. `None` allows all.
    pub host_namespaces: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            load_prelude: true,
            host_namespaces: None,
        }
    }
}

impl Config {
    /// Defaults, overridden by `SPLIKE_MAX_DEPTH` and `SPLIKE_ALLOW_HOST`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = parse_max_depth(ENV_MAX_DEPTH, &value)?;
        }
        if let Some(value) = lookup(ENV_ALLOW_HOST) {
            config.host_namespaces = Some(parse_namespaces(&value));
        }
        Ok(config)
    }
}

/// Parse a depth limit. Zero is rejected since nothing could evaluate.
pub fn parse_max_depth(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(Error::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Split a comma-separated namespace list, dropping blanks.
pub fn parse_namespaces(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_depth, 10_000);
        assert!(config.load_prelude);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(|key| match key {
            ENV_MAX_DEPTH => Some("250".to_string()),
            ENV_ALLOW_HOST => Some("Math, JSON,,".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.max_depth, 250);
        assert_eq!(
            config.host_namespaces,
            Some(vec!["Math".to_string(), "JSON".to_string()])
        );
    }

    #[test]
    fn test_invalid_depth() {
        let err = Config::from_lookup(|key| (key == ENV_MAX_DEPTH).then(|| "lots".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value `lots` for SPLIKE_MAX_DEPTH");
        assert!(parse_max_depth("--max-depth", "0").is_err());
    }
}
