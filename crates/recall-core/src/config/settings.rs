use std::path::PathBuf;

use crate::error::CoreError;

pub const STORE_ENV: &str = "RECALL_STORE";
pub const SEARCH_LIMIT_ENV: &str = "RECALL_SEARCH_LIMIT";

const DEFAULT_STORE_PATH: &str = "data/knowledge_base.json";
const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RecallConfig {
    pub store_path: PathBuf,
    pub search_limit: usize,
}

impl RecallConfig {
    /// Read config from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store_path = get(STORE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let search_limit = match get(SEARCH_LIMIT_ENV) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CoreError::Config(format!(
                    "{SEARCH_LIMIT_ENV} must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_SEARCH_LIMIT,
        };
        if search_limit == 0 {
            return Err(CoreError::Config(format!(
                "{SEARCH_LIMIT_ENV} must be greater than zero"
            )));
        }

        Ok(Self {
            store_path,
            search_limit,
        })
    }

    /// Replace the store path, e.g. from a command-line flag.
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store_path = path;
        }
        self
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}
