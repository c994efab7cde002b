use std::env;
use std::path::PathBuf;

use crate::classifier::download::{
    self, DEFAULT_HF_ENDPOINT, DEFAULT_SENTIMENT_MODEL, DEFAULT_TOXICITY_MODEL,
};

/// Central configuration loaded from environment variables.
///
/// Nothing is required; every value has a default. The .env file is loaded
/// automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for downloaded model files
    pub model_dir: PathBuf,
    /// HuggingFace repo id of the toxicity model
    pub toxicity_model: String,
    /// HuggingFace repo id of the sentiment model
    pub sentiment_model: String,
    /// HuggingFace base URL (mirrors and local proxies override this)
    pub hf_endpoint: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            model_dir: get("TOXCHECK_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(download::default_model_dir),
            toxicity_model: get("TOXCHECK_TOXICITY_MODEL")
                .unwrap_or_else(|| DEFAULT_TOXICITY_MODEL.to_string()),
            sentiment_model: get("TOXCHECK_SENTIMENT_MODEL")
                .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string()),
            hf_endpoint: get("TOXCHECK_HF_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_HF_ENDPOINT.to_string()),
        }
    }

    /// Directory holding the toxicity model's files.
    pub fn toxicity_model_dir(&self) -> PathBuf {
        download::repo_dir(&self.model_dir, &self.toxicity_model)
    }

    /// Directory holding the sentiment model's files.
    pub fn sentiment_model_dir(&self) -> PathBuf {
        download::repo_dir(&self.model_dir, &self.sentiment_model)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.toxicity_model, DEFAULT_TOXICITY_MODEL);
        assert_eq!(config.sentiment_model, DEFAULT_SENTIMENT_MODEL);
        assert_eq!(config.hf_endpoint, DEFAULT_HF_ENDPOINT);
        assert_eq!(config.model_dir, download::default_model_dir());
    }

    #[test]
    fn test_overrides_and_model_dirs() {
        let config = Config::from_lookup(lookup_from(&[
            ("TOXCHECK_MODEL_DIR", "/opt/models"),
            ("TOXCHECK_TOXICITY_MODEL", "acme/tox"),
            ("TOXCHECK_SENTIMENT_MODEL", "acme/senti"),
        ]));
        assert_eq!(config.toxicity_model_dir(), PathBuf::from("/opt/models/acme--tox"));
        assert_eq!(config.sentiment_model_dir(), PathBuf::from("/opt/models/acme--senti"));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let config = Config::from_lookup(lookup_from(&[("TOXCHECK_HF_ENDPOINT", "")]));
        assert_eq!(config.hf_endpoint, DEFAULT_HF_ENDPOINT);
    }
}
