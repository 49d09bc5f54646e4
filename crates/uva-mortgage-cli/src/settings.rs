use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use uva_mortgage_core::index::{FeedConfig, DEFAULT_TIMEOUT_SECS, FALLBACK_INDEX_VALUE};

use crate::input;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Feed publishing the UVA series. Without it the fallback value is used.
    pub feed_url: Option<String>,
    pub fallback_index_value: Decimal,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            feed_url: None,
            fallback_index_value: FALLBACK_INDEX_VALUE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON or YAML file, or fall back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => input::file::read_input(p),
            None => Ok(Settings::default()),
        }
    }

    /// Command-line flags and environment take precedence over the file.
    pub fn with_overrides(mut self, feed_url: Option<String>, log_level: Option<String>) -> Self {
        if feed_url.is_some() {
            self.feed_url = feed_url;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    pub fn feed_config(&self) -> Option<FeedConfig> {
        self.feed_url.as_ref().map(|url| FeedConfig {
            timeout_secs: self.request_timeout_secs,
            ..FeedConfig::new(url.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.feed_url, None);
        assert_eq!(s.fallback_index_value, dec!(1530.69));
        assert_eq!(s.log_level, "warn");
        assert!(s.feed_config().is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let s: Settings = serde_yaml::from_str("feed_url: http://localhost/uva\n").unwrap();
        assert_eq!(s.feed_url.as_deref(), Some("http://localhost/uva"));
        assert_eq!(s.request_timeout_secs, 10);
        assert_eq!(s.feed_config().unwrap().url, "http://localhost/uva");
    }

    #[test]
    fn test_flags_override_file() {
        let s = Settings {
            feed_url: Some("http://file/uva".into()),
            ..Settings::default()
        }
        .with_overrides(Some("http://flag/uva".into()), Some("debug".into()));
        assert_eq!(s.feed_url.as_deref(), Some("http://flag/uva"));
        assert_eq!(s.log_level, "debug");

        let kept = Settings {
            feed_url: Some("http://file/uva".into()),
            ..Settings::default()
        }
        .with_overrides(None, None);
        assert_eq!(kept.feed_url.as_deref(), Some("http://file/uva"));
    }
}
