//! TOML configuration for the safety tables.
//!
//! Configuration only ever extends the built-in tables and tunes the
//! structural limits. It is read once at start-up and compiled into
//! [`SafetyTables`](crate::safety::SafetyTables).

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "API_GUARD_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "api-guard.toml";

/// Root of the configuration file.
///
/// # Examples
///
/// ```
/// use api_guard::GuardConfig;
///
/// let cfg = GuardConfig::from_toml_str(r#"
///     [url]
///     extra_safe_domains = ["Example.org"]
///     max_path_depth = 8
/// "#).unwrap();
///
/// assert_eq!(cfg.url.extra_safe_domains, vec!["example.org"]);
/// assert_eq!(cfg.url.max_path_depth, 8);
/// assert_eq!(cfg.url.max_path_length, 300);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// URL evaluator settings
    #[serde(default)]
    pub url: UrlConfig,
    /// Text evaluator settings
    #[serde(default)]
    pub content: ContentConfig,
}

/// URL evaluator settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UrlConfig {
    /// Domains trusted in addition to the built-in allowlist
    #[serde(default)]
    pub extra_safe_domains: Vec<String>,
    /// Keywords blocked in addition to the built-in blocklist
    #[serde(default)]
    pub extra_blocked_keywords: Vec<String>,
    /// Regexes flagged as suspicious in addition to the built-in set
    #[serde(default)]
    pub extra_suspicious_patterns: Vec<String>,
    /// Path length above which a warning is raised
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
    /// Number of `/` in the path above which a warning is raised
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
    /// Number of dots in the host above which a warning is raised
    #[serde(default = "default_max_host_dots")]
    pub max_host_dots: usize,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            extra_safe_domains: Vec::new(),
            extra_blocked_keywords: Vec::new(),
            extra_suspicious_patterns: Vec::new(),
            max_path_length: default_max_path_length(),
            max_path_depth: default_max_path_depth(),
            max_host_dots: default_max_host_dots(),
        }
    }
}

/// Text evaluator settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Regexes blocked in addition to the built-in content patterns
    #[serde(default)]
    pub extra_blocked_patterns: Vec<String>,
}

fn default_max_path_length() -> usize {
    300
}

fn default_max_path_depth() -> usize {
    12
}

fn default_max_host_dots() -> usize {
    3
}

/// Loads the file named by [`CONFIG_PATH_ENV`], or [`DEFAULT_CONFIG_PATH`].
pub fn load_default() -> Result<GuardConfig, ConfigError> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_from_file(&path)
}

/// Loads, normalizes and validates a configuration file.
pub fn load_from_file(path: &str) -> Result<GuardConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    GuardConfig::from_toml_str(&content)
}

impl GuardConfig {
    /// Parses, normalizes and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut cfg: GuardConfig = toml::from_str(content)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Lower-cases and trims list entries, drops empty ones and checks limits.
    ///
    /// Patterns are trimmed but keep their case; they are compiled
    /// case-insensitive.
    pub fn normalize_and_validate(&mut self) -> Result<(), ConfigError> {
        normalize_words(&mut self.url.extra_safe_domains);
        normalize_words(&mut self.url.extra_blocked_keywords);
        normalize_patterns(&mut self.url.extra_suspicious_patterns);
        normalize_patterns(&mut self.content.extra_blocked_patterns);

        for (name, value) in [
            ("url.max_path_length", self.url.max_path_length),
            ("url.max_path_depth", self.url.max_path_depth),
            ("url.max_host_dots", self.url.max_host_dots),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidLimit {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn normalize_words(entries: &mut Vec<String>) {
    for entry in entries.iter_mut() {
        *entry = entry.trim().to_lowercase();
    }
    entries.retain(|e| !e.is_empty());
}

fn normalize_patterns(entries: &mut Vec<String>) {
    for entry in entries.iter_mut() {
        *entry = entry.trim().to_string();
    }
    entries.retain(|e| !e.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = GuardConfig::from_toml_str("").unwrap();

        assert_eq!(cfg, GuardConfig::default());
        assert_eq!(cfg.url.max_path_length, 300);
        assert_eq!(cfg.url.max_path_depth, 12);
        assert_eq!(cfg.url.max_host_dots, 3);
    }

    #[test]
    fn entries_are_normalized() {
        let cfg = GuardConfig::from_toml_str(
            r#"
            [url]
            extra_blocked_keywords = ["  Lottery ", ""]
            extra_suspicious_patterns = [" rb\\.gy "]

            [content]
            extra_blocked_patterns = ["\\b(lottery)\\b"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.url.extra_blocked_keywords, vec!["lottery"]);
        assert_eq!(cfg.url.extra_suspicious_patterns, vec![r"rb\.gy"]);
        assert_eq!(cfg.content.extra_blocked_patterns, vec![r"\b(lottery)\b"]);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let result = GuardConfig::from_toml_str("[url]\nmax_host_dots = 0\n");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLimit { name: "url.max_host_dots", .. })
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = GuardConfig::from_toml_str("[url]\nmax_depth = 4\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_from_file("/nonexistent/api-guard.toml");

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
