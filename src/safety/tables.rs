use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::config::GuardConfig;
use crate::error::ConfigError;

/// URL shorteners, raw IPv4 hosts and free or abuse-prone TLDs.
const SUSPICIOUS_URL_PATTERNS: &[&str] = &[
    r"bit\.ly",
    r"tinyurl\.com",
    r"goo\.gl",
    r"t\.co",
    r"ow\.ly",
    r"is\.gd",
    r"buff\.ly",
    r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}",
    r"[a-zA-Z0-9]+-[a-zA-Z0-9]+-[a-zA-Z0-9]+\.(tk|ml|ga|cf)",
    r"[a-zA-Z0-9]+\.(tk|ml|ga|cf|pw|top)",
];

/// Fraud, adult, gambling and piracy keywords.
const BLOCKED_URL_KEYWORDS: &[&str] = &[
    "phishing", "scam", "fraud", "malware", "virus", "trojan", "adult", "porn", "xxx",
    "gambling", "casino", "bet", "drugs", "illegal", "piracy", "torrent", "warez",
];

/// Major platforms that bypass every other URL check.
const SAFE_DOMAINS: &[&str] = &[
    "facebook.com", "instagram.com", "twitter.com", "x.com", "youtube.com", "tiktok.com",
    "linkedin.com", "pinterest.com", "snapchat.com", "reddit.com", "discord.com",
    "telegram.org", "whatsapp.com", "google.com", "microsoft.com", "apple.com",
];

const SUSPICIOUS_QUERY_PARAMS: &[&str] = &["redirect", "goto", "url", "link", "next"];

const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".pw", ".top"];

const BLOCKED_CONTENT_PATTERNS: &[&str] = &[
    r"\b(phishing|scam|fraud)\b",
    r"\b(malware|virus|trojan)\b",
    r"\b(illegal|drugs|weapons)\b",
    r"\b(adult|porn|xxx)\b",
    r"\b(gambling|casino|bet)\b",
];

static DEFAULT_TABLES: LazyLock<SafetyTables> = LazyLock::new(|| {
    SafetyTables::from_config(&GuardConfig::default())
        .expect("built-in safety patterns are valid regexes")
});

/// Returns the process-wide tables built from the built-in lists.
pub fn default_tables() -> &'static SafetyTables {
    &DEFAULT_TABLES
}

/// Structural limits applied to parsed URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlLimits {
    /// Path length above which a warning is raised
    pub max_path_length: usize,
    /// Number of `/` in the path above which a warning is raised
    pub max_path_depth: usize,
    /// Number of dots in the host above which a warning is raised
    pub max_host_dots: usize,
}

/// Compiled allowlists, blocklists and limits shared by the gates.
///
/// Tables are immutable once built. Build them once at start-up (or use
/// [`default_tables`]) and share them by reference.
///
/// # Examples
///
/// ```
/// use api_guard::{GuardConfig, safety::{SafetyTables, UrlGate}};
///
/// let cfg = GuardConfig::from_toml_str("[url]\nextra_blocked_keywords = [\"lottery\"]\n").unwrap();
/// let tables = SafetyTables::from_config(&cfg).unwrap();
///
/// let verdict = UrlGate::new(&tables).evaluate("https://lottery-winners.example/");
/// assert!(!verdict.is_safe());
/// ```
#[derive(Debug, Clone)]
pub struct SafetyTables {
    pub(crate) suspicious_patterns: Vec<(String, Regex)>,
    pub(crate) blocked_keywords: Vec<String>,
    pub(crate) safe_domains: Vec<String>,
    pub(crate) suspicious_params: Vec<String>,
    pub(crate) suspicious_tlds: Vec<String>,
    pub(crate) content_patterns: Vec<Regex>,
    pub(crate) limits: UrlLimits,
}

impl SafetyTables {
    /// Compiles the built-in lists extended by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when a configured pattern is
    /// not a valid regex.
    pub fn from_config(config: &GuardConfig) -> Result<Self, ConfigError> {
        let suspicious_patterns = SUSPICIOUS_URL_PATTERNS
            .iter()
            .copied()
            .chain(config.url.extra_suspicious_patterns.iter().map(String::as_str))
            .map(|p| compile(p).map(|re| (p.to_string(), re)))
            .collect::<Result<Vec<_>, _>>()?;

        let content_patterns = BLOCKED_CONTENT_PATTERNS
            .iter()
            .copied()
            .chain(config.content.extra_blocked_patterns.iter().map(String::as_str))
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            suspicious_patterns,
            blocked_keywords: extend(BLOCKED_URL_KEYWORDS, &config.url.extra_blocked_keywords),
            safe_domains: extend(SAFE_DOMAINS, &config.url.extra_safe_domains),
            suspicious_params: extend(SUSPICIOUS_QUERY_PARAMS, &[]),
            suspicious_tlds: extend(SUSPICIOUS_TLDS, &[]),
            content_patterns,
            limits: UrlLimits {
                max_path_length: config.url.max_path_length,
                max_path_depth: config.url.max_path_depth,
                max_host_dots: config.url.max_host_dots,
            },
        })
    }

    /// Returns the structural limits.
    pub fn limits(&self) -> UrlLimits {
        self.limits
    }

    /// Returns the trusted domains.
    pub fn safe_domains(&self) -> &[String] {
        &self.safe_domains
    }

    /// Returns the blocked URL keywords.
    pub fn blocked_keywords(&self) -> &[String] {
        &self.blocked_keywords
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn extend(builtin: &[&str], extra: &[String]) -> Vec<String> {
    builtin
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().filter(|e| !builtin.contains(&e.as_str())).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_compile() {
        let tables = default_tables();

        assert_eq!(tables.suspicious_patterns.len(), SUSPICIOUS_URL_PATTERNS.len());
        assert_eq!(tables.content_patterns.len(), BLOCKED_CONTENT_PATTERNS.len());
        assert_eq!(tables.limits().max_path_length, 300);
    }

    #[test]
    fn extras_extend_builtins_without_duplicates() {
        let cfg = GuardConfig::from_toml_str(
            "[url]\nextra_safe_domains = [\"example.org\", \"google.com\"]\n",
        )
        .unwrap();
        let tables = SafetyTables::from_config(&cfg).unwrap();

        assert_eq!(tables.safe_domains().len(), SAFE_DOMAINS.len() + 1);
        assert_eq!(tables.safe_domains().last().unwrap(), "example.org");
    }

    #[test]
    fn invalid_extra_pattern_is_rejected() {
        let cfg = GuardConfig::from_toml_str("[content]\nextra_blocked_patterns = [\"(\"]\n")
            .unwrap();

        let result = SafetyTables::from_config(&cfg);

        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let tables = default_tables();

        assert!(tables.suspicious_patterns[0].1.is_match("HTTP://BIT.LY/x"));
        assert!(tables.content_patterns[4].is_match("CASINO night"));
    }
}
