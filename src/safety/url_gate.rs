use tracing::warn;
use url::{ParseError, Url};

use super::tables::{default_tables, SafetyTables};
use super::verdict::Verdict;
use crate::error::{ValidationError, ValidationErrorKind};

/// Warning added when a URL could not be parsed or contains invalid escapes.
pub const INCOMPLETE_VALIDATION_WARNING: &str = "Could not fully validate URL security";

/// Evaluator for submitted URLs.
///
/// Checks run in order:
/// 1. Hosts (without a leading `www.`) containing a trusted domain are safe
///    with no further checks.
/// 2. Suspicious patterns (shorteners, raw IPs, abuse-prone TLDs) add warnings.
/// 3. Blocked keywords anywhere in the URL block it.
/// 4. Long or deep paths and redirect-style query parameters add warnings.
/// 5. Suspicious TLDs and deeply nested subdomains add warnings.
///
/// # Examples
///
/// ```
/// use api_guard::safety::UrlGate;
///
/// let gate = UrlGate::builtin();
///
/// let verdict = gate.evaluate("https://www.facebook.com/x");
/// assert!(verdict.is_safe());
/// assert!(verdict.warnings().is_empty());
///
/// let verdict = gate.evaluate("http://bit.ly/abc");
/// assert!(verdict.is_safe());
/// assert!(!verdict.warnings().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UrlGate<'t> {
    tables: &'t SafetyTables,
}

impl UrlGate<'static> {
    /// Creates a gate over the process-wide built-in tables.
    pub fn builtin() -> Self {
        Self::new(default_tables())
    }
}

impl Default for UrlGate<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> UrlGate<'t> {
    /// Creates a gate over the given tables.
    pub fn new(tables: &'t SafetyTables) -> Self {
        Self { tables }
    }

    /// Evaluates a URL.
    ///
    /// Never fails: malformed input yields a verdict carrying
    /// [`INCOMPLETE_VALIDATION_WARNING`]. When the URL cannot be parsed the
    /// pattern and keyword checks still run on the raw string. A link without
    /// a scheme (`www.example.com/page`) is checked as an `http` link.
    pub fn evaluate(&self, url: &str) -> Verdict {
        let mut verdict = Verdict::safe();
        let lowered = url.to_lowercase();

        let parsed = match parse_link(&lowered) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(url = %url, error = %e, "URL security validation error");
                None
            }
        };
        let host = parsed
            .as_ref()
            .and_then(Url::host_str)
            .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string());

        match &parsed {
            Some(_) if has_invalid_escape(url) => {
                warn!(url = %url, "URL contains invalid percent-encoding");
                verdict.warn(INCOMPLETE_VALIDATION_WARNING);
            }
            Some(_) => {}
            None => verdict.warn(INCOMPLETE_VALIDATION_WARNING),
        }

        if let Some(host) = &host {
            if self.is_trusted(host) {
                return verdict;
            }
        }

        for (pattern, re) in &self.tables.suspicious_patterns {
            if re.is_match(url) {
                verdict.warn(format!("Suspicious pattern detected: {}", pattern));
            }
        }

        for keyword in &self.tables.blocked_keywords {
            if lowered.contains(keyword.as_str()) {
                verdict.block(format!("Blocked keyword detected: {}", keyword));
            }
        }

        if let Some(parsed) = &parsed {
            self.check_structure(parsed, &mut verdict);
            if let Some(host) = &host {
                self.check_domain(host, &mut verdict);
            }
        }

        verdict
    }

    /// Validates a submitted link.
    ///
    /// Appends a trailing `/` when missing, then evaluates the link. When
    /// `raise` is set and the link is blocked, fails with the joined blocked
    /// reasons. Otherwise logs any warnings and returns the normalized link.
    ///
    /// # Examples
    ///
    /// ```
    /// use api_guard::safety::UrlGate;
    ///
    /// let gate = UrlGate::builtin();
    ///
    /// let link = gate.validate_content_link("https://example.com/shop", true).unwrap();
    /// assert_eq!(link, "https://example.com/shop/");
    ///
    /// let err = gate.validate_content_link("https://free-casino.example", true).unwrap_err();
    /// assert!(err.message().starts_with("URL blocked for security reasons: "));
    ///
    /// // Without enforcement the link is returned as-is.
    /// assert!(gate.validate_content_link("https://free-casino.example", false).is_ok());
    /// ```
    pub fn validate_content_link(&self, url: &str, raise: bool) -> Result<String, ValidationError> {
        let url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        };

        let verdict = self.evaluate(&url);

        if raise && !verdict.is_safe() {
            return Err(ValidationError::new(
                ValidationErrorKind::Blocked,
                format!(
                    "URL blocked for security reasons: {}",
                    verdict.blocked_reasons().join("; ")
                ),
            ));
        }

        if !verdict.warnings().is_empty() {
            warn!(
                url = %url,
                warnings = %verdict.warnings().join("; "),
                "URL security warnings"
            );
        }

        Ok(url)
    }

    fn is_trusted(&self, host: &str) -> bool {
        self.tables
            .safe_domains
            .iter()
            .any(|domain| host.contains(domain.as_str()))
    }

    fn check_structure(&self, parsed: &Url, verdict: &mut Verdict) {
        let limits = self.tables.limits;
        let path = parsed.path();

        if path.len() > limits.max_path_length {
            verdict.warn("Unusually long URL path");
        }
        if path.matches('/').count() > limits.max_path_depth {
            verdict.warn("Unusually deep URL path");
        }

        if parsed.query().is_some() {
            let names: Vec<String> = parsed
                .query_pairs()
                .map(|(name, _)| name.to_lowercase())
                .collect();
            for param in &self.tables.suspicious_params {
                if names.iter().any(|name| name.contains(param.as_str())) {
                    verdict.warn(format!("Suspicious redirect parameter: {}", param));
                }
            }
        }
    }

    fn check_domain(&self, host: &str, verdict: &mut Verdict) {
        if self
            .tables
            .suspicious_tlds
            .iter()
            .any(|tld| host.ends_with(tld.as_str()))
        {
            verdict.warn("Domain uses suspicious TLD");
        }
        if host.matches('.').count() > self.tables.limits.max_host_dots {
            verdict.warn("Excessive subdomains detected");
        }
    }
}

// Links submitted without a scheme are read as `http` links.
fn parse_link(url: &str) -> Result<Url, ParseError> {
    match Url::parse(url) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", url)),
        other => other,
    }
}

// A `%` must be followed by two hex digits.
fn has_invalid_escape(url: &str) -> bool {
    let bytes = url.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}
