//! URL utilities for consistent URL handling
//!
//! Used for the source URL only: normalizing what is passed on the command
//! line, validating configuration, and keeping credentials out of logs.

use regex::Regex;
use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Normalize URL scheme by ensuring it has a proper HTTP/HTTPS prefix
    ///
    /// # Examples
    ///
    /// ```rust
    /// use m3u_filter::utils::url::UrlUtils;
    ///
    /// assert_eq!(UrlUtils::normalize_scheme("example.com/iptv.m3u"), "http://example.com/iptv.m3u");
    /// assert_eq!(UrlUtils::normalize_scheme("https://example.com"), "https://example.com");
    /// ```
    pub fn normalize_scheme(url: &str) -> String {
        let trimmed = url.trim();

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        }
    }

    /// Parse and validate a URL
    pub fn parse_and_validate(url: &str) -> Result<Url, url::ParseError> {
        Url::parse(url)
    }

    /// Replace credentials in a URL with `****` so it can be logged.
    ///
    /// Covers `user:pass@host` authority credentials and the usual query
    /// parameters IPTV providers put them in.
    pub fn obfuscate_credentials(url: &str) -> String {
        let mut obfuscated = url.to_string();

        if let Ok(parsed) = Url::parse(url) {
            if !parsed.username().is_empty() || parsed.password().is_some() {
                let mut new_url = parsed.clone();
                let _ = new_url.set_username("****");
                let _ = new_url.set_password(Some("****"));
                obfuscated = new_url.to_string();
            }
        }

        let sensitive_params = ["username", "password", "user", "pass", "pwd", "passwd", "token"];

        for param in &sensitive_params {
            let pattern = format!(r"(?i)([?&]{}=)[^&]*", regex::escape(param));
            if let Ok(re) = Regex::new(&pattern) {
                obfuscated = re.replace_all(&obfuscated, "${1}****").to_string();
            }
        }

        obfuscated
    }
}
