//! URL helpers for exported `src`/`href` attributes
//!
//! Image and drawing sources come from user input, so anything that is not
//! an allow-listed scheme, a relative reference or an inline image is
//! replaced with `#` before it reaches exported HTML.

use regex::Regex;
use std::sync::LazyLock;

/// Schemes safe to emit, plus relative references (anything not starting
/// with a scheme-like token)
static URL_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:(?:f|ht)tps?|mailto|tel|callto|sms|cid|xmpp):|[^a-z]|[a-z+.\-]+(?:[^a-z+.\-:]|$))",
    )
    .unwrap()
});

/// Inline images, the storage format for drawings
static DATA_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^data:image/[a-z0-9.+\-]+[;,]").unwrap());

static IMAGE_EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|bmp|svg|webp|ico)(\?.*)?$").unwrap()
});

static HAS_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*:").unwrap());

static BARE_DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());

/// Sanitize a URL for use as an attribute value
///
/// # Examples
///
/// ```
/// use docnode_core::utils::sanitize_url;
///
/// assert_eq!(sanitize_url("https://example.com/a.png"), "https://example.com/a.png");
/// assert_eq!(sanitize_url("javascript:alert(1)"), "#");
/// assert_eq!(sanitize_url("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
/// assert_eq!(sanitize_url(""), "#");
/// ```
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return "#".to_string();
    }
    if !DATA_IMAGE_RE.is_match(trimmed) && !URL_SCHEME_RE.is_match(trimmed) {
        tracing::debug!("Rejected unsafe URL scheme in '{}'", trimmed);
        return "#".to_string();
    }
    trimmed.replace('"', "%22")
}

/// Whether the URL looks like an image resource
pub fn is_image_url(url: &str) -> bool {
    DATA_IMAGE_RE.is_match(url) || IMAGE_EXTENSION_RE.is_match(url)
}

/// Add `https://` to bare domains; other input is returned trimmed
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() || HAS_SCHEME_RE.is_match(trimmed) {
        return trimmed.to_string();
    }
    if BARE_DOMAIN_RE.is_match(trimmed) {
        return format!("https://{}", trimmed);
    }
    trimmed.to_string()
}
