//! Long URL validation and canonicalization.

use url::Url;

/// Errors raised while validating a URL submitted for shortening.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Validates that `input` is a well-formed absolute HTTP(S) URL and returns
/// its canonical form.
///
/// Canonicalization lowercases the host, strips the fragment, and drops
/// default ports (80 for HTTP, 443 for HTTPS). Path, query, and credentials
/// are preserved as-is. Schemes like `javascript:` or `file:` are rejected.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for relative or
/// malformed URLs and [`UrlNormalizationError::UnsupportedProtocol`] for
/// non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    if let Some(host) = url.host_str() {
        let lowered = host.to_ascii_lowercase();
        if lowered != host {
            url.set_host(Some(&lowered)).map_err(|_| {
                UrlNormalizationError::NormalizationFailed("could not lowercase host".to_string())
            })?;
        }
    }

    url.set_fragment(None);

    if matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("could not drop default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
