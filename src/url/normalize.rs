use crate::UrlError;
use url::Url;

/// Normalizes a URL for crawling
///
/// # Normalization Steps
///
/// 1. Parse the string as an absolute URL; reject if malformed
/// 2. Require the scheme to be exactly `http` or `https`
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// Host lowercasing, default-port removal and dot-segment resolution come from
/// WHATWG parsing itself, so the output is canonical and normalizing it again
/// yields the identical string.
///
/// # Examples
///
/// ```
/// use sga_site_crawler::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/a/../b#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/b");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
