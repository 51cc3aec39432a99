use url::Url;

/// Extracts the lowercase host from a URL
///
/// IPv6 hosts keep the brackets the URL serializer puts around them.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sga_site_crawler::url::extract_domain;
///
/// let url = Url::parse("https://Sub.Example.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when a hostname points at a private, loopback or link-local target
///
/// The check is textual and fail-safe: anything that looks like a dotted quad
/// but does not parse cleanly is treated as private. IPv6 ranges are matched
/// by prefix only (`fc`, `fd`, `fe80`, plus the literal `::1`).
///
/// # Examples
///
/// ```
/// use sga_site_crawler::url::is_private_host;
///
/// assert!(is_private_host("127.0.0.1"));
/// assert!(is_private_host("printer.local"));
/// assert!(!is_private_host("example.com"));
/// ```
pub fn is_private_host(hostname: &str) -> bool {
    let host = hostname.trim().to_lowercase();
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(&host);
    // `localhost.` names the same target as `localhost`
    let host = host.trim_end_matches('.');

    if host.is_empty() {
        return true;
    }

    if host == "localhost"
        || host.ends_with(".localhost")
        || host.ends_with(".local")
        || host == "::1"
    {
        return true;
    }

    if let Some(octets) = dotted_quad(host) {
        return is_private_ipv4(&octets);
    }

    if host.contains(':') {
        return host.starts_with("fc") || host.starts_with("fd") || host.starts_with("fe80");
    }

    false
}

/// Splits `a.b.c.d` (all-digit parts) into its four numeric parts
///
/// Parts that overflow are reported as `None` so the caller can fail safe.
fn dotted_quad(host: &str) -> Option<[Option<u32>; 4]> {
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() != 4
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut octets = [None; 4];
    for (slot, part) in octets.iter_mut().zip(parts) {
        *slot = part.parse::<u32>().ok();
    }
    Some(octets)
}

fn is_private_ipv4(octets: &[Option<u32>; 4]) -> bool {
    let mut values = [0u32; 4];
    for (value, octet) in values.iter_mut().zip(octets) {
        match octet {
            Some(n) if *n <= 255 => *value = *n,
            _ => return true,
        }
    }

    matches!(
        values,
        [10, ..] | [127, ..] | [0, ..] | [169, 254, ..] | [192, 168, ..]
    ) || (values[0] == 172 && (16..=31).contains(&values[1]))
}
