use crate::url::domain::extract_domain;
use url::Url;

/// Checks whether `target` belongs to the same site as `root`
///
/// Without subdomains only the exact host matches. With subdomains the root
/// host itself and any host ending in `.` + root host match; a bare suffix
/// such as `notexample.com` for root `example.com` does not.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sga_site_crawler::url::in_scope;
///
/// let root = Url::parse("https://example.com/").unwrap();
/// let blog = Url::parse("https://blog.example.com/post").unwrap();
/// assert!(!in_scope(&blog, &root, false));
/// assert!(in_scope(&blog, &root, true));
/// ```
pub fn in_scope(target: &Url, root: &Url, allow_subdomains: bool) -> bool {
    let (Some(target_host), Some(root_host)) = (extract_domain(target), extract_domain(root))
    else {
        return false;
    };

    if target_host == root_host {
        return true;
    }

    allow_subdomains && target_host.ends_with(&format!(".{}", root_host))
}

/// Checks the URL path against include and exclude prefix lists
///
/// A non-empty include list requires at least one prefix to match. Any
/// exclude match rejects, even when an include prefix also matched. Only the
/// path takes part; query and fragment are ignored.
pub fn matches_path_filters(url: &Url, include_paths: &[String], exclude_paths: &[String]) -> bool {
    let path = match url.path() {
        "" => "/",
        p => p,
    };

    if !include_paths.is_empty() && !include_paths.iter().any(|p| path.starts_with(p.as_str())) {
        return false;
    }

    !exclude_paths.iter().any(|p| path.starts_with(p.as_str()))
}
