//! Normalization stages.
//!
//! Each stage is a pure function from components to components. [`run`]
//! applies them in order: scheme, host, port, path, query, fragment.

use crate::components::UrlComponents;
use crate::constants::{DEFAULT_SCHEME, WWW_PREFIX, default_port};
use crate::options::NormalizationOptions;
use crate::query::canonicalize_query;

/// Applies every stage in order.
#[must_use]
pub fn run(components: UrlComponents, options: &NormalizationOptions) -> UrlComponents {
    let components = normalize_scheme(components, options);
    let components = normalize_host(components, options);
    let components = normalize_port(components, options);
    let components = normalize_path(components, options);
    let components = normalize_query(components, options);
    normalize_fragment(components, options)
}

/// Fills in `http` for a missing scheme when `normalize_protocol` is set.
#[must_use]
pub fn normalize_scheme(
    mut components: UrlComponents,
    options: &NormalizationOptions,
) -> UrlComponents {
    if options.normalize_protocol && components.scheme.is_none() {
        components.scheme = Some(DEFAULT_SCHEME.to_string());
    }
    components
}

/// Removes one leading `www.` from the host when `strip_www` is set.
#[must_use]
pub fn normalize_host(
    mut components: UrlComponents,
    options: &NormalizationOptions,
) -> UrlComponents {
    if options.strip_www {
        components.host = components
            .host
            .map(|host| match host.strip_prefix(WWW_PREFIX) {
                Some(rest) => rest.to_string(),
                None => host,
            });
    }
    components
}

/// Drops the port when it is the scheme's default.
#[must_use]
pub fn normalize_port(
    mut components: UrlComponents,
    _options: &NormalizationOptions,
) -> UrlComponents {
    let default = components.scheme.as_deref().and_then(default_port);
    if default.is_some() && components.port == default {
        components.port = None;
    }
    components
}

/// Adds a root path or trims trailing slashes.
///
/// An empty path becomes `/` under `add_root_path`; otherwise a non-empty
/// path loses its trailing slashes under `trim_trailing_slash`. A path
/// trimmed down to nothing falls back to `/` when `add_root_path` is also
/// set, so a second pass gives the same result.
#[must_use]
pub fn normalize_path(
    mut components: UrlComponents,
    options: &NormalizationOptions,
) -> UrlComponents {
    let root = || Some("/".to_string());

    match components.path.take().filter(|path| !path.is_empty()) {
        None if options.add_root_path => components.path = root(),
        None => {}
        Some(path) if options.trim_trailing_slash => {
            let trimmed = path.trim_end_matches('/');
            components.path = if !trimmed.is_empty() {
                Some(trimmed.to_string())
            } else if options.add_root_path {
                root()
            } else {
                None
            };
        }
        Some(path) => components.path = Some(path),
    }
    components
}

/// Drops the query under `strip_params`, otherwise sorts and re-encodes it.
///
/// A query with no pairs left after decoding is dropped as well.
#[must_use]
pub fn normalize_query(
    mut components: UrlComponents,
    options: &NormalizationOptions,
) -> UrlComponents {
    if options.strip_params {
        components.query = None;
    } else {
        components.query = components
            .query
            .map(|raw| canonicalize_query(&raw))
            .filter(|query| !query.is_empty());
    }
    components
}

/// Drops the fragment under `strip_fragment`.
#[must_use]
pub fn normalize_fragment(
    mut components: UrlComponents,
    options: &NormalizationOptions,
) -> UrlComponents {
    if options.strip_fragment {
        components.fragment = None;
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(input: &str) -> UrlComponents {
        UrlComponents::parse(input).unwrap()
    }

    fn defaults() -> NormalizationOptions {
        NormalizationOptions::default()
    }

    #[test]
    fn scheme_filled_in_when_missing() {
        let components = UrlComponents {
            host: Some("a.com".to_string()),
            ..UrlComponents::default()
        };
        let out = normalize_scheme(components.clone(), &defaults());
        assert_eq!(out.scheme.as_deref(), Some("http"));

        let options = defaults().with_normalize_protocol(false);
        let out = normalize_scheme(components, &options);
        assert!(out.scheme.is_none());
    }

    #[test]
    fn scheme_kept_when_present() {
        let out = normalize_scheme(url("ftp://a.com"), &defaults());
        assert_eq!(out.scheme.as_deref(), Some("ftp"));
    }

    #[test]
    fn host_strips_one_www() {
        let out = normalize_host(url("http://www.a.com"), &defaults());
        assert_eq!(out.host.as_deref(), Some("a.com"));

        let out = normalize_host(url("http://www.www.a.com"), &defaults());
        assert_eq!(out.host.as_deref(), Some("www.a.com"));
    }

    #[test]
    fn host_www_match_is_anchored_and_case_sensitive() {
        let out = normalize_host(url("http://WWW.a.com"), &defaults());
        assert_eq!(out.host.as_deref(), Some("WWW.a.com"));

        let out = normalize_host(url("http://a.www.com"), &defaults());
        assert_eq!(out.host.as_deref(), Some("a.www.com"));

        let out = normalize_host(url("http://wwwa.com"), &defaults());
        assert_eq!(out.host.as_deref(), Some("wwwa.com"));
    }

    #[test]
    fn host_kept_without_strip_www() {
        let options = defaults().with_strip_www(false);
        let out = normalize_host(url("http://www.a.com"), &options);
        assert_eq!(out.host.as_deref(), Some("www.a.com"));
    }

    #[test]
    fn port_default_dropped() {
        for input in ["http://a.com:80", "https://a.com:443", "ftp://a.com:21"] {
            let out = normalize_port(url(input), &defaults());
            assert!(out.port.is_none(), "{input}");
        }
    }

    #[test]
    fn port_non_default_kept() {
        for (input, port) in [
            ("http://a.com:443", 443),
            ("https://a.com:80", 80),
            ("http://a.com:3000", 3000),
            ("ftp://a.com:0", 0),
        ] {
            let out = normalize_port(url(input), &defaults());
            assert_eq!(out.port, Some(port), "{input}");
        }
    }

    #[test]
    fn path_root_added_when_empty() {
        let options = defaults().with_add_root_path(true);
        let out = normalize_path(url("http://a.com"), &options);
        assert_eq!(out.path.as_deref(), Some("/"));

        let out = normalize_path(url("http://a.com/x"), &options);
        assert_eq!(out.path.as_deref(), Some("/x"));
    }

    #[test]
    fn path_trailing_slashes_trimmed() {
        let options = defaults().with_trim_trailing_slash(true);
        let out = normalize_path(url("http://a.com/x//"), &options);
        assert_eq!(out.path.as_deref(), Some("/x"));

        let out = normalize_path(url("http://a.com/"), &options);
        assert!(out.path.is_none());
    }

    #[test]
    fn path_root_wins_over_trim() {
        let options = defaults()
            .with_add_root_path(true)
            .with_trim_trailing_slash(true);

        let out = normalize_path(url("http://a.com"), &options);
        assert_eq!(out.path.as_deref(), Some("/"));

        let out = normalize_path(url("http://a.com/"), &options);
        assert_eq!(out.path.as_deref(), Some("/"));

        let out = normalize_path(url("http://a.com/x/"), &options);
        assert_eq!(out.path.as_deref(), Some("/x"));
    }

    #[test]
    fn path_unchanged_by_default() {
        let out = normalize_path(url("http://a.com/x/"), &defaults());
        assert_eq!(out.path.as_deref(), Some("/x/"));

        let out = normalize_path(url("http://a.com"), &defaults());
        assert!(out.path.is_none());
    }

    #[test]
    fn query_sorted_and_reencoded() {
        let out = normalize_query(url("http://a.com?b=2&a=1"), &defaults());
        assert_eq!(out.query.as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn query_stripped() {
        let options = defaults().with_strip_params(true);
        let out = normalize_query(url("http://a.com?b=2&a=1"), &options);
        assert!(out.query.is_none());
    }

    #[test]
    fn query_absent_stays_absent() {
        let out = normalize_query(url("http://a.com"), &defaults());
        assert!(out.query.is_none());
    }

    #[test]
    fn query_with_no_pairs_is_dropped() {
        for input in ["http://a.com?", "http://a.com?&&", "http://a.com/x?&"] {
            let out = normalize_query(url(input), &defaults());
            assert!(out.query.is_none(), "{input}");
        }

        let out = normalize_query(url("http://a.com?="), &defaults());
        assert_eq!(out.query.as_deref(), Some("="));
    }

    #[test]
    fn fragment_stripped_or_kept() {
        let out = normalize_fragment(url("http://a.com#x"), &defaults());
        assert!(out.fragment.is_none());

        let options = defaults().with_strip_fragment(false);
        let out = normalize_fragment(url("http://a.com#x"), &options);
        assert_eq!(out.fragment.as_deref(), Some("x"));
    }

    #[test]
    fn run_applies_all_stages() {
        let out = run(url("http://www.a.com:80/x/?b=2&a=1#f"), &defaults());
        assert_eq!(out.to_string(), "http://a.com/x/?a=1&b=2");
    }
}
