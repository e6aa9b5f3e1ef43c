//! The normalization entry points.

use crate::components::UrlComponents;
use crate::constants::is_normalized_scheme;
use crate::error::NormalizeError;
use crate::inference::infer_scheme;
use crate::options::NormalizationOptions;
use crate::stages;

/// Normalizes a URL string, returning it unchanged when it cannot be
/// normalized.
///
/// Input that does not parse, or whose scheme is anything other than
/// `http`, `https` or `ftp`, comes back verbatim. This never fails.
///
/// # Examples
///
/// ```
/// use url_normalize::{normalize, NormalizationOptions};
///
/// let options = NormalizationOptions::default();
/// assert_eq!(normalize("www.a.com?b=2&a=1#top", &options), "http://a.com?a=1&b=2");
/// assert_eq!(normalize("//a.com:8080", &options), "https://a.com");
/// assert_eq!(normalize("mailto:a@b.com", &options), "mailto:a@b.com");
/// ```
#[must_use]
pub fn normalize(input: &str, options: &NormalizationOptions) -> String {
    try_normalize(input, options).unwrap_or_else(|err| {
        tracing::debug!(input, reason = %err, "passing URL through unchanged");
        input.to_string()
    })
}

/// Normalizes optional input; `None` yields an empty string.
#[must_use]
pub fn normalize_opt(input: Option<&str>, options: &NormalizationOptions) -> String {
    input.map_or_else(String::new, |input| normalize(input, options))
}

/// Normalizes a URL string, reporting why it could not be normalized.
///
/// # Errors
///
/// Returns `NormalizeError::Unparseable` if the input (after scheme
/// inference) is not a URL, or `NormalizeError::UnsupportedScheme` if its
/// scheme is outside `http`, `https` and `ftp`.
pub fn try_normalize(
    input: &str,
    options: &NormalizationOptions,
) -> Result<String, NormalizeError> {
    let rewritten = infer_scheme(input, options);
    let components = UrlComponents::parse(&rewritten)?;

    if let Some(scheme) = components.scheme.as_deref() {
        if !is_normalized_scheme(scheme) {
            return Err(NormalizeError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }
    }

    let serialized = stages::run(components, options).to_string();
    Ok(if options.downcase {
        serialized.to_lowercase()
    } else {
        serialized
    })
}

/// A normalizer bound to one set of options.
///
/// # Examples
///
/// ```
/// use url_normalize::{NormalizationOptions, Normalizer};
///
/// let normalizer = Normalizer::new(NormalizationOptions::default().with_add_root_path(true));
/// assert_eq!(normalizer.normalize("a.com"), "http://a.com/");
///
/// let all = normalizer.normalize_all(["a.com", "https://www.b.com:443"]);
/// assert_eq!(all, vec!["http://a.com/", "https://b.com/"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer {
    options: NormalizationOptions,
}

impl Normalizer {
    /// Creates a normalizer with the given options.
    #[must_use]
    pub const fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    /// See [`normalize`].
    #[must_use]
    pub fn normalize(&self, input: &str) -> String {
        normalize(input, &self.options)
    }

    /// See [`try_normalize`].
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError` when the input would be passed through.
    pub fn try_normalize(&self, input: &str) -> Result<String, NormalizeError> {
        try_normalize(input, &self.options)
    }

    /// Normalizes every input, in order.
    pub fn normalize_all<I, S>(&self, inputs: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        inputs
            .into_iter()
            .map(|input| self.normalize(input.as_ref()))
            .collect()
    }
}

impl From<NormalizationOptions> for Normalizer {
    fn from(options: NormalizationOptions) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn norm(input: &str) -> String {
        normalize(input, &NormalizationOptions::default())
    }

    #[test]
    fn schemeless_input_gets_http() {
        assert_eq!(norm("a.com"), "http://a.com");
        assert_eq!(norm("a.com/x"), "http://a.com/x");
    }

    #[test]
    fn hostname_with_port_is_not_a_scheme() {
        assert_eq!(norm("example.com:4000"), "http://example.com:4000");
        assert_eq!(norm("localhost:3000/x"), "http://localhost:3000/x");
    }

    #[test]
    fn implied_https_port_is_dropped() {
        assert_eq!(norm("a.com:443"), "https://a.com");
        assert_eq!(norm("a.com:8080"), "https://a.com:8080");
    }

    #[test]
    fn uppercase_scheme_is_recognized() {
        assert_eq!(norm("HTTPS://www.A.com"), "https://A.com");
    }

    #[test]
    fn userinfo_passes_through() {
        assert_eq!(norm("user:pw@www.a.com"), "http://user:pw@a.com");
    }

    #[test]
    fn try_normalize_reports_unsupported_scheme() {
        let err = try_normalize("tel:+15551234", &NormalizationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::UnsupportedScheme {
                scheme: "tel".to_string()
            }
        );
    }

    #[test]
    fn try_normalize_reports_parse_failure() {
        let err = try_normalize("a.com:abc", &NormalizationOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Unparseable(ref e) if matches!(e.kind, ParseErrorKind::InvalidPort { .. })
        ));
        assert_eq!(norm("a.com:abc"), "a.com:abc");
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn normalize_protocol_off_gates_hostname_with_port() {
        let options = NormalizationOptions::default().with_normalize_protocol(false);
        assert_eq!(normalize("example.com:4000", &options), "example.com:4000");
        assert_eq!(normalize("www.a.com/x", &options), "www.a.com/x");
        assert_eq!(normalize("http://www.a.com", &options), "http://a.com");
    }

    #[test]
    fn downcase_folds_everything() {
        let options = NormalizationOptions::default().with_downcase(true);
        assert_eq!(
            normalize("HTTP://A.COM/Path?Q=V", &options),
            "http://a.com/path?q=v"
        );
    }

    #[test]
    fn no_case_change_without_downcase() {
        assert_eq!(norm("http://A.COM/Path"), "http://A.COM/Path");
    }

    #[test]
    fn normalize_opt_none_is_empty() {
        let options = NormalizationOptions::default();
        assert_eq!(normalize_opt(None, &options), "");
        assert_eq!(normalize_opt(Some("a.com"), &options), "http://a.com");
    }

    #[test]
    fn normalizer_uses_bound_options() {
        let normalizer = Normalizer::from(NormalizationOptions::default().with_strip_params(true));
        assert_eq!(normalizer.normalize("a.com?x=1"), "http://a.com");
        assert!(normalizer.options().strip_params);
        assert!(normalizer.try_normalize("mailto:x@y.z").is_err());
    }
}
