//! Scheme inference for schemeless input.
//!
//! Runs before structural parsing. A small tokenizer looks for a leading
//! scheme token and an explicit port; the registry decides whether the token
//! really is a scheme or just a hostname followed by `:port`.

use std::borrow::Cow;
use std::ops::Range;

use crate::constants::{DEFAULT_SCHEME, HTTP_DEFAULT_PORT, HTTPS_ALT_PORT, HTTPS_DEFAULT_PORT};
use crate::options::NormalizationOptions;
use crate::registry::is_recognized_scheme;

/// Tokens found by the loose pre-parse of a raw input string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadingTokens<'a> {
    /// Text before the first ':' when it is shaped like a scheme.
    pub scheme: Option<&'a str>,
    /// Explicit port of the authority, if one parses.
    pub port: Option<u16>,
    /// Byte range of `:port` in the input.
    pub port_span: Option<Range<usize>>,
}

impl<'a> LeadingTokens<'a> {
    /// Scans `input` for a leading scheme token and an explicit port.
    ///
    /// The port is looked up in the authority that follows an optional `//`
    /// and ends at the first `/`, `?` or `#`.
    ///
    /// ```
    /// use url_normalize::LeadingTokens;
    ///
    /// let tokens = LeadingTokens::scan("example.com:4000/path");
    /// assert_eq!(tokens.scheme, Some("example.com"));
    /// assert_eq!(tokens.port, Some(4000));
    /// assert!(tokens.explicit_scheme().is_none());
    /// ```
    #[must_use]
    pub fn scan(input: &'a str) -> Self {
        let scheme = input
            .split_once(':')
            .map(|(token, _)| token)
            .filter(|token| is_scheme_token(token));

        let (port, port_span) = match Self::scan_port(input) {
            Some((port, span)) => (Some(port), Some(span)),
            None => (None, None),
        };

        Self {
            scheme,
            port,
            port_span,
        }
    }

    /// Returns the scheme token, lower-cased, if the registry recognizes it.
    #[must_use]
    pub fn explicit_scheme(&self) -> Option<String> {
        self.scheme
            .map(str::to_ascii_lowercase)
            .filter(|token| is_recognized_scheme(token))
    }

    fn scan_port(input: &str) -> Option<(u16, Range<usize>)> {
        let start = if input.starts_with("//") { 2 } else { 0 };
        let rest = &input[start..];
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..end];

        // Skip userinfo
        let host_start = authority.rfind('@').map_or(0, |i| i + 1);
        let host_port = &authority[host_start..];

        // IPv6 literals carry colons of their own
        let search_from = if host_port.starts_with('[') {
            host_port.find(']')?
        } else {
            0
        };

        let colon = search_from + host_port[search_from..].rfind(':')?;
        let digits = &host_port[colon + 1..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let port = digits.parse::<u16>().ok()?;

        let offset = start + host_start + colon;
        Some((port, offset..start + end))
    }
}

/// Returns true if `token` has the shape of a URI scheme:
/// a letter followed by letters, digits, `+`, `-` or `.`.
#[must_use]
pub fn is_scheme_token(token: &str) -> bool {
    let mut bytes = token.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        _ => false,
    }
}

/// Maps an explicit port to the scheme it implies.
///
/// No port and port 80 imply `http`; 443 and 8080 imply `https`. Any other
/// port implies nothing.
///
/// ```
/// use url_normalize::infer_scheme_from_port;
///
/// assert_eq!(infer_scheme_from_port(None), Some("http"));
/// assert_eq!(infer_scheme_from_port(Some(8080)), Some("https"));
/// assert_eq!(infer_scheme_from_port(Some(3000)), None);
/// ```
#[must_use]
pub const fn infer_scheme_from_port(port: Option<u16>) -> Option<&'static str> {
    match port {
        None | Some(HTTP_DEFAULT_PORT) => Some("http"),
        Some(HTTPS_ALT_PORT | HTTPS_DEFAULT_PORT) => Some("https"),
        Some(_) => None,
    }
}

/// Prepends an inferred scheme to schemeless input.
///
/// Empty input, input whose leading token is a recognized scheme, and any
/// input when `normalize_protocol` is off are returned as is. Protocol-relative input
/// (`//host`) gets `<scheme>:` and loses the port the scheme already implies;
/// other input gets `<scheme>://`.
#[must_use]
pub fn infer_scheme<'a>(input: &'a str, options: &NormalizationOptions) -> Cow<'a, str> {
    let tokens = LeadingTokens::scan(input);

    if input.is_empty() || tokens.explicit_scheme().is_some() || !options.normalize_protocol {
        return Cow::Borrowed(input);
    }

    let inferred = infer_scheme_from_port(tokens.port);

    let rewritten = if input.starts_with("//") {
        match (inferred, tokens.port_span) {
            (Some(scheme), Some(span)) => {
                format!("{scheme}:{}{}", &input[..span.start], &input[span.end..])
            }
            (Some(scheme), None) => format!("{scheme}:{input}"),
            (None, _) => format!("{DEFAULT_SCHEME}:{input}"),
        }
    } else {
        format!("{}://{input}", inferred.unwrap_or(DEFAULT_SCHEME))
    };

    tracing::trace!(input, rewritten = %rewritten, "inferred scheme");
    Cow::Owned(rewritten)
}
