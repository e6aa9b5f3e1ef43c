//! Structured URL components and their textual form.

use std::fmt;
use std::str::FromStr;

use crate::constants::is_normalized_scheme;
use crate::error::{ParseError, ParseErrorKind};
use crate::inference::is_scheme_token;

/// A URL split into its components.
///
/// Parsing follows the generic URI shape
/// `scheme ":" ["//" authority] path ["?" query] ["#" fragment]` without
/// decoding or case-folding anything except the scheme, which is
/// lower-cased. [`fmt::Display`] writes the components back out, omitting
/// absent ones along with their separators.
///
/// # Examples
///
/// ```
/// use url_normalize::UrlComponents;
///
/// let url = UrlComponents::parse("http://user@www.a.com:8080/p?q=1#top").unwrap();
/// assert_eq!(url.scheme.as_deref(), Some("http"));
/// assert_eq!(url.userinfo.as_deref(), Some("user"));
/// assert_eq!(url.host.as_deref(), Some("www.a.com"));
/// assert_eq!(url.port, Some(8080));
/// assert_eq!(url.path.as_deref(), Some("/p"));
/// assert_eq!(url.query.as_deref(), Some("q=1"));
/// assert_eq!(url.fragment.as_deref(), Some("top"));
/// assert_eq!(url.to_string(), "http://user@www.a.com:8080/p?q=1#top");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlComponents {
    /// Lower-cased scheme, if any.
    pub scheme: Option<String>,
    /// Userinfo before `@` in the authority, passed through as is.
    pub userinfo: Option<String>,
    /// Host, present whenever the URL has an authority (possibly empty).
    pub host: Option<String>,
    /// Explicit port.
    pub port: Option<u16>,
    /// Path, absent when empty. Starts with `/` when an authority is present.
    pub path: Option<String>,
    /// Raw query without the leading `?`.
    pub query: Option<String>,
    /// Raw fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl UrlComponents {
    /// Parses a URL string into components.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is empty
    /// - The text before the first `:` of the first segment is not a scheme
    /// - `http`, `https` or `ftp` is not followed by `//`
    /// - The port is not a number in 0-65535
    /// - An IPv6 literal lacks its closing bracket
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    /// Returns true if the URL has an authority (`//` part).
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.host.is_some()
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        let (rest, fragment) = Self::split_fragment(input);
        let (rest, query) = Self::split_query(rest);
        let (scheme, rest) = Self::split_scheme(rest)?;

        let mut components = Self {
            scheme,
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
            ..Self::default()
        };

        let path = if let Some(after) = rest.strip_prefix("//") {
            let end = after.find('/').unwrap_or(after.len());
            components.parse_authority(&after[..end])?;
            &after[end..]
        } else {
            if let Some(scheme) = components.scheme.as_deref() {
                if is_normalized_scheme(scheme) {
                    return Err(ParseErrorKind::MissingAuthority {
                        scheme: scheme.to_string(),
                    });
                }
            }
            rest
        };

        if !path.is_empty() {
            components.path = Some(path.to_string());
        }

        Ok(components)
    }

    fn split_fragment(input: &str) -> (&str, Option<&str>) {
        match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        }
    }

    fn split_query(input: &str) -> (&str, Option<&str>) {
        match input.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (input, None),
        }
    }

    fn split_scheme(input: &str) -> Result<(Option<String>, &str), ParseErrorKind> {
        let Some(colon) = input.find(':') else {
            return Ok((None, input));
        };

        let token = &input[..colon];
        // A colon after the first '/' belongs to the path
        if token.contains('/') {
            return Ok((None, input));
        }

        if !is_scheme_token(token) {
            return Err(ParseErrorKind::InvalidScheme {
                found: token.to_string(),
            });
        }

        Ok((Some(token.to_ascii_lowercase()), &input[colon + 1..]))
    }

    fn parse_authority(&mut self, authority: &str) -> Result<(), ParseErrorKind> {
        let host_port = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => {
                self.userinfo = Some(userinfo.to_string());
                host_port
            }
            None => authority,
        };

        let (host, port) = if host_port.starts_with('[') {
            let close = host_port
                .find(']')
                .ok_or(ParseErrorKind::UnclosedIpLiteral)?;
            let (host, rest) = host_port.split_at(close + 1);
            if rest.is_empty() {
                (host, None)
            } else {
                let port = rest.strip_prefix(':').ok_or_else(|| ParseErrorKind::InvalidPort {
                    value: rest.to_string(),
                })?;
                (host, Some(port))
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, _)) if host.contains(':') => {
                    return Err(ParseErrorKind::InvalidHost {
                        host: host.to_string(),
                    });
                }
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        self.host = Some(host.to_string());
        self.port = match port {
            Some(port) => Self::parse_port(port)?,
            None => None,
        };

        Ok(())
    }

    fn parse_port(value: &str) -> Result<Option<u16>, ParseErrorKind> {
        // "host:" is a valid authority with no port
        if value.is_empty() {
            return Ok(None);
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseErrorKind::InvalidPort {
                value: value.to_string(),
            });
        }
        value
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ParseErrorKind::InvalidPort {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for UrlComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }

        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{userinfo}@")?;
            }
            f.write_str(host)?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
        }

        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }

        Ok(())
    }
}

impl FromStr for UrlComponents {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UrlComponents {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
