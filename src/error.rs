//! Error types for URL normalization.

use std::fmt;

/// Errors that can occur when parsing a URL into components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is empty
    Empty,
    /// Text before the first ':' is not a valid scheme token
    InvalidScheme {
        /// The offending token
        found: String,
    },
    /// A hierarchical scheme was not followed by `//`
    MissingAuthority {
        /// The scheme that requires an authority
        scheme: String,
    },
    /// Port is not a number in 0-65535
    InvalidPort {
        /// The invalid value
        value: String,
    },
    /// Host contains ':' outside of a bracketed IPv6 literal
    InvalidHost {
        /// The rejected host
        host: String,
    },
    /// IPv6 literal is missing its closing bracket
    UnclosedIpLiteral,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URL '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::InvalidScheme { found } => {
                write!(f, "'{found}' is not a valid scheme")
            }
            ParseErrorKind::MissingAuthority { scheme } => {
                write!(f, "scheme '{scheme}' requires '//' followed by a host")
            }
            ParseErrorKind::InvalidPort { value } => {
                write!(f, "invalid port '{value}'; port must be 0-65535")
            }
            ParseErrorKind::InvalidHost { host } => {
                write!(f, "invalid host '{host}'; ':' is only allowed inside an IPv6 literal")
            }
            ParseErrorKind::UnclosedIpLiteral => {
                write!(f, "missing closing bracket for IPv6 literal")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors for resolving caller-supplied options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// An override was not of the form `key=value`
    MalformedPair {
        /// The raw override text
        pair: String,
    },
    /// A recognized key was given a value that is not a boolean
    InvalidValue {
        /// The option key
        key: String,
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPair { pair } => {
                write!(f, "option override '{pair}' must be of the form key=value")
            }
            Self::InvalidValue { key, value } => {
                write!(
                    f,
                    "invalid value '{value}' for option '{key}'; expected true/false, yes/no, on/off or 1/0"
                )
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Reasons an input is passed through instead of normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The (possibly rewritten) input could not be parsed
    Unparseable(ParseError),
    /// The scheme is recognized but outside the normalized set
    UnsupportedScheme {
        /// The parsed scheme
        scheme: String,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable(e) => write!(f, "{e}"),
            Self::UnsupportedScheme { scheme } => {
                write!(
                    f,
                    "scheme '{scheme}' is not normalized; only http, https and ftp are"
                )
            }
        }
    }
}

impl std::error::Error for NormalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unparseable(e) => Some(e),
            Self::UnsupportedScheme { .. } => None,
        }
    }
}

impl From<ParseError> for NormalizeError {
    fn from(e: ParseError) -> Self {
        Self::Unparseable(e)
    }
}
