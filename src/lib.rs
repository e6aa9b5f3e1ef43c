//! Configurable canonicalization of user-supplied URL strings.
//!
//! This crate turns URLs from untrusted or inconsistent sources (crawlers,
//! forms, logs) into one deterministic textual form, suitable as a
//! deduplication or cache key.
//!
//! # Quick Start
//!
//! ```rust
//! use url_normalize::{normalize, NormalizationOptions};
//!
//! let options = NormalizationOptions::default();
//!
//! assert_eq!(normalize("www.example.com?b=2&a=1", &options), "http://example.com?a=1&b=2");
//! assert_eq!(normalize("http://example.com:80", &options), "http://example.com");
//! assert_eq!(normalize("//example.com:8080", &options), "https://example.com");
//!
//! // Schemes other than http, https and ftp pass through untouched
//! assert_eq!(normalize("mailto:a@b.com", &options), "mailto:a@b.com");
//! ```
//!
//! # Pipeline
//!
//! 1. **Scheme inference**: schemeless input gets `http://` (or `https://`
//!    when its port is 443 or 8080). A leading token only counts as a scheme
//!    if it is in the scheme registry, so `example.com:4000` is a host.
//! 2. **Parse and gate**: the string is split into [`UrlComponents`]. Parse
//!    failures and schemes outside `http`, `https` and `ftp` return the
//!    original input.
//! 3. **Stages**: scheme, host, port, path, query and fragment are
//!    normalized in that order (see [`stages`]).
//! 4. **Serialize**, then lower-case everything if `downcase` is set.
//!
//! # Options
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `strip_www` | `true` | drop a leading `www.` from the host |
//! | `strip_fragment` | `true` | drop `#fragment` |
//! | `strip_params` | `false` | drop the query instead of sorting it |
//! | `normalize_protocol` | `true` | infer a scheme for schemeless input |
//! | `add_root_path` | `false` | empty path becomes `/` |
//! | `trim_trailing_slash` | `false` | remove trailing `/` from the path |
//! | `downcase` | `false` | lower-case the whole result |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod components;
mod constants;
mod error;
mod inference;
mod normalizer;
mod options;
pub mod prelude;
mod query;
mod registry;
pub mod stages;

pub use components::UrlComponents;
pub use constants::{
    DEFAULT_SCHEME, FTP_DEFAULT_PORT, HTTP_DEFAULT_PORT, HTTPS_ALT_PORT, HTTPS_DEFAULT_PORT,
    NORMALIZED_SCHEMES, WWW_PREFIX, default_port, is_normalized_scheme,
};
pub use error::{NormalizeError, OptionsError, ParseError, ParseErrorKind};
pub use inference::{LeadingTokens, infer_scheme, infer_scheme_from_port, is_scheme_token};
pub use normalizer::{Normalizer, normalize, normalize_opt, try_normalize};
pub use options::NormalizationOptions;
pub use query::{QueryPairs, canonicalize_query};
pub use registry::{is_recognized_scheme, recognized_schemes};
