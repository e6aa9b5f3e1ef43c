//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use url_normalize::prelude::*;
//!
//! let normalizer = Normalizer::new(NormalizationOptions::default());
//! assert_eq!(normalizer.normalize("www.a.com"), "http://a.com");
//! ```

pub use crate::{
    // Entry points
    Normalizer, normalize, normalize_opt, try_normalize,
    // Core types
    NormalizationOptions, QueryPairs, UrlComponents,
    // Errors
    NormalizeError, OptionsError, ParseError, ParseErrorKind,
    // Registry
    is_recognized_scheme,
};
