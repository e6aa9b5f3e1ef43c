//! Normalization options and the resolver that merges caller overrides.

use crate::error::OptionsError;

/// Switches that control the normalization pipeline.
///
/// [`Default`] gives the documented defaults: `www.` and fragments are
/// stripped, a scheme is inferred for schemeless input, and everything else
/// is off.
///
/// # Examples
///
/// ```
/// use url_normalize::NormalizationOptions;
///
/// let options = NormalizationOptions::default()
///     .with_strip_www(false)
///     .with_trim_trailing_slash(true);
/// assert!(!options.strip_www);
/// assert!(options.strip_fragment);
///
/// let options = NormalizationOptions::resolve([("stripParams", "true")]).unwrap();
/// assert!(options.strip_params);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct NormalizationOptions {
    /// Remove a leading `www.` from the host.
    pub strip_www: bool,
    /// Drop the fragment.
    pub strip_fragment: bool,
    /// Drop the whole query instead of sorting it.
    pub strip_params: bool,
    /// Infer a scheme for schemeless input.
    pub normalize_protocol: bool,
    /// Give an empty path the root path `/`.
    pub add_root_path: bool,
    /// Remove trailing slashes from the path.
    pub trim_trailing_slash: bool,
    /// Lower-case the whole serialized result.
    pub downcase: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            strip_www: true,
            strip_fragment: true,
            strip_params: false,
            normalize_protocol: true,
            add_root_path: false,
            trim_trailing_slash: false,
            downcase: false,
        }
    }
}

impl NormalizationOptions {
    /// Option keys the resolver recognizes, in `snake_case`.
    pub const KEYS: [&'static str; 7] = [
        "strip_www",
        "strip_fragment",
        "strip_params",
        "normalize_protocol",
        "add_root_path",
        "trim_trailing_slash",
        "downcase",
    ];

    /// Merges string overrides onto the defaults.
    ///
    /// Keys are matched in `snake_case` or `camelCase`; unknown keys are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::InvalidValue` if a recognized key is given a
    /// value that is not a boolean.
    pub fn resolve<'a, I>(overrides: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in overrides {
            options.apply(key, value)?;
        }
        Ok(options)
    }

    /// Merges typed overrides onto the defaults, ignoring unknown keys.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use url_normalize::NormalizationOptions;
    ///
    /// let flags = HashMap::from([("strip_www", false), ("future_flag", true)]);
    /// let options = NormalizationOptions::from_flags(flags);
    /// assert!(!options.strip_www);
    /// ```
    #[must_use]
    pub fn from_flags<K, I>(flags: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut options = Self::default();
        for (key, value) in flags {
            options.set(key.as_ref(), value);
        }
        options
    }

    /// Sets one option. Returns false if the key is not recognized.
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        match self.field_mut(key) {
            Some(field) => {
                *field = value;
                true
            }
            None => {
                tracing::debug!(key, "ignoring unknown normalization option");
                false
            }
        }
    }

    /// Sets one option from its string value. Returns `Ok(false)` if the key
    /// is not recognized.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::InvalidValue` if the key is recognized and the
    /// value is not a boolean.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, OptionsError> {
        let Some(field) = self.field_mut(key) else {
            tracing::debug!(key, "ignoring unknown normalization option");
            return Ok(false);
        };
        *field = parse_bool(value).ok_or_else(|| OptionsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(true)
    }

    /// Applies a `key=value` override.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::MalformedPair` if there is no `=`, or
    /// `OptionsError::InvalidValue` if the value is not a boolean.
    pub fn apply_pair(&mut self, pair: &str) -> Result<bool, OptionsError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| OptionsError::MalformedPair {
                pair: pair.to_string(),
            })?;
        self.apply(key.trim(), value.trim())
    }

    /// Sets whether a leading `www.` is removed.
    #[must_use]
    pub const fn with_strip_www(mut self, value: bool) -> Self {
        self.strip_www = value;
        self
    }

    /// Sets whether the fragment is dropped.
    #[must_use]
    pub const fn with_strip_fragment(mut self, value: bool) -> Self {
        self.strip_fragment = value;
        self
    }

    /// Sets whether the query is dropped.
    #[must_use]
    pub const fn with_strip_params(mut self, value: bool) -> Self {
        self.strip_params = value;
        self
    }

    /// Sets whether a scheme is inferred for schemeless input.
    #[must_use]
    pub const fn with_normalize_protocol(mut self, value: bool) -> Self {
        self.normalize_protocol = value;
        self
    }

    /// Sets whether an empty path becomes `/`.
    #[must_use]
    pub const fn with_add_root_path(mut self, value: bool) -> Self {
        self.add_root_path = value;
        self
    }

    /// Sets whether trailing slashes are removed from the path.
    #[must_use]
    pub const fn with_trim_trailing_slash(mut self, value: bool) -> Self {
        self.trim_trailing_slash = value;
        self
    }

    /// Sets whether the result is lower-cased.
    #[must_use]
    pub const fn with_downcase(mut self, value: bool) -> Self {
        self.downcase = value;
        self
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "strip_www" | "stripWWW" | "stripWww" => Some(&mut self.strip_www),
            "strip_fragment" | "stripFragment" => Some(&mut self.strip_fragment),
            "strip_params" | "stripParams" => Some(&mut self.strip_params),
            "normalize_protocol" | "normalizeProtocol" => Some(&mut self.normalize_protocol),
            "add_root_path" | "addRootPath" => Some(&mut self.add_root_path),
            "trim_trailing_slash" | "trimTrailingSlash" => Some(&mut self.trim_trailing_slash),
            "downcase" => Some(&mut self.downcase),
            _ => None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
