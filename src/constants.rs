//! Constants for URL normalization.

/// Scheme prepended to schemeless input when no port implies another.
pub const DEFAULT_SCHEME: &str = "http";

/// Schemes the pipeline normalizes. Everything else passes through verbatim.
pub const NORMALIZED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Default port for `http`.
pub const HTTP_DEFAULT_PORT: u16 = 80;

/// Default port for `https`.
pub const HTTPS_DEFAULT_PORT: u16 = 443;

/// Default port for `ftp`.
pub const FTP_DEFAULT_PORT: u16 = 21;

/// Alternate port that implies `https` during scheme inference.
pub const HTTPS_ALT_PORT: u16 = 8080;

/// Host label removed by the host stage when `strip_www` is set.
pub const WWW_PREFIX: &str = "www.";

/// Returns the conventional port for one of the normalized schemes.
///
/// ```
/// use url_normalize::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("gopher"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(HTTP_DEFAULT_PORT),
        "https" => Some(HTTPS_DEFAULT_PORT),
        "ftp" => Some(FTP_DEFAULT_PORT),
        _ => None,
    }
}

/// Returns true if the scheme is one the pipeline normalizes.
#[must_use]
pub fn is_normalized_scheme(scheme: &str) -> bool {
    NORMALIZED_SCHEMES.contains(&scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("https"), Some(443));
        assert_eq!(default_port("ftp"), Some(21));
        assert_eq!(default_port("HTTP"), None);
        assert_eq!(default_port("ws"), None);
    }

    #[test]
    fn normalized_scheme_allow_list() {
        assert!(is_normalized_scheme("ftp"));
        assert!(!is_normalized_scheme("mailto"));
        assert!(!is_normalized_scheme("javascript"));
    }
}
