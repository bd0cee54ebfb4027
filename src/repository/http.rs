//! Inventory API endpoint configuration.

use std::fmt::Write as _;

/// Placeholder replaced by the item code in the lookup endpoint.
const CODE_PLACEHOLDER: &str = "{code}";

/// Base URL and paths of the inventory API.
///
/// # Examples
///
/// ```
/// use machine_tracker::repository::ApiEndpoints;
///
/// let api = ApiEndpoints::new("http://inventory.local/", "/api/machines", "/api/items/{code}/last");
/// assert_eq!(api.machines_url(), "http://inventory.local/api/machines");
/// assert_eq!(api.lookup_url("AB 12"), "http://inventory.local/api/items/AB%2012/last");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
    machines_endpoint: String,
    lookup_endpoint: String,
}

impl ApiEndpoints {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        machines_endpoint: impl Into<String>,
        lookup_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            machines_endpoint: machines_endpoint.into(),
            lookup_endpoint: lookup_endpoint.into(),
        }
    }

    /// URL of the full machine list.
    #[must_use]
    pub fn machines_url(&self) -> String {
        join(&self.base_url, &self.machines_endpoint)
    }

    /// URL of the last-scanned lookup for `code`.
    ///
    /// The code is percent-encoded. When the endpoint has no `{code}`
    /// placeholder the code is appended as a final path segment.
    #[must_use]
    pub fn lookup_url(&self, code: &str) -> String {
        let encoded = percent_encode(code);
        let path = if self.lookup_endpoint.contains(CODE_PLACEHOLDER) {
            self.lookup_endpoint.replace(CODE_PLACEHOLDER, &encoded)
        } else {
            format!("{}/{encoded}", self.lookup_endpoint.trim_end_matches('/'))
        };
        join(&self.base_url, &path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_code_without_placeholder() {
        let api = ApiEndpoints::new("http://h", "machines", "/lookup/");
        assert_eq!(api.lookup_url("X1"), "http://h/lookup/X1");
        assert_eq!(api.machines_url(), "http://h/machines");
    }

    #[test]
    fn encodes_reserved_and_non_ascii_bytes() {
        assert_eq!(percent_encode("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(percent_encode("é"), "%C3%A9");
        assert_eq!(percent_encode("M-01_x.~"), "M-01_x.~");
    }
}
