use std::fmt::Display;

use url::form_urlencoded::byte_serialize;

/// Abstraction allowing to help with the handling of URLs.
///
/// Locators handed to the player may be relative to the page (e.g. `/media/stream/42`),
/// so this stays a thin wrapper over the string rather than a fully-parsed URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    inner: String,
}

impl Url {
    pub fn new(url: String) -> Self {
        Self { inner: url }
    }

    pub fn get_ref(&self) -> &str {
        self.inner.as_str()
    }

    /// Returns the query string of this URL, without its leading `?`.
    ///
    /// Returns `None` if this URL has no query string.
    pub fn query(&self) -> Option<&str> {
        let without_hash = self.without_fragment();
        without_hash.find('?').map(|idx| &without_hash[idx + 1..])
    }

    /// Returns a new `Url` with the `key=value` pair appended to its query string.
    ///
    /// Both key and value are form-urlencoded. Any query parameter already present is kept as
    /// is and the fragment, if one, stays at the end.
    pub fn with_query_param(&self, key: &str, value: &str) -> Url {
        let without_hash = self.without_fragment();
        let fragment = &self.inner[without_hash.len()..];
        let separator = match self.query() {
            None => "?",
            Some(query) if query.is_empty() || query.ends_with('&') => "",
            Some(_) => "&",
        };
        let key: String = byte_serialize(key.as_bytes()).collect();
        let value: String = byte_serialize(value.as_bytes()).collect();
        Url {
            inner: format!("{without_hash}{separator}{key}={value}{fragment}"),
        }
    }

    fn without_fragment(&self) -> &str {
        match self.inner.find('#') {
            Some(idx) => &self.inner[0..idx],
            None => &self.inner,
        }
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_ref())
    }
}
