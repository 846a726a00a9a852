//! Query-string shaping shared by every endpoint.
//!
//! Optional values are dropped when `None` or blank, so an omitted filter never
//! reaches the wire as `key=`. Encoding happens later in the HTTP layer, the same
//! way for every value.
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always sent, even if empty; the vendor reports a missing identifier.
    pub fn required(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Sent only when present and not blank.
    ///
    /// ```
    /// use creators_api::QueryParams;
    ///
    /// let q = QueryParams::new()
    ///     .required("query", "rust")
    ///     .optional("sortBy", None::<&str>)
    ///     .optional("continuationToken", Some("  "))
    ///     .optional("amount", Some(20));
    /// assert_eq!(q.get("amount"), Some("20"));
    /// assert_eq!(q.get("sortBy"), None);
    /// assert_eq!(q.len(), 2);
    /// ```
    pub fn optional<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value {
            let v = v.to_string();
            if !v.trim().is_empty() {
                self.pairs.push((key, v));
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub(crate) fn into_pairs(self) -> Vec<(&'static str, Cow<'static, str>)> {
        self.pairs
            .into_iter()
            .map(|(k, v)| (k, Cow::Owned(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let q = QueryParams::new()
            .required("subreddit", "rust")
            .optional("sort", Some("top"))
            .optional("timeframe", Some("week"))
            .optional("after", None::<String>);
        let keys: Vec<_> = q.into_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["subreddit", "sort", "timeframe"]);
    }

    #[test]
    fn required_values_are_kept_verbatim() {
        let q = QueryParams::new().required("url", "https://x.com/a?b=c&d");
        assert_eq!(q.get("url"), Some("https://x.com/a?b=c&d"));

        let empty = QueryParams::new().required("handle", "");
        assert_eq!(empty.get("handle"), Some(""));
    }

    #[test]
    fn booleans_render_as_words() {
        let q = QueryParams::new()
            .optional("get_transcript", Some(true))
            .optional("other", Some(false));
        assert_eq!(q.get("get_transcript"), Some("true"));
        assert_eq!(q.get("other"), Some("false"));
        assert!(!q.is_empty());
    }
}
