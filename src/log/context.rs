use std::{collections::BTreeMap, fmt::Display};

/// Placeholder values for a single log call.
///
/// Keys are placeholder names without braces; values are stored in their
/// `Display` form, so anything printable can be passed in.
///
/// # Example
///
/// ```rust
/// use filelog::log::Context;
///
/// let ctx = Context::new().with("user", "alice").with("attempts", 3);
/// assert_eq!(ctx.get("attempts"), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: BTreeMap<String, String>,
}

impl Context {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.insert(key.into(), value.to_string());
    }

    /// Value for `key` in its string form.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `true` when no placeholders are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Finds the longest `{key}` placeholder that `text` starts with and
    /// returns its byte length together with the value to substitute.
    pub(crate) fn placeholder_at(&self, text: &str) -> Option<(usize, &str)> {
        let inner = text.strip_prefix('{')?;
        self.values
            .iter()
            .filter(|(key, _)| {
                inner
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('}'))
            })
            .max_by_key(|(key, _)| key.len())
            .map(|(key, value)| (key.len() + 2, value.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        for (key, value) in iter {
            ctx.insert(key, value);
        }
        ctx
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Context {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn values_are_stored_as_display_strings() {
        let ctx = Context::new().with("n", 42).with("pi", 1.5).with("s", "x");
        assert_eq!(ctx.get("n"), Some("42"));
        assert_eq!(ctx.get("pi"), Some("1.5"));
        assert_eq!(ctx.get("s"), Some("x"));
        assert_eq!(ctx.len(), 3);
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut ctx = Context::from([("name", "a")]);
        ctx.insert("name", "b");
        assert_eq!(ctx.get("name"), Some("b"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn placeholder_at_prefers_longest_key() {
        let ctx = Context::from([("a", "short"), ("ab", "long")]);
        assert_eq!(ctx.placeholder_at("{ab} tail"), Some((4, "long")));
        assert_eq!(ctx.placeholder_at("{a} tail"), Some((3, "short")));
        assert_eq!(ctx.placeholder_at("{abc}"), None);
        assert_eq!(ctx.placeholder_at("a}"), None);
    }
}
