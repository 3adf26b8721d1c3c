// AppliedStyle - opaque style descriptor attached to a cell

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style of a cell as a flat key/value map (`fillColor` -> `#ffffff`, ...)
///
/// Treated as a value: the change engine swaps whole styles and never edits
/// one in place. Use [`AppliedStyle::with`] to derive a new style.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppliedStyle {
    entries: BTreeMap<String, String>,
}

impl AppliedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.entries.remove(key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for AppliedStyle {
    /// Renders as `key=value;key=value`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{}", parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_builds_new_style() {
        let base = AppliedStyle::new();
        let styled = base.clone().with("fillColor", "#ff0000");
        assert!(base.is_empty());
        assert_eq!(styled.get("fillColor"), Some("#ff0000"));
    }

    #[test]
    fn test_without_removes_key() {
        let style = AppliedStyle::new()
            .with("rounded", "1")
            .with("shadow", "0")
            .without("shadow");
        assert_eq!(style.get("shadow"), None);
        assert_eq!(style.to_string(), "rounded=1");
    }

    #[test]
    fn test_display_is_sorted() {
        let style = AppliedStyle::new().with("z", "1").with("a", "2");
        assert_eq!(style.to_string(), "a=2;z=1");
    }
}
