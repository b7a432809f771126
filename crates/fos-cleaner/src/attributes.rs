//! Tag Attributes
//!
//! Ordered attribute map with normalized names: set, get, remove, has.

use std::collections::HashMap;

/// Single attribute (name already normalized)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Ordered attribute collection keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    attributes: Vec<Attribute>,
    by_name: HashMap<String, usize>,
}

/// HTML cleaners treat everything at or below U+0020 as trimmable.
fn trim_markup(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

fn normalize_name(name: &str) -> String {
    trim_markup(name).to_lowercase()
}

fn normalize_value(value: &str) -> String {
    trim_markup(value)
        .chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect()
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Set an attribute, replacing the value in place if the name exists.
    ///
    /// Names are trimmed and lowercased; a name that normalizes to nothing is
    /// dropped. Values are trimmed and control characters become spaces.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = normalize_name(name);
        if name.is_empty() {
            tracing::trace!("Ignoring attribute with blank name");
            return;
        }
        let value = normalize_value(value);

        if let Some(&index) = self.by_name.get(&name) {
            self.attributes[index].value = value;
        } else {
            let index = self.attributes.len();
            self.by_name.insert(name.clone(), index);
            self.attributes.push(Attribute { name, value });
        }
    }

    /// Get attribute value (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Check if attribute exists (case-insensitive)
    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Remove attribute by name, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        if name.trim().is_empty() {
            return None;
        }
        let index = self.by_name.remove(&name.to_lowercase())?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index).value)
    }

    /// Drop every attribute
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.by_name.clear();
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for AttributeStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name.as_ref(), value.as_ref());
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a AttributeStore {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = AttributeStore::new();
        attrs.set("class", "btn");
        attrs.set("id", "submit");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("class"), Some("btn"));
        assert_eq!(attrs.get("ID"), Some("submit"));
    }

    #[test]
    fn test_normalization() {
        let mut attrs = AttributeStore::new();
        attrs.set(" Foo ", "b\u{1}ar");
        assert_eq!(attrs.get("FOO"), Some("b ar"));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["foo"]);

        // Normalizing an already normalized pair changes nothing
        attrs.set("foo", "b ar");
        assert_eq!(attrs.get("foo"), Some("b ar"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_value_trim_includes_controls() {
        let mut attrs = AttributeStore::new();
        attrs.set("title", "\u{1}\t hello\nworld\u{7f}! ");
        assert_eq!(attrs.get("title"), Some("hello world !"));
    }

    #[test]
    fn test_blank_name_ignored() {
        let mut attrs = AttributeStore::new();
        attrs.set("   ", "x");
        attrs.set("", "x");
        assert!(attrs.is_empty());
        assert_eq!(attrs.remove("  "), None);
        assert!(!attrs.has(""));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut attrs = AttributeStore::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("A", "3");

        let pairs: Vec<_> = attrs.iter().map(|a| (a.name.as_str(), a.value.as_str())).collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove_attribute() {
        let mut attrs = AttributeStore::new();
        attrs.set("foo", "bar");
        attrs.set("baz", "qux");
        attrs.set("last", "z");

        assert!(attrs.has("foo"));
        assert_eq!(attrs.remove("FOO"), Some("bar".to_string()));
        assert!(!attrs.has("foo"));
        assert_eq!(attrs.get("baz"), Some("qux"));
        assert_eq!(attrs.get("last"), Some("z"));
        assert_eq!(attrs.remove("missing"), None);
    }

    #[test]
    fn test_from_iter() {
        let attrs: AttributeStore = [("HREF", " /x "), ("rel", "nofollow")].into_iter().collect();
        assert_eq!(attrs.get("href"), Some("/x"));
        assert_eq!(attrs.len(), 2);
    }
}
