//! Ordered filename → content mapping.
//!
//! DESIGN
//! ======
//! Keys keep the position of their first insertion. Re-inserting an existing
//! name replaces its content in place. The set is small (a handful of files
//! per generation), so lookups are linear scans over a `Vec`.

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<(String, String)>,
}

impl FileSet {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or overwrite `name`. Returns the previous content, if any.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> Option<String> {
        let name = name.into();
        let content = content.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            return Some(std::mem::replace(existing, content));
        }
        self.entries.push((name, content));
        None
    }

    /// Merge `other` into this set. Colliding names take `other`'s content
    /// but keep their existing position.
    pub fn merge(&mut self, other: FileSet) {
        for (name, content) in other.entries {
            self.insert(name, content);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// First entry (in insertion order) whose name ends with `suffix`.
    #[must_use]
    pub fn find_by_suffix(&self, suffix: &str) -> Option<(&str, &str)> {
        self.iter().find(|(k, _)| k.ends_with(suffix))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for FileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, content) in &self.entries {
            map.serialize_entry(name, content)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, content) in iter {
            set.insert(name, content);
        }
        set
    }
}

impl IntoIterator for FileSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
