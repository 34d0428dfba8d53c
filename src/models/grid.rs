use crate::utils::constants::{COMMA_SEPARATOR, SPACE_SEPARATOR};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of the source table: `(latitude, longitude, code)`
///
/// Coordinates are kept as the exact text of the table so keys built from them
/// reproduce the source digits byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRecord {
    pub latitude: String,
    pub longitude: String,
    pub code: String,
}

impl GridRecord {
    pub fn new(latitude: String, longitude: String, code: String) -> Self {
        Self {
            latitude,
            longitude,
            code,
        }
    }

    /// Coordinate key for this cell joined with `separator`
    pub fn key(&self, separator: KeySeparator) -> String {
        let mut key =
            String::with_capacity(self.latitude.len() + self.longitude.len() + 1);
        key.push_str(&self.latitude);
        key.push(separator.as_char());
        key.push_str(&self.longitude);
        key
    }
}

/// Character joining latitude and longitude inside a coordinate key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySeparator {
    #[default]
    Comma,
    Space,
}

impl KeySeparator {
    pub fn as_char(&self) -> char {
        match self {
            KeySeparator::Comma => COMMA_SEPARATOR,
            KeySeparator::Space => SPACE_SEPARATOR,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            KeySeparator::Comma => "comma",
            KeySeparator::Space => "space",
        }
    }

    /// Rewrite every occurrence of `self` in `key` as `target`
    pub fn rewrite_key(&self, key: &str, target: KeySeparator) -> String {
        if *self == target {
            return key.to_string();
        }
        key.replace(self.as_char(), &target.as_char().to_string())
    }
}

impl fmt::Display for KeySeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Split a coordinate key into its latitude and longitude parts
///
/// Accepts either separator. Returns `None` unless the key holds exactly two parts.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    let mut parts = key.split([COMMA_SEPARATOR, SPACE_SEPARATOR]);
    let lat = parts.next()?;
    let lon = parts.next()?;
    if parts.next().is_some() || lat.is_empty() || lon.is_empty() {
        return None;
    }
    Some((lat, lon))
}

/// Coordinate key to classification code
///
/// Keys are unique and a repeated insert overwrites the value in place, keeping
/// the key's first-insertion position. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridMapping {
    cells: IndexMap<String, String>,
}

impl GridMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a cell, returning the code it replaced
    pub fn insert(&mut self, key: String, code: String) -> Option<String> {
        self.cells.insert(key, code)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Separator used by the keys: space if any key holds a space, comma otherwise
    pub fn detect_separator(&self) -> KeySeparator {
        if self.keys().any(|k| k.contains(SPACE_SEPARATOR)) {
            KeySeparator::Space
        } else {
            KeySeparator::Comma
        }
    }
}

impl IntoIterator for GridMapping {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl FromIterator<(String, String)> for GridMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(lat: &str, lon: &str, code: &str) -> GridRecord {
        GridRecord::new(lat.to_string(), lon.to_string(), code.to_string())
    }

    #[test]
    fn test_record_key_preserves_digits() {
        let r = record("40.5", "-74.0", "Dfa");
        assert_eq!(r.key(KeySeparator::Comma), "40.5,-74.0");
        assert_eq!(r.key(KeySeparator::Space), "40.5 -74.0");
    }

    #[test]
    fn test_separator_rewrite() {
        let comma = KeySeparator::Comma;
        assert_eq!(comma.rewrite_key("40.5,-74.0", KeySeparator::Space), "40.5 -74.0");
        assert_eq!(comma.rewrite_key("a,b,c", KeySeparator::Space), "a b c");
        assert_eq!(comma.rewrite_key("no-separator", KeySeparator::Space), "no-separator");
        assert_eq!(comma.rewrite_key("1,2", KeySeparator::Comma), "1,2");
        assert_eq!(
            KeySeparator::Space.rewrite_key("40.5 -74.0", KeySeparator::Comma),
            "40.5,-74.0"
        );
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("40.5,-74.0"), Some(("40.5", "-74.0")));
        assert_eq!(split_key("40.5 -74.0"), Some(("40.5", "-74.0")));
        assert_eq!(split_key("40.5"), None);
        assert_eq!(split_key("1,2,3"), None);
        assert_eq!(split_key(",2"), None);
    }

    #[test]
    fn test_mapping_last_write_wins_keeps_position() {
        let mut mapping = GridMapping::new();
        assert_eq!(mapping.insert("1,1".to_string(), "Af".to_string()), None);
        mapping.insert("2,2".to_string(), "BWh".to_string());
        assert_eq!(
            mapping.insert("1,1".to_string(), "Cfb".to_string()),
            Some("Af".to_string())
        );

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("1,1"), Some("Cfb"));
        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["1,1", "2,2"]);
    }

    #[test]
    fn test_mapping_serializes_compact_in_order() {
        let mapping: GridMapping = vec![
            ("10.0,20.0".to_string(), "Aw".to_string()),
            ("-5.5,100.25".to_string(), "BWh".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"10.0,20.0":"Aw","-5.5,100.25":"BWh"}"#);

        let back: GridMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }

    #[test]
    fn test_detect_separator() {
        let mut mapping = GridMapping::new();
        assert_eq!(mapping.detect_separator(), KeySeparator::Comma);
        mapping.insert("1.25 2.75".to_string(), "Cfa".to_string());
        assert_eq!(mapping.detect_separator(), KeySeparator::Space);
    }
}
