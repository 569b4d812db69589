//! Order-preserving keyed sections of a lab report.
//!
//! The `basic_tests`, `contaminant_tests` and `review` objects of a report are
//! open-ended maps from test name to result. Key order matters (the
//! contaminant lookup takes the first matching key) so entries are kept in
//! document order rather than in a hashed or sorted map.
//!
//! A section may also carry a section-level `verdict` and `note` string next
//! to its entries. Those are captured on the section itself and are never
//! treated as entries. Values that are not JSON objects are skipped.

use super::types::TestResult;
use super::verdict::Verdict;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Keyed collection of results in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    verdict: Option<Verdict>,
    note: Option<String>,
    entries: Vec<(String, T)>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            verdict: None,
            note: None,
            entries: Vec::new(),
        }
    }
}

impl<T> Section<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry (builder style).
    pub fn with_entry(mut self, key: impl Into<String>, value: T) -> Self {
        self.entries.push((key.into(), value));
        self
    }

    /// Set the section-level verdict (builder style).
    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Section-level verdict, if the report carries one.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.verdict.is_some()) + usize::from(self.note.is_some());
        let mut map = serializer.serialize_map(Some(self.entries.len() + extra))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        if let Some(ref verdict) = self.verdict {
            map.serialize_entry("verdict", verdict)?;
        }
        if let Some(ref note) = self.note {
            map.serialize_entry("note", note)?;
        }
        map.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Section<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SectionVisitor(PhantomData))
    }
}

struct SectionVisitor<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> Visitor<'de> for SectionVisitor<T> {
    type Value = Section<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of test names to results")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut section = Section::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            match value {
                Value::String(text) if key == "verdict" => section.verdict = Verdict::parse(&text),
                Value::String(text) if key == "note" => section.note = Some(text),
                value @ Value::Object(_) => {
                    // Malformed entries are dropped; the rest of the report stays usable.
                    if let Ok(entry) = serde_json::from_value::<T>(value) {
                        section.entries.push((key, entry));
                    }
                }
                _ => {}
            }
        }
        Ok(section)
    }
}

/// One entry of `contaminant_tests`: a single test, or a composite test made
/// of nested sub-checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ContaminantEntry {
    Test(TestResult),
    Group(Section<TestResult>),
}

impl ContaminantEntry {
    /// The entry's own verdict (for a group, the group-level verdict).
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            ContaminantEntry::Test(test) => test.verdict.as_ref(),
            ContaminantEntry::Group(group) => group.verdict(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ContaminantEntry::Group(_))
    }
}

/// A value is a group when any key besides `verdict`/`note` holds an object.
fn is_group_shape(map: &serde_json::Map<String, Value>) -> bool {
    map.iter()
        .any(|(key, value)| key != "verdict" && key != "note" && value.is_object())
}

impl<'de> Deserialize<'de> for ContaminantEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_group = match &value {
            Value::Object(map) => is_group_shape(map),
            _ => {
                return Err(serde::de::Error::custom(
                    "contaminant entry must be an object",
                ))
            }
        };

        if is_group {
            serde_json::from_value(value)
                .map(ContaminantEntry::Group)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(ContaminantEntry::Test)
                .map_err(serde::de::Error::custom)
        }
    }
}

impl Serialize for ContaminantEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContaminantEntry::Test(test) => test.serialize(serializer),
            ContaminantEntry::Group(group) => group.serialize(serializer),
        }
    }
}
