use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SchemaError;

/// Multipart field name the analysis endpoint reads the document from
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Structured response for one analyzed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Echo of the analyzed document's name
    pub filename: String,
    /// Server-reported number of sentence matches across all categories
    pub total_clauses_found: u64,
    /// Category identifier to matched sentences, in server order
    pub clauses: ClauseMap,
    /// The service tags successful bodies with `success: true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl AnalysisResult {
    /// Parse and validate a success body
    pub fn from_json(body: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Sum of the sentence sequence lengths, which the server should report as
    /// `total_clauses_found`
    pub fn counted_matches(&self) -> u64 {
        self.clauses.sentence_count() as u64
    }

    /// True when the reported total disagrees with the clause map
    pub fn is_inconsistent(&self) -> bool {
        self.counted_matches() != self.total_clauses_found
    }
}

/// One clause category and its matched sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseEntry {
    pub category: String,
    pub sentences: Vec<String>,
}

/// Insertion-ordered mapping from clause category to sentences.
///
/// JSON objects carry no ordering guarantee in most map types, but the display
/// order is whatever order the server wrote the keys in, so the entries are
/// kept as a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseMap {
    entries: Vec<ClauseEntry>,
}

impl ClauseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a category. A replaced category keeps its original
    /// position.
    pub fn insert(&mut self, category: impl Into<String>, sentences: Vec<String>) {
        let category = category.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(existing) => existing.sentences = sentences,
            None => self.entries.push(ClauseEntry {
                category,
                sentences,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.sentences.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClauseEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.entries.iter().map(|e| e.sentences.len()).sum()
    }
}

impl<C: Into<String>> FromIterator<(C, Vec<String>)> for ClauseMap {
    fn from_iter<I: IntoIterator<Item = (C, Vec<String>)>>(iter: I) -> Self {
        let mut map = ClauseMap::new();
        for (category, sentences) in iter {
            map.insert(category, sentences);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ClauseMap {
    type Item = &'a ClauseEntry;
    type IntoIter = std::slice::Iter<'a, ClauseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ClauseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.sentences)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClauseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClauseMapVisitor;

        impl<'de> Visitor<'de> for ClauseMapVisitor {
            type Value = ClauseMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping clause categories to sentence arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ClauseMap, A::Error> {
                let mut map = ClauseMap {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((category, sentences)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    map.insert(category, sentences);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ClauseMapVisitor)
    }
}

/// Failure body: `{ "error": "..." }` with a non-success status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Pull the user-facing message out of a failure body.
    ///
    /// Returns `None` when the body is not JSON, has no `error` field, or the
    /// field is not a non-empty string.
    pub fn message_from(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
