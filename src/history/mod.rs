// Search history — a bounded, most-recently-used list of committed searches.
//
// Each entry keeps the filter snapshot that was active when the search ran,
// so a suggestion can restore the whole search, not just the text.

pub mod store;

pub use store::HistoryStore;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::creators::lenient;
use crate::refine::FilterCriteria;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// How a search was run against the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryType {
    #[default]
    FreeText,
    AiSemantic,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::FreeText => "free-text",
            QueryType::AiSemantic => "ai-semantic",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for QueryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("ai-semantic") | Some("ai") | Some("semantic") => QueryType::AiSemantic,
            _ => QueryType::FreeText,
        })
    }
}

/// One remembered search.
///
/// Persisted as `{query, type, timestamp, filters}`; `timestamp` is epoch
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    #[serde(rename = "type", default)]
    pub query_type: QueryType,
    #[serde(default, deserialize_with = "timestamp_or_zero")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "filters_or_default")]
    pub filters: FilterCriteria,
}

/// Bounded MRU list of searches, newest first, unique by query text.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SearchHistory {
    /// An empty history. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild from persisted entries (assumed newest first), re-applying
    /// the uniqueness and capacity rules.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            let query = entry.query.trim().to_string();
            if query.is_empty() || history.entries.iter().any(|e| e.query == query) {
                continue;
            }
            history.entries.push(HistoryEntry { query, ..entry });
        }
        history.entries.truncate(history.capacity);
        history
    }

    /// Record a search now. See [`SearchHistory::record_at`].
    pub fn record(&mut self, query: &str, query_type: QueryType, filters: &FilterCriteria) {
        self.record_at(query, query_type, filters, Utc::now().timestamp_millis());
    }

    /// Put a search at the front. An existing entry with the same query text
    /// is removed first, then the list is cut back to capacity.
    ///
    /// Blank queries are ignored.
    pub fn record_at(
        &mut self,
        query: &str,
        query_type: QueryType,
        filters: &FilterCriteria,
        timestamp: i64,
    ) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|e| e.query != query);
        self.entries.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                query_type,
                timestamp,
                filters: filters.clone(),
            },
        );
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries whose query contains `typed` (ignoring case), newest first.
    /// Blank input returns the most recent entries.
    pub fn suggestions(&self, typed: &str, limit: usize) -> Vec<&HistoryEntry> {
        let needle = typed.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.query.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Serialize to the persisted JSON array layout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    /// Parse the persisted layout. Returns `None` only when the document as
    /// a whole is unreadable; individual malformed entries are skipped.
    pub fn from_json(json: &str, capacity: usize) -> Option<Self> {
        let Value::Array(items) = serde_json::from_str::<Value>(json).ok()? else {
            return None;
        };
        let entries = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<HistoryEntry>(item).ok())
            .collect();
        Some(Self::from_entries(entries, capacity))
    }
}

fn timestamp_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient::value_as_timestamp(&value).map_or(0, |t| t.timestamp_millis()))
}

fn filters_or_default<'de, D>(deserializer: D) -> Result<FilterCriteria, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
