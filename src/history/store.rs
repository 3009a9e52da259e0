// HistoryStore — persists SearchHistory in the local key/value store.
//
// Loading never fails: a missing value, a read error, or an unparseable
// document all come back as an empty history, with a warning logged.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::{QueryType, SearchHistory};
use crate::db::Database;
use crate::refine::FilterCriteria;

/// Key under which the history array is stored.
pub const HISTORY_KEY: &str = "search_history";

pub struct HistoryStore {
    db: Arc<dyn Database>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(db: Arc<dyn Database>, capacity: usize) -> Self {
        Self { db, capacity }
    }

    /// Load the stored history, or an empty one if nothing usable is stored.
    pub async fn load(&self) -> SearchHistory {
        let raw = match self.db.get_value(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return SearchHistory::new(self.capacity),
            Err(e) => {
                warn!(error = %e, "Failed to read search history, starting empty");
                return SearchHistory::new(self.capacity);
            }
        };

        match SearchHistory::from_json(&raw, self.capacity) {
            Some(history) => {
                debug!(entries = history.len(), "Loaded search history");
                history
            }
            None => {
                warn!("Stored search history is corrupt, starting empty");
                SearchHistory::new(self.capacity)
            }
        }
    }

    pub async fn save(&self, history: &SearchHistory) -> Result<()> {
        let json = history
            .to_json()
            .context("Failed to serialize search history")?;
        self.db
            .set_value(HISTORY_KEY, &json)
            .await
            .context("Failed to save search history")
    }

    /// Record a committed search and persist the updated list.
    pub async fn record(
        &self,
        query: &str,
        query_type: QueryType,
        filters: &FilterCriteria,
    ) -> Result<SearchHistory> {
        let mut history = self.load().await;
        history.record(query, query_type, filters);
        self.save(&history).await?;
        Ok(history)
    }

    pub async fn clear(&self) -> Result<()> {
        self.db
            .delete_value(HISTORY_KEY)
            .await
            .context("Failed to clear search history")
    }
}
