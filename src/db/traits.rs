// Database trait — backend-agnostic async interface for all DB operations.
//
// The only implementor today is SqliteDatabase (rusqlite behind a Mutex).
// Methods are async so a natively async backend can slot in behind the
// same `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::SearchLogEntry;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Key/value store ---

    /// Get a stored value by key (e.g., "search_history").
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Set a stored value (upsert).
    async fn set_value(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a stored value.
    async fn delete_value(&self, key: &str) -> Result<()>;

    /// All stored keys with their last update time.
    async fn list_keys(&self) -> Result<Vec<(String, String)>>;

    // --- Search log ---

    /// Append a committed search and return its ID.
    async fn insert_search_log(
        &self,
        query: &str,
        query_type: &str,
        result_count: u32,
        visible_count: u32,
    ) -> Result<i64>;

    /// Get recent searches, newest first.
    async fn get_recent_searches(&self, limit: u32) -> Result<Vec<SearchLogEntry>>;

    /// Total number of logged searches.
    async fn count_searches(&self) -> Result<i64>;
}
