// Data models that map to database rows.

use serde::{Deserialize, Serialize};

/// One committed search, as recorded in `search_log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLogEntry {
    pub id: i64,
    pub query: String,
    pub query_type: String,
    /// Records returned by the backend.
    pub result_count: u32,
    /// Records left after local refinement.
    pub visible_count: u32,
    pub searched_at: String,
}
