// Database queries — every SQL statement the crate runs lives here.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::SearchLogEntry;

// --- Key/value store ---

/// Get a stored value by key.
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a stored value (upsert).
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Remove a stored value. Removing a missing key is not an error.
pub fn delete_value(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
    Ok(())
}

/// Every stored key with its last update time, alphabetically.
pub fn list_keys(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, updated_at FROM kv_store ORDER BY key")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut keys = Vec::new();
    for row in rows {
        keys.push(row?);
    }
    Ok(keys)
}

// --- Search log ---

/// Append a committed search to the log and return its ID.
pub fn insert_search_log(
    conn: &Connection,
    query: &str,
    query_type: &str,
    result_count: u32,
    visible_count: u32,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO search_log (query, query_type, result_count, visible_count)
         VALUES (?1, ?2, ?3, ?4)",
        params![query, query_type, result_count, visible_count],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent searches first.
pub fn get_recent_searches(conn: &Connection, limit: u32) -> Result<Vec<SearchLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, query, query_type, result_count, visible_count, searched_at
         FROM search_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(SearchLogEntry {
            id: row.get(0)?,
            query: row.get(1)?,
            query_type: row.get(2)?,
            result_count: row.get(3)?,
            visible_count: row.get(4)?,
            searched_at: row.get(5)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Total number of logged searches.
pub fn count_searches(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM search_log", [], |row| row.get(0))?;
    Ok(count)
}
