// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across an .await point.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::SearchLogEntry;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_value(&conn, key)
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_value(&conn, key, value)
    }

    async fn delete_value(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::delete_value(&conn, key)
    }

    async fn list_keys(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn.lock().await;
        super::queries::list_keys(&conn)
    }

    async fn insert_search_log(
        &self,
        query: &str,
        query_type: &str,
        result_count: u32,
        visible_count: u32,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_search_log(&conn, query, query_type, result_count, visible_count)
    }

    async fn get_recent_searches(&self, limit: u32) -> Result<Vec<SearchLogEntry>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_searches(&conn, limit)
    }

    async fn count_searches(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_searches(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_value_roundtrip() {
        let db = test_db().await;
        assert_eq!(db.get_value("search_history").await.unwrap(), None);
        db.set_value("search_history", "[]").await.unwrap();
        assert_eq!(
            db.get_value("search_history").await.unwrap(),
            Some("[]".to_string())
        );
        db.delete_value("search_history").await.unwrap();
        assert!(db.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trait_search_log() {
        let db = test_db().await;
        let id = db
            .insert_search_log("fitness", "free-text", 30, 4)
            .await
            .unwrap();
        assert!(id > 0);
        let recent = db.get_recent_searches(5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].query_type, "free-text");
        assert_eq!(db.count_searches().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 3);
    }
}
