// System status display — local store stats, session, and recent searches.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::history::HistoryStore;

/// Display system status to the terminal.
pub async fn show(
    db: &Arc<dyn Database>,
    db_path: &str,
    api_url: &str,
    history_capacity: usize,
) -> Result<()> {
    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);
    println!("Backend:  {}", api_url);

    let keys = db.list_keys().await?;
    let names: Vec<&str> = keys.iter().map(|(k, _)| k.as_str()).collect();
    if names.is_empty() {
        println!("Store:    empty");
    } else {
        println!("Store:    {} ({})", names.len(), names.join(", "));
    }

    let session = crate::session::load(db).await;
    match (&session.user, session.is_signed_in()) {
        (Some(user), true) => {
            let brand = user.brand_name.as_deref().unwrap_or("no brand");
            println!("Session:  signed in as {} <{}> ({})", user.name, user.email, brand);
        }
        _ => {
            println!("Session:  signed out");
            println!("  Run `scout login <email>` to sign in");
        }
    }

    let history = HistoryStore::new(db.clone(), history_capacity).load().await;
    println!(
        "History:  {} of {} saved searches",
        history.len(),
        history.capacity()
    );

    let total = db.count_searches().await?;
    let recent = db.get_recent_searches(5).await?;
    if recent.is_empty() {
        println!("Searches: none yet");
    } else {
        println!("Searches: {} total, most recent:", total);
        for entry in &recent {
            println!(
                "  \"{}\" ({}): {} fetched, {} shown ({})",
                entry.query,
                entry.query_type,
                entry.result_count,
                entry.visible_count,
                entry.searched_at
            );
        }
    }

    Ok(())
}

/// Whether the database file exists yet.
pub fn is_initialized(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
