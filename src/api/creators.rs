// Creator endpoints — listing, keyword search, and AI semantic search.
//
// All three return the same envelope; the backend has used `creators`,
// `results` and `data` for the list field over time, so all are accepted.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use super::client::BackendClient;
use crate::creators::lenient;
use crate::creators::CreatorRecord;

/// Response envelope shared by the creator endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatorListResponse {
    #[serde(alias = "results", alias = "data", deserialize_with = "creator_list")]
    pub creators: Vec<CreatorRecord>,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub total: Option<u64>,
}

#[derive(Serialize)]
struct AiSearchRequest<'a> {
    query: &'a str,
    limit: u32,
}

/// Fetch one page of the plain creator listing (no relevance scores).
pub async fn list_creators(
    client: &BackendClient,
    page: u32,
    limit: u32,
) -> Result<CreatorListResponse> {
    let page = page.to_string();
    let limit = limit.to_string();
    let resp: CreatorListResponse = client
        .get_json("/creators", &[("page", page.as_str()), ("limit", limit.as_str())])
        .await?;
    info!(count = resp.creators.len(), total = ?resp.total, "Fetched creator listing");
    Ok(resp)
}

/// Keyword search. Results carry relevance scores.
pub async fn search_creators(
    client: &BackendClient,
    query: &str,
    limit: u32,
) -> Result<CreatorListResponse> {
    let limit = limit.to_string();
    let resp: CreatorListResponse = client
        .get_json("/creators/search", &[("q", query), ("limit", limit.as_str())])
        .await?;
    info!(query = query, count = resp.creators.len(), "Keyword search complete");
    Ok(resp)
}

/// Natural-language search ranked by the backend's AI matcher.
pub async fn ai_search(
    client: &BackendClient,
    query: &str,
    limit: u32,
) -> Result<CreatorListResponse> {
    let resp: CreatorListResponse = client
        .post_json("/creators/ai-search", &AiSearchRequest { query, limit })
        .await?;
    info!(query = query, count = resp.creators.len(), "AI search complete");
    Ok(resp)
}

/// Decode the creator list item by item, dropping entries that are not
/// objects rather than failing the whole page.
fn creator_list<'de, D>(deserializer: D) -> Result<Vec<CreatorRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let creators: Vec<CreatorRecord> = items
        .into_iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if creators.len() < total {
        warn!(
            dropped = total - creators.len(),
            "Skipped malformed creator entries"
        );
    }
    Ok(creators)
}
