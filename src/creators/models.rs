// Creator models — the read-only view of a creator returned by the backend.
//
// Every "missing counts as zero" rule is applied here, during
// deserialization, so refinement code can read plain numbers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient::{self, KeyAliases};
use crate::refine::tier::Tier;

/// Per-platform audience metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformMetrics {
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub followers: u64,
    /// Engagement rate in percent (e.g. 3.4 means 3.4%).
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub engagement_rate: f64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub avg_views: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub avg_likes: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub avg_comments: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub country: String,
}

/// Verification status. Anything the backend sends other than "verified"
/// (or `true`) is treated as unverified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    Verified,
    #[default]
    Unverified,
}

impl Verification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verification::Verified => "verified",
            Verification::Unverified => "unverified",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "verified" | "true" | "yes" => Some(Verification::Verified),
            "unverified" | "false" | "no" => Some(Verification::Unverified),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Verification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Bool(true) => Verification::Verified,
            serde_json::Value::String(s) => Verification::parse(&s).unwrap_or_default(),
            _ => Verification::Unverified,
        })
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alternate key spellings accepted for `CreatorRecord` fields.
const CREATOR_ALIASES: KeyAliases = &[
    ("id", &["_id"]),
    ("displayName", &["name"]),
    ("contentCategories", &["categories"]),
    ("verification", &["verificationStatus"]),
    ("satisfactionScore", &["rating"]),
    ("totalCollaborations", &["collaborations"]),
    ("relevanceScore", &["score"]),
];

/// A creator as returned by the listing and search endpoints.
///
/// The derived serde code is reached through the `Serialize`/`Deserialize`
/// impls below, which fold `CREATOR_ALIASES` first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase", default)]
pub struct CreatorRecord {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub display_name: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub bio: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub niche: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub content_categories: Vec<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub primary_platform: String,
    #[serde(deserialize_with = "platform_map")]
    pub platforms: HashMap<String, PlatformMetrics>,
    #[serde(deserialize_with = "location_or_default")]
    pub location: Location,
    pub verification: Verification,
    /// Aggregate satisfaction score on a 0–5 scale.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub satisfaction_score: f64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub total_collaborations: u64,
    #[serde(deserialize_with = "lenient::opt_timestamp")]
    pub last_active: Option<DateTime<Utc>>,
    /// Only present when the record came from a ranked search.
    #[serde(
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub relevance_score: Option<f64>,
}

impl Serialize for CreatorRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CreatorRecord::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for CreatorRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        lenient::fold_aliases(&mut value, CREATOR_ALIASES);
        CreatorRecord::deserialize(value).map_err(D::Error::custom)
    }
}

impl CreatorRecord {
    /// Metrics for the record's declared primary platform, if present.
    pub fn primary_metrics(&self) -> Option<&PlatformMetrics> {
        self.platforms.get(&self.primary_platform)
    }

    /// Primary-platform follower count; zero when metrics are missing.
    pub fn followers(&self) -> u64 {
        self.primary_metrics().map_or(0, |m| m.followers)
    }

    /// Primary-platform engagement rate; zero when metrics are missing.
    pub fn engagement_rate(&self) -> f64 {
        self.primary_metrics().map_or(0.0, |m| m.engagement_rate)
    }

    pub fn tier(&self) -> Tier {
        Tier::from_followers(self.followers())
    }

    /// Last-active time as epoch milliseconds; missing sorts as epoch 0.
    pub fn last_active_millis(&self) -> i64 {
        self.last_active.map_or(0, |t| t.timestamp_millis())
    }
}

/// Platform map whose malformed entries collapse to default metrics.
fn platform_map<'de, D>(deserializer: D) -> Result<HashMap<String, PlatformMetrics>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(entries) = value else {
        return Ok(HashMap::new());
    };
    Ok(entries
        .into_iter()
        .map(|(platform, metrics)| {
            let metrics = serde_json::from_value(metrics).unwrap_or_default();
            (platform, metrics)
        })
        .collect())
}

fn location_or_default<'de, D>(deserializer: D) -> Result<Location, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
