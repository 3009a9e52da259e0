// Sort keys and their comparators.
//
// Comparators only define the key order; ties are left as `Equal` so the
// stable sort in the pipeline keeps input order for equal keys.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::creators::CreatorRecord;

/// Ordering applied to a refined result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Relevance,
    FollowersDesc,
    FollowersAsc,
    EngagementDesc,
    SatisfactionDesc,
    RecentActivity,
}

/// A comparator over two creators.
pub type Comparator = fn(&CreatorRecord, &CreatorRecord) -> Ordering;

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Relevance,
        SortKey::FollowersDesc,
        SortKey::FollowersAsc,
        SortKey::EngagementDesc,
        SortKey::SatisfactionDesc,
        SortKey::RecentActivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::FollowersDesc => "followers-desc",
            SortKey::FollowersAsc => "followers-asc",
            SortKey::EngagementDesc => "engagement-desc",
            SortKey::SatisfactionDesc => "satisfaction-desc",
            SortKey::RecentActivity => "recent-activity",
        }
    }

    /// Parse a key label. Unknown labels are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }

    pub fn comparator(&self) -> Comparator {
        comparator_for(*self)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(SortKey::as_str).collect();
            format!("unknown sort key '{s}' (expected one of: {})", known.join(", "))
        })
    }
}

/// Look up the comparator for a sort key.
pub fn comparator_for(key: SortKey) -> Comparator {
    match key {
        SortKey::Relevance => by_relevance,
        SortKey::FollowersDesc => by_followers_desc,
        SortKey::FollowersAsc => by_followers_asc,
        SortKey::EngagementDesc => by_engagement_desc,
        SortKey::SatisfactionDesc => by_satisfaction_desc,
        SortKey::RecentActivity => by_recent_activity,
    }
}

/// Descending float order where `-0.0` and `0.0` tie.
fn desc_f64(a: f64, b: f64) -> Ordering {
    (b + 0.0).total_cmp(&(a + 0.0))
}

fn by_relevance(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    let score = |r: &CreatorRecord| r.relevance_score.unwrap_or(0.0);
    desc_f64(score(a), score(b))
}

fn by_followers_desc(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    b.followers().cmp(&a.followers())
}

fn by_followers_asc(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    a.followers().cmp(&b.followers())
}

fn by_engagement_desc(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    desc_f64(a.engagement_rate(), b.engagement_rate())
}

fn by_satisfaction_desc(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    desc_f64(a.satisfaction_score, b.satisfaction_score)
}

fn by_recent_activity(a: &CreatorRecord, b: &CreatorRecord) -> Ordering {
    b.last_active_millis().cmp(&a.last_active_millis())
}
