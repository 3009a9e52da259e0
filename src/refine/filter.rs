// Filter criteria and the per-record predicate.
//
// Every field is optional; an absent field places no constraint. Present
// fields compose with AND. Numeric bounds are inclusive.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::tier::Tier;
use crate::creators::lenient;
use crate::creators::{CreatorRecord, Verification};

/// Constraints applied to a creator result set.
///
/// Deserialization is lenient: blank strings, nulls and non-numeric bounds
/// all decode as "no constraint", so stale or hand-edited snapshots never
/// fail to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(deserialize_with = "opt_tier", skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub max_followers: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub min_engagement: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub max_engagement: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "opt_verification", skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub min_collaborations: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub min_satisfaction: Option<f64>,
}

/// Raw, user-typed filter values before parsing.
///
/// This is what a form or the CLI hands over. `FilterCriteria::from_input`
/// turns it into typed constraints, dropping anything that does not parse.
#[derive(Debug, Clone, Default)]
pub struct FilterInput {
    pub niche: Option<String>,
    pub tier: Option<String>,
    pub platform: Option<String>,
    pub min_followers: Option<String>,
    pub max_followers: Option<String>,
    pub min_engagement: Option<String>,
    pub max_engagement: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub verification: Option<String>,
    pub min_collaborations: Option<String>,
    pub min_satisfaction: Option<String>,
}

impl FilterCriteria {
    /// Parse raw input. Malformed values become "no constraint" and are
    /// logged rather than returned as errors.
    pub fn from_input(input: &FilterInput) -> Self {
        Self {
            niche: text(&input.niche),
            tier: parsed("tier", &input.tier, Tier::parse),
            platform: text(&input.platform),
            min_followers: parsed("min-followers", &input.min_followers, lenient::parse_u64),
            max_followers: parsed("max-followers", &input.max_followers, lenient::parse_u64),
            min_engagement: parsed("min-engagement", &input.min_engagement, lenient::parse_f64),
            max_engagement: parsed("max-engagement", &input.max_engagement, lenient::parse_f64),
            country: text(&input.country),
            city: text(&input.city),
            verification: parsed("verification", &input.verification, Verification::parse),
            min_collaborations: parsed(
                "min-collaborations",
                &input.min_collaborations,
                lenient::parse_u64,
            ),
            min_satisfaction: parsed("min-satisfaction", &input.min_satisfaction, lenient::parse_f64),
        }
    }

    /// True when no constraint is set; such criteria match every record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of active constraints.
    pub fn active_count(&self) -> usize {
        [
            self.niche.is_some(),
            self.tier.is_some(),
            self.platform.is_some(),
            self.min_followers.is_some(),
            self.max_followers.is_some(),
            self.min_engagement.is_some(),
            self.max_engagement.is_some(),
            self.country.is_some(),
            self.city.is_some(),
            self.verification.is_some(),
            self.min_collaborations.is_some(),
            self.min_satisfaction.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Reset every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `record` satisfies every active constraint.
    pub fn accepts(&self, record: &CreatorRecord) -> bool {
        let followers = record.followers();
        let engagement = record.engagement_rate();

        eq_ignore_case(&self.niche, &record.niche)
            && self.tier.is_none_or(|t| Tier::from_followers(followers) == t)
            && eq_ignore_case(&self.platform, &record.primary_platform)
            && self.min_followers.is_none_or(|min| followers >= min)
            && self.max_followers.is_none_or(|max| followers <= max)
            && self.min_engagement.is_none_or(|min| engagement >= min)
            && self.max_engagement.is_none_or(|max| engagement <= max)
            && eq_ignore_case(&self.country, &record.location.country)
            && self
                .city
                .as_deref()
                .is_none_or(|city| contains_ignore_case(&record.location.city, city))
            && self.verification.is_none_or(|v| record.verification == v)
            && self
                .min_collaborations
                .is_none_or(|min| record.total_collaborations >= min)
            && self
                .min_satisfaction
                .is_none_or(|min| record.satisfaction_score >= min)
    }
}

/// Free-text match over name, bio, niche and content categories.
///
/// Blank text matches everything.
pub fn matches_text(record: &CreatorRecord, free_text: &str) -> bool {
    let needle = free_text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);
    hit(&record.display_name)
        || hit(&record.bio)
        || hit(&record.niche)
        || record.content_categories.iter().any(|c| hit(c))
}

/// The full predicate: free text AND every criteria field.
pub fn matches(record: &CreatorRecord, criteria: &FilterCriteria, free_text: &str) -> bool {
    matches_text(record, free_text) && criteria.accepts(record)
}

fn eq_ignore_case(wanted: &Option<String>, actual: &str) -> bool {
    match wanted {
        Some(w) => w.trim().to_lowercase() == actual.trim().to_lowercase(),
        None => true,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parsed<T>(field: &str, raw: &Option<String>, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = text(raw)?;
    let value = parse(&raw);
    if value.is_none() {
        warn!(field = field, value = %raw, "Ignoring malformed filter value");
    }
    value
}

fn opt_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::opt_string(deserializer)?.and_then(|s| Tier::parse(&s)))
}

fn opt_verification<'de, D>(deserializer: D) -> Result<Option<Verification>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(true) => Some(Verification::Verified),
        serde_json::Value::Bool(false) => Some(Verification::Unverified),
        serde_json::Value::String(s) => Verification::parse(&s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creators::PlatformMetrics;

    fn creator(niche: &str, followers: u64, engagement: f64) -> CreatorRecord {
        let mut record = CreatorRecord {
            id: niche.to_string(),
            display_name: format!("{niche} creator"),
            niche: niche.to_string(),
            primary_platform: "instagram".to_string(),
            ..Default::default()
        };
        record.platforms.insert(
            "instagram".to_string(),
            PlatformMetrics {
                followers,
                engagement_rate: engagement,
                ..Default::default()
            },
        );
        record
    }

    #[test]
    fn test_empty_criteria_accepts_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.accepts(&creator("Gaming", 0, 0.0)));
        assert!(criteria.accepts(&CreatorRecord::default()));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            min_followers: Some(1000),
            max_followers: Some(2000),
            min_engagement: Some(2.5),
            ..Default::default()
        };
        assert!(criteria.accepts(&creator("x", 1000, 2.5)));
        assert!(criteria.accepts(&creator("x", 2000, 9.0)));
        assert!(!criteria.accepts(&creator("x", 2001, 9.0)));
        assert!(!criteria.accepts(&creator("x", 1500, 2.4)));
    }

    #[test]
    fn test_missing_primary_metrics_count_as_zero() {
        let mut record = creator("Food", 50_000, 3.0);
        record.primary_platform = "youtube".to_string();
        let tier = FilterCriteria {
            tier: Some(Tier::Nano),
            ..Default::default()
        };
        assert!(tier.accepts(&record));
        let min = FilterCriteria {
            min_followers: Some(1),
            ..Default::default()
        };
        assert!(!min.accepts(&record));
    }

    #[test]
    fn test_malformed_input_is_no_constraint() {
        let input = FilterInput {
            min_followers: Some("lots".to_string()),
            max_engagement: Some("".to_string()),
            tier: Some("giga".to_string()),
            niche: Some("  ".to_string()),
            min_satisfaction: Some("4".to_string()),
            ..Default::default()
        };
        let criteria = FilterCriteria::from_input(&input);
        assert_eq!(criteria.active_count(), 1);
        assert_eq!(criteria.min_satisfaction, Some(4.0));
    }

    #[test]
    fn test_text_matches_categories() {
        let mut record = creator("Lifestyle", 10, 1.0);
        record.content_categories = vec!["Vegan Recipes".to_string()];
        assert!(matches_text(&record, "vegan"));
        assert!(matches_text(&record, "   "));
        assert!(!matches_text(&record, "crypto"));
    }

    #[test]
    fn test_city_is_substring_country_is_exact() {
        let mut record = creator("Travel", 10, 1.0);
        record.location.city = "San Francisco".to_string();
        record.location.country = "US".to_string();
        let criteria = FilterCriteria {
            city: Some("francisco".to_string()),
            country: Some("us".to_string()),
            ..Default::default()
        };
        assert!(criteria.accepts(&record));
        let partial_country = FilterCriteria {
            country: Some("U".to_string()),
            ..Default::default()
        };
        assert!(!partial_country.accepts(&record));
    }

    #[test]
    fn test_snapshot_decodes_leniently() {
        let json = r#"{"niche": "", "minFollowers": "abc", "maxFollowers": "5000",
                       "tier": "MACRO", "verification": true, "unknownField": 1}"#;
        let criteria: FilterCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.niche, None);
        assert_eq!(criteria.min_followers, None);
        assert_eq!(criteria.max_followers, Some(5000));
        assert_eq!(criteria.tier, Some(Tier::Macro));
        assert_eq!(criteria.verification, Some(Verification::Verified));
    }
}
