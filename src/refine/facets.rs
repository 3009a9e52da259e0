// Facet counts over a refined result set.

use std::collections::BTreeMap;

use super::tier::Tier;
use crate::creators::CreatorRecord;

/// Counts per facet value for one result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetSummary {
    /// One entry per tier, smallest first, including empty tiers.
    pub tiers: Vec<(Tier, usize)>,
    /// Niche label to count, most common first. Blank niches are skipped.
    pub niches: Vec<(String, usize)>,
    /// Primary platform to count, most common first.
    pub platforms: Vec<(String, usize)>,
}

impl FacetSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CreatorRecord>,
    {
        let mut tiers: BTreeMap<Tier, usize> = Tier::ALL.iter().map(|t| (*t, 0)).collect();
        let mut niches: BTreeMap<String, usize> = BTreeMap::new();
        let mut platforms: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            *tiers.entry(record.tier()).or_default() += 1;
            if !record.niche.is_empty() {
                *niches.entry(record.niche.clone()).or_default() += 1;
            }
            if !record.primary_platform.is_empty() {
                *platforms.entry(record.primary_platform.clone()).or_default() += 1;
            }
        }

        Self {
            tiers: tiers.into_iter().collect(),
            niches: ranked(niches),
            platforms: ranked(platforms),
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tiers
            .iter()
            .find(|(t, _)| *t == tier)
            .map_or(0, |(_, n)| *n)
    }
}

/// Most common first; ties broken alphabetically (BTreeMap order + stable sort).
fn ranked(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creators::PlatformMetrics;

    fn creator(niche: &str, platform: &str, followers: u64) -> CreatorRecord {
        let mut record = CreatorRecord {
            niche: niche.to_string(),
            primary_platform: platform.to_string(),
            ..Default::default()
        };
        record.platforms.insert(
            platform.to_string(),
            PlatformMetrics {
                followers,
                ..Default::default()
            },
        );
        record
    }

    #[test]
    fn test_counts_by_facet() {
        let records = vec![
            creator("Gaming", "twitch", 500),
            creator("Beauty", "instagram", 50_000),
            creator("Gaming", "youtube", 2_000_000),
            creator("", "instagram", 20_000),
        ];
        let summary = FacetSummary::from_records(&records);
        assert_eq!(summary.tier_count(Tier::Nano), 1);
        assert_eq!(summary.tier_count(Tier::Micro), 2);
        assert_eq!(summary.tier_count(Tier::Macro), 0);
        assert_eq!(summary.tier_count(Tier::Mega), 1);
        assert_eq!(summary.niches[0], ("Gaming".to_string(), 2));
        assert_eq!(summary.niches.len(), 2);
        assert_eq!(summary.platforms[0], ("instagram".to_string(), 2));
    }
}
