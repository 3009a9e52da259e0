// Unit tests for the refinement pipeline.
//
// Covers the filter/sort properties (subset, identity, AND composition,
// stability), tier boundaries, and the end-to-end refinement scenarios.

use chrono::{TimeZone, Utc};
use scout::creators::{CreatorRecord, PlatformMetrics, Verification};
use scout::refine::{refine, FilterCriteria, SortKey, Tier};

// ============================================================
// Fixtures
// ============================================================

fn creator(id: &str, followers: u64) -> CreatorRecord {
    let mut record = CreatorRecord {
        id: id.to_string(),
        display_name: format!("Creator {id}"),
        primary_platform: "instagram".to_string(),
        ..Default::default()
    };
    record.platforms.insert(
        "instagram".to_string(),
        PlatformMetrics {
            followers,
            ..Default::default()
        },
    );
    record
}

/// A mixed set with deliberate ties on every sort key.
fn mixed_set() -> Vec<CreatorRecord> {
    let mut records = Vec::new();
    for (i, (followers, engagement, satisfaction, niche)) in [
        (5_000, 4.0, 4.5, "Gaming"),
        (50_000, 2.0, 4.5, "Fitness & Health"),
        (5_000, 4.0, 3.0, "Gaming"),
        (2_000_000, 1.5, 5.0, "Beauty"),
        (150_000, 2.0, 0.0, "Fitness & Health"),
        (50_000, 6.1, 3.0, "Food"),
    ]
    .into_iter()
    .enumerate()
    {
        let mut record = creator(&format!("c{i}"), followers);
        if let Some(m) = record.platforms.get_mut("instagram") {
            m.engagement_rate = engagement;
        }
        record.satisfaction_score = satisfaction;
        record.niche = niche.to_string();
        record.total_collaborations = i as u64 * 3;
        record.verification = if i % 2 == 0 {
            Verification::Verified
        } else {
            Verification::Unverified
        };
        record.location.country = if i < 3 { "US" } else { "UK" }.to_string();
        // Pairs share a timestamp; c5 has none.
        if i < 5 {
            record.last_active = Utc
                .timestamp_millis_opt(1_700_000_000_000 + (i as i64 / 2) * 86_400_000)
                .single();
        }
        record.relevance_score = match i {
            0 | 3 => Some(0.7),
            1 => Some(0.9),
            _ => None,
        };
        records.push(record);
    }
    records
}

fn ids(records: &[&CreatorRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

fn sample_criteria() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria {
            niche: Some("gaming".to_string()),
            ..Default::default()
        },
        FilterCriteria {
            tier: Some(Tier::Micro),
            ..Default::default()
        },
        FilterCriteria {
            min_followers: Some(10_000),
            max_engagement: Some(3.0),
            ..Default::default()
        },
        FilterCriteria {
            country: Some("UK".to_string()),
            verification: Some(Verification::Verified),
            ..Default::default()
        },
        FilterCriteria {
            min_collaborations: Some(6),
            min_satisfaction: Some(3.0),
            ..Default::default()
        },
    ]
}

// ============================================================
// Properties
// ============================================================

#[test]
fn refine_result_is_subset_without_duplicates() {
    let records = mixed_set();
    for criteria in sample_criteria() {
        for key in SortKey::ALL {
            let out = refine(&records, &criteria, "", key);
            let mut seen = std::collections::HashSet::new();
            for r in &out {
                assert!(records.iter().any(|orig| orig == *r));
                assert!(seen.insert(r.id.clone()), "duplicate {} under {key}", r.id);
            }
        }
    }
}

#[test]
fn empty_criteria_returns_everything() {
    let records = mixed_set();
    for key in SortKey::ALL {
        let out = refine(&records, &FilterCriteria::default(), "", key);
        assert_eq!(out.len(), records.len(), "identity filter under {key}");
    }
}

#[test]
fn adding_constraints_never_grows_results() {
    let records = mixed_set();
    let base = FilterCriteria {
        min_followers: Some(1_000),
        ..Default::default()
    };
    let narrower = FilterCriteria {
        niche: Some("Fitness & Health".to_string()),
        ..base.clone()
    };
    let narrowest = FilterCriteria {
        min_engagement: Some(2.0),
        country: Some("uk".to_string()),
        ..narrower.clone()
    };

    let a = refine(&records, &base, "", SortKey::Relevance);
    let b = refine(&records, &narrower, "", SortKey::Relevance);
    let c = refine(&records, &narrowest, "", SortKey::Relevance);
    assert!(b.len() <= a.len());
    assert!(c.len() <= b.len());
    assert!(b.iter().all(|r| a.contains(r)));
    assert!(c.iter().all(|r| b.contains(r)));
    assert_eq!(ids(&c), vec!["c4"]);
}

#[test]
fn refine_does_not_mutate_input() {
    let records = mixed_set();
    let before = records.clone();
    let _ = refine(&records, &sample_criteria()[2], "food", SortKey::FollowersAsc);
    assert_eq!(records, before);
}

#[test]
fn equal_keys_keep_input_order_for_every_comparator() {
    let records = mixed_set();
    let empty = FilterCriteria::default();

    let expectations = [
        (SortKey::Relevance, vec!["c1", "c0", "c3", "c2", "c4", "c5"]),
        (SortKey::FollowersDesc, vec!["c3", "c4", "c1", "c5", "c0", "c2"]),
        (SortKey::FollowersAsc, vec!["c0", "c2", "c1", "c5", "c4", "c3"]),
        (SortKey::EngagementDesc, vec!["c5", "c0", "c2", "c1", "c4", "c3"]),
        (SortKey::SatisfactionDesc, vec!["c3", "c0", "c1", "c2", "c5", "c4"]),
        (SortKey::RecentActivity, vec!["c4", "c2", "c3", "c0", "c1", "c5"]),
    ];
    for (key, expected) in expectations {
        assert_eq!(ids(&refine(&records, &empty, "", key)), expected, "order under {key}");
    }
}

#[test]
fn reversed_input_reverses_tie_order() {
    let mut records = mixed_set();
    records.reverse();
    let out = refine(&records, &FilterCriteria::default(), "", SortKey::FollowersAsc);
    // c0 and c2 tie at 5,000; c1 and c5 tie at 50,000.
    assert_eq!(ids(&out), vec!["c2", "c0", "c5", "c1", "c4", "c3"]);
}

// ============================================================
// Tier boundaries
// ============================================================

#[test]
fn tier_boundaries_are_exact() {
    let cases = [
        (9_999, Tier::Nano),
        (10_000, Tier::Micro),
        (99_999, Tier::Micro),
        (100_000, Tier::Macro),
        (999_999, Tier::Macro),
        (1_000_000, Tier::Mega),
    ];
    for (followers, expected) in cases {
        assert_eq!(Tier::from_followers(followers), expected, "{followers}");
        assert_eq!(Tier::classify(followers as f64), expected, "{followers} as f64");
    }
}

#[test]
fn tier_classify_is_total() {
    assert_eq!(Tier::classify(-1.0), Tier::Nano);
    assert_eq!(Tier::classify(f64::NEG_INFINITY), Tier::Nano);
    assert_eq!(Tier::classify(f64::NAN), Tier::Nano);
    assert_eq!(Tier::classify(1e300), Tier::Mega);
}

// ============================================================
// End-to-end scenarios
// ============================================================

fn three_creators() -> Vec<CreatorRecord> {
    vec![
        creator("small", 5_000),
        creator("mid", 50_000),
        creator("big", 2_000_000),
    ]
}

#[test]
fn scenario_followers_desc() {
    let records = three_creators();
    let out = refine(&records, &FilterCriteria::default(), "", SortKey::FollowersDesc);
    let followers: Vec<u64> = out.iter().map(|r| r.followers()).collect();
    assert_eq!(followers, vec![2_000_000, 50_000, 5_000]);
}

#[test]
fn scenario_tier_filter() {
    let records = three_creators();
    let criteria = FilterCriteria {
        tier: Some(Tier::Micro),
        ..Default::default()
    };
    let out = refine(&records, &criteria, "", SortKey::Relevance);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].followers(), 50_000);
}

#[test]
fn scenario_free_text_case_insensitive() {
    let mut fitness = creator("fit", 1_000);
    fitness.niche = "Fitness & Health".to_string();
    fitness.bio = "Daily workouts".to_string();
    let mut gaming = creator("game", 1_000);
    gaming.niche = "Gaming".to_string();
    gaming.bio = "Speedruns and streams".to_string();
    gaming.content_categories = vec!["esports".to_string()];
    let records = vec![fitness, gaming];

    let out = refine(&records, &FilterCriteria::default(), "fitness", SortKey::Relevance);
    assert_eq!(ids(&out), vec!["fit"]);
}

#[test]
fn scenario_missing_relevance_sorts_below_positive() {
    let mut unscored = creator("unscored", 1);
    unscored.relevance_score = None;
    let mut scored = creator("scored", 1);
    scored.relevance_score = Some(0.01);
    let records = vec![unscored, scored];

    let out = refine(&records, &FilterCriteria::default(), "", SortKey::Relevance);
    assert_eq!(ids(&out), vec!["scored", "unscored"]);
}

#[test]
fn missing_primary_metrics_sort_as_zero() {
    let mut orphan = creator("orphan", 0);
    orphan.primary_platform = "youtube".to_string();
    orphan.platforms.clear();
    let records = vec![orphan, creator("tiny", 1)];

    let asc = refine(&records, &FilterCriteria::default(), "", SortKey::FollowersAsc);
    assert_eq!(ids(&asc), vec!["orphan", "tiny"]);
    let eng = refine(&records, &FilterCriteria::default(), "", SortKey::EngagementDesc);
    assert_eq!(ids(&eng), vec!["orphan", "tiny"]);
}

#[test]
fn negative_zero_relevance_keeps_input_order() {
    let mut neg = creator("neg0", 1);
    neg.relevance_score = Some(-0.0);
    let mut none = creator("none", 1);
    none.relevance_score = None;
    let records = vec![neg, none];

    let out = refine(&records, &FilterCriteria::default(), "", SortKey::Relevance);
    assert_eq!(ids(&out), vec!["neg0", "none"]);
}
