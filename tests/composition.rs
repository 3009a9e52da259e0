// Composition tests — verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   backend JSON -> CreatorRecord -> SearchView -> history / search log
// without any network calls (the database is in-memory).

use scout::api::creators::CreatorListResponse;
use scout::history::{HistoryStore, QueryType};
use scout::output::terminal::describe_criteria;
use scout::refine::{FilterCriteria, FilterInput, SearchView, SortKey, Tier};

const SEARCH_RESPONSE: &str = r#"{
    "results": [
        {
            "_id": "1",
            "name": "Lena Lifts",
            "bio": "Strength coach, fitness tips every day",
            "niche": "Fitness & Health",
            "contentCategories": ["strength", "nutrition"],
            "primaryPlatform": "instagram",
            "platforms": {"instagram": {"followers": 85000, "engagementRate": 5.2}},
            "location": {"city": "Berlin", "country": "DE"},
            "verification": "verified",
            "satisfactionScore": 4.8,
            "totalCollaborations": 21,
            "lastActive": "2024-06-01T10:00:00Z",
            "relevanceScore": 0.93
        },
        {
            "_id": "2",
            "name": "Pixel Pete",
            "bio": "Retro games and speedruns",
            "niche": "Gaming",
            "primaryPlatform": "twitch",
            "platforms": {"twitch": {"followers": "1200000", "engagementRate": "1.1"}},
            "location": {"city": "Toronto", "country": "CA"},
            "verification": "unverified",
            "satisfactionScore": 3.9,
            "totalCollaborations": 4,
            "relevanceScore": 0.41
        },
        {
            "_id": "3",
            "name": "Yoga with Mia",
            "bio": "Gentle flows",
            "niche": "Wellness",
            "contentCategories": ["Fitness", "mindfulness"],
            "primaryPlatform": "youtube",
            "platforms": {"instagram": {"followers": 40000}},
            "location": {"city": "Berlin-Mitte", "country": "de"},
            "satisfactionScore": null,
            "lastActive": 1717236000000
        },
        "not a creator"
    ],
    "total": 3
}"#;

fn fetched() -> Vec<scout::creators::CreatorRecord> {
    let resp: CreatorListResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();
    assert_eq!(resp.total, Some(3));
    resp.creators
}

fn visible_ids(view: &SearchView) -> Vec<String> {
    view.visible().map(|r| r.id.clone()).collect()
}

// ============================================================
// Chain: backend JSON -> SearchView
// ============================================================

#[test]
fn fetched_results_refine_by_relevance_by_default() {
    let view = SearchView::new(fetched());
    assert_eq!(view.total_len(), 3);
    assert_eq!(view.sort_key(), SortKey::Relevance);
    assert_eq!(visible_ids(&view), vec!["1", "2", "3"]);
}

#[test]
fn free_text_reaches_categories() {
    let mut view = SearchView::new(fetched());
    view.set_free_text("FITNESS");
    // Lena via bio and niche, Mia via a content category.
    assert_eq!(visible_ids(&view), vec!["1", "3"]);
}

#[test]
fn primary_platform_without_metrics_is_nano() {
    let records = fetched();
    let mia = records.iter().find(|r| r.id == "3").unwrap();
    assert_eq!(mia.followers(), 0);
    assert_eq!(mia.tier(), Tier::Nano);
    assert_eq!(mia.satisfaction_score, 0.0);
}

#[test]
fn form_input_to_refined_view() {
    let mut view = SearchView::new(fetched());
    view.set_criteria(FilterCriteria::from_input(&FilterInput {
        city: Some("berlin".to_string()),
        country: Some("DE".to_string()),
        min_followers: Some("not a number".to_string()),
        ..Default::default()
    }));
    view.set_sort_key(SortKey::RecentActivity);
    // Both were last active at 2024-06-01T10:00Z, so input order decides.
    assert_eq!(visible_ids(&view), vec!["1", "3"]);

    view.update_criteria(|c| c.verification = Some(scout::creators::Verification::Verified));
    assert_eq!(visible_ids(&view), vec!["1"]);

    view.clear_criteria();
    assert_eq!(view.visible_len(), 3);
}

#[test]
fn facets_follow_the_visible_set() {
    let mut view = SearchView::new(fetched());
    view.set_criteria(FilterCriteria {
        max_followers: Some(100_000),
        ..Default::default()
    });
    let facets = view.facets();
    assert_eq!(facets.tier_count(Tier::Micro), 1);
    assert_eq!(facets.tier_count(Tier::Nano), 1);
    assert_eq!(facets.tier_count(Tier::Mega), 0);
}

// ============================================================
// Chain: search -> history -> restore
// ============================================================

#[tokio::test]
async fn committed_search_restores_from_history() {
    let db = scout::db::open_in_memory().unwrap();
    let store = HistoryStore::new(db.clone(), 10);

    let mut view = SearchView::new(fetched());
    view.set_criteria(FilterCriteria {
        tier: Some(Tier::Micro),
        ..Default::default()
    });
    store
        .record("fitness coaches", QueryType::AiSemantic, view.criteria())
        .await
        .unwrap();
    db.insert_search_log(
        "fitness coaches",
        QueryType::AiSemantic.as_str(),
        view.total_len() as u32,
        view.visible_len() as u32,
    )
    .await
    .unwrap();

    // Later: pick the suggestion and re-apply its filters to fresh data.
    let history = store.load().await;
    let suggestion = history.suggestions("coach", 5)[0].clone();
    assert_eq!(suggestion.query_type, QueryType::AiSemantic);
    assert_eq!(
        describe_criteria(&suggestion.filters).as_deref(),
        Some("tier=micro")
    );

    let mut restored = SearchView::new(fetched());
    restored.set_criteria(suggestion.filters);
    assert_eq!(visible_ids(&restored), vec!["1"]);

    let log = db.get_recent_searches(1).await.unwrap();
    assert_eq!(log[0].result_count, 3);
    assert_eq!(log[0].visible_count, 1);
}
