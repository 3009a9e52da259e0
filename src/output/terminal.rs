// Colored terminal output for creator tables, facets and history.

use colored::Colorize;

use super::{format_count, truncate_chars};
use crate::creators::{CreatorRecord, Verification};
use crate::history::{HistoryEntry, QueryType};
use crate::refine::{FacetSummary, FilterCriteria, SearchView, Tier};

/// Display the refined view as a ranked table.
pub fn display_creator_table(view: &SearchView, limit: usize) {
    if view.visible_len() == 0 {
        if view.total_len() == 0 {
            println!("No creators found.");
        } else {
            println!(
                "No creators match the current filters ({} fetched).",
                view.total_len()
            );
        }
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Creators ({} of {}, sorted by {}) ===",
            view.visible_len(),
            view.total_len(),
            view.sort_key()
        )
        .bold()
    );
    println!();

    println!(
        "  {:>4}  {:<28} {:<10} {:>8}  {:<6}  {:>6}  {:>4}  {:<18}",
        "#".dimmed(),
        "Creator".dimmed(),
        "Platform".dimmed(),
        "Follows".dimmed(),
        "Tier".dimmed(),
        "Eng%".dimmed(),
        "Sat".dimmed(),
        "Niche".dimmed(),
    );
    println!("  {}", "-".repeat(96).dimmed());

    for (i, creator) in view.visible().take(limit).enumerate() {
        let tier = creator.tier();
        println!(
            "  {:>4}. {:<28} {:<10} {:>8}  {:<6}  {:>6.2}  {:>4.1}  {:<18}{}",
            i + 1,
            truncate_chars(&display_name(creator), 25),
            truncate_chars(&creator.primary_platform, 10),
            format_count(creator.followers()),
            colorize_tier(tier),
            creator.engagement_rate(),
            creator.satisfaction_score,
            truncate_chars(&creator.niche, 15),
            verified_mark(creator.verification),
        );
    }

    if view.visible_len() > limit {
        println!(
            "\n  {}",
            format!("... {} more (raise --limit to see them)", view.visible_len() - limit)
                .dimmed()
        );
    }
    println!();
}

/// Display per-facet counts for the visible creators.
pub fn display_facets(summary: &FacetSummary) {
    let tiers: Vec<String> = summary
        .tiers
        .iter()
        .map(|(tier, n)| format!("{} {}", colorize_tier(*tier), n))
        .collect();
    println!("  Tiers:     {}", tiers.join("  "));

    if !summary.niches.is_empty() {
        let niches: Vec<String> = summary
            .niches
            .iter()
            .take(5)
            .map(|(niche, n)| format!("{niche} ({n})"))
            .collect();
        println!("  Niches:    {}", niches.join(", "));
    }
    if !summary.platforms.is_empty() {
        let platforms: Vec<String> = summary
            .platforms
            .iter()
            .map(|(platform, n)| format!("{platform} ({n})"))
            .collect();
        println!("  Platforms: {}", platforms.join(", "));
    }
}

/// One-line description of the active filters, or None when there are none.
pub fn describe_criteria(criteria: &FilterCriteria) -> Option<String> {
    if criteria.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(niche) = &criteria.niche {
        parts.push(format!("niche={niche}"));
    }
    if let Some(tier) = criteria.tier {
        parts.push(format!("tier={tier}"));
    }
    if let Some(platform) = &criteria.platform {
        parts.push(format!("platform={platform}"));
    }
    if let Some(n) = criteria.min_followers {
        parts.push(format!("followers>={}", format_count(n)));
    }
    if let Some(n) = criteria.max_followers {
        parts.push(format!("followers<={}", format_count(n)));
    }
    if let Some(e) = criteria.min_engagement {
        parts.push(format!("engagement>={e}"));
    }
    if let Some(e) = criteria.max_engagement {
        parts.push(format!("engagement<={e}"));
    }
    if let Some(country) = &criteria.country {
        parts.push(format!("country={country}"));
    }
    if let Some(city) = &criteria.city {
        parts.push(format!("city~{city}"));
    }
    if let Some(v) = criteria.verification {
        parts.push(v.to_string());
    }
    if let Some(n) = criteria.min_collaborations {
        parts.push(format!("collaborations>={n}"));
    }
    if let Some(s) = criteria.min_satisfaction {
        parts.push(format!("satisfaction>={s}"));
    }
    Some(parts.join(", "))
}

/// Display the search history, newest first.
pub fn display_history(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        println!("No searches yet. Run `scout search <query>` to start.");
        return;
    }

    println!("\n{}", format!("=== Recent Searches ({}) ===", entries.len()).bold());
    println!();
    for (i, entry) in entries.iter().enumerate() {
        let kind = match entry.query_type {
            QueryType::AiSemantic => "ai".magenta(),
            QueryType::FreeText => "text".cyan(),
        };
        let when = chrono::DateTime::from_timestamp_millis(entry.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {:>2}. [{:<4}] {:<36} {}",
            i + 1,
            kind,
            truncate_chars(&entry.query, 33),
            when.dimmed()
        );
        if let Some(filters) = describe_criteria(&entry.filters) {
            println!("        {}", filters.dimmed());
        }
    }
    println!();
}

fn display_name(creator: &CreatorRecord) -> String {
    if creator.display_name.is_empty() {
        creator.id.clone()
    } else {
        creator.display_name.clone()
    }
}

fn verified_mark(v: Verification) -> colored::ColoredString {
    match v {
        Verification::Verified => " ✓".green(),
        Verification::Unverified => "".normal(),
    }
}

/// Colorize a tier label.
fn colorize_tier(tier: Tier) -> colored::ColoredString {
    match tier {
        Tier::Mega => tier.as_str().magenta().bold(),
        Tier::Macro => tier.as_str().blue(),
        Tier::Micro => tier.as_str().cyan(),
        Tier::Nano => tier.as_str().dimmed(),
    }
}
