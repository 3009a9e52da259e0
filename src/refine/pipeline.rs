// Refinement pipeline: filter, then stable sort.

use super::filter::{matches, FilterCriteria};
use super::sort::{comparator_for, SortKey};
use crate::creators::CreatorRecord;

/// Positions in `records` that survive `criteria` and `free_text`, ordered
/// by `sort_key`.
///
/// Each index appears at most once, so the result is always a permutation of
/// a subset of the input.
pub fn refine_indices(
    records: &[CreatorRecord],
    criteria: &FilterCriteria,
    free_text: &str,
    sort_key: SortKey,
) -> Vec<usize> {
    let mut kept: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, criteria, free_text))
        .map(|(i, _)| i)
        .collect();

    let compare = comparator_for(sort_key);
    // `sort_by` is stable: equal keys keep their input order.
    kept.sort_by(|&a, &b| compare(&records[a], &records[b]));
    kept
}

/// Filter and order `records` without touching the input slice.
pub fn refine<'a>(
    records: &'a [CreatorRecord],
    criteria: &FilterCriteria,
    free_text: &str,
    sort_key: SortKey,
) -> Vec<&'a CreatorRecord> {
    refine_indices(records, criteria, free_text, sort_key)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
