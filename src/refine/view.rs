// SearchView — owns the interactive refinement state.
//
// Every setter recomputes the visible ordering before returning, so callers
// can never observe a list that was filtered under one state and sorted
// under another.

use tracing::debug;

use super::facets::FacetSummary;
use super::filter::FilterCriteria;
use super::pipeline::refine_indices;
use super::sort::SortKey;
use crate::creators::CreatorRecord;

#[derive(Debug, Clone, Default)]
pub struct SearchView {
    records: Vec<CreatorRecord>,
    criteria: FilterCriteria,
    free_text: String,
    sort_key: SortKey,
    visible: Vec<usize>,
}

impl SearchView {
    pub fn new(records: Vec<CreatorRecord>) -> Self {
        let mut view = Self {
            records,
            ..Default::default()
        };
        view.recompute();
        view
    }

    /// Replace the raw result set wholesale (new data from the backend).
    pub fn set_records(&mut self, records: Vec<CreatorRecord>) {
        self.records = records;
        self.recompute();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Edit one or more criteria fields in place, then recompute once.
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.criteria);
        self.recompute();
    }

    pub fn clear_criteria(&mut self) {
        self.criteria.clear();
        self.recompute();
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
        self.recompute();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.recompute();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// The refined, ordered records.
    pub fn visible(&self) -> impl Iterator<Item = &CreatorRecord> + '_ {
        self.visible.iter().map(|&i| &self.records[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.records.len()
    }

    pub fn facets(&self) -> FacetSummary {
        FacetSummary::from_records(self.visible())
    }

    fn recompute(&mut self) {
        self.visible = refine_indices(
            &self.records,
            &self.criteria,
            &self.free_text,
            self.sort_key,
        );
        debug!(
            total = self.records.len(),
            visible = self.visible.len(),
            sort = %self.sort_key,
            "Refined creator view"
        );
    }
}
