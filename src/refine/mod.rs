// Faceted result refinement — filter, search and sort over fetched creators.
//
// Everything here is synchronous and side-effect free apart from debug
// logging. Callers hand in records they already own.

pub mod facets;
pub mod filter;
pub mod pipeline;
pub mod sort;
pub mod tier;
pub mod view;

pub use facets::FacetSummary;
pub use filter::{matches, FilterCriteria, FilterInput};
pub use pipeline::{refine, refine_indices};
pub use sort::{comparator_for, SortKey};
pub use tier::Tier;
pub use view::SearchView;
