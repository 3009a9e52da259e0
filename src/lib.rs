// Scout: creator discovery and search refinement.
//
// This is the library root. Each module corresponds to one layer of the
// discovery flow: fetch from the backend, refine locally, remember searches.

pub mod api;
pub mod config;
pub mod creators;
pub mod db;
pub mod history;
pub mod output;
pub mod refine;
pub mod session;
pub mod status;
