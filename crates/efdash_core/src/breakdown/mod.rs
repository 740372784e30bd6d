//! Funding-breakdown pipeline behind the normalized section-2 charts.
//!
//! # Responsibility
//! - Aggregate typed source rows into per-area funding items and totals.
//! - Resolve priority-area titles per country.
//! - Normalize each (source, sub-period) slice against its total.
//! - Assemble the per-country response.
//!
//! # Invariants
//! - Everything here is a pure function of its inputs; no I/O.
//! - Engaged slices are reconciled against the project ground truth;
//!   projected slices are their own total.

pub mod aggregate;
pub mod assemble;
pub mod normalizer;
pub mod titles;

pub use aggregate::{
    action_items, engaged_area_items, engaged_totals, projected_area_items, total_for,
    ProjectAmountRow, TaggedProjectRow,
};
pub use assemble::{assemble_response, chart_items, filter_action_items, filter_cad_items};
pub use normalizer::{
    combined_view, normalize_slice, normalize_source, percentage_of, NormalizedSlice,
    SliceBucket, TotalBasis,
};
pub use titles::resolve_titles;
