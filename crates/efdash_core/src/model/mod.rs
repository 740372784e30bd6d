//! Typed records for the funding data source and the chart responses.
//!
//! # Responsibility
//! - Define one strongly typed record per dataset (projects, CAD, MIP).
//! - Define the breakdown shapes produced by the normalizer.
//!
//! # Invariants
//! - Untyped SQL values never leave the repository layer; rows are converted
//!   into these records right after the read.

pub mod amount;
pub mod cad;
pub mod charts;
pub mod funding;
pub mod mip;
pub mod project;
pub mod year_range;
