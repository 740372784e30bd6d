//! Core domain logic for the EU funding analytics backend.
//! This crate owns storage access, typed records and the funding-breakdown rules.

pub mod breakdown;
pub mod db;
pub mod logging;
pub mod model;
pub mod ranking;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LogDestination, LoggingError};
pub use model::charts::{
    Section3ChartsResponse, Section3Filter, TopAgency, TopCad, TopCountry, TopDepartment,
    TopProgram,
};
pub use model::funding::{
    ActionItem, CadItem, CountryChartsResponse, FundingItem, FundingSource,
    NormalizedCountryResponse, NormalizedPrioritySet, PriorityArea, PriorityBucket,
};
pub use model::year_range::{YearRange, YearRangeParseError};
pub use repo::{RepoError, RepoResult};
pub use service::breakdown_service::BreakdownService;
pub use service::cad_service::CadService;
pub use service::chart_service::ChartService;
pub use service::mip_service::MipService;
pub use service::project_service::ProjectService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
