//! Section-2 charts: normalized for one country, raw for all of them.
//!
//! # Responsibility
//! - Fetch the raw engaged and projected rows of a country.
//! - Run totals, titles and normalization, then assemble one response.
//!
//! # Invariants
//! - A country with no data yields all-zero buckets, never `NotFound`.
//! - Any failing read aborts the whole response as `DataSource`.

use crate::breakdown::{
    action_items, assemble_response, chart_items, engaged_area_items, engaged_totals,
    normalize_source, projected_area_items, resolve_titles,
};
use crate::model::funding::{CountryChartsResponse, FundingSource, NormalizedCountryResponse};
use crate::model::year_range::YearRange;
use crate::repo::funding_repo::FundingRepository;
use crate::repo::RepoResult;
use crate::service::{log_failure, require_text, ServiceError, ServiceResult};
use log::info;

pub struct BreakdownService<R: FundingRepository> {
    repo: R,
}

impl<R: FundingRepository> BreakdownService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds the normalized section-2 payload of `country`.
    ///
    /// `year_range` only filters the CAD and action lists; both normalized
    /// sets always carry the two sub-periods.
    pub fn normalized_country(
        &self,
        country: &str,
        year_range: Option<YearRange>,
    ) -> ServiceResult<NormalizedCountryResponse> {
        let result = require_text(country, "country")
            .and_then(|country| Ok(self.build(country, year_range)?));

        match result {
            Ok(response) => {
                info!(
                    "event=section2_normalized module=service status=ok \
                     cad_items={} action_items={}",
                    response.cad_data_chart2.len(),
                    response.action_data_chart3.len()
                );
                Ok(response)
            }
            Err(err) => {
                log_failure("section2_normalized", &err);
                Err(err)
            }
        }
    }

    /// Raw titled chart lists of every country with funding data.
    ///
    /// Engaged items cover tagged areas only; CAD and action lists are not
    /// filtered by year range.
    pub fn all_countries(&self) -> ServiceResult<CountryChartsResponse> {
        match self.build_all() {
            Ok(response) => {
                info!(
                    "event=section2_charts module=service status=ok \
                     engage_items={} projected_items={}",
                    response.engage.len(),
                    response.projected.len()
                );
                Ok(response)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                log_failure("section2_charts", &err);
                Err(err)
            }
        }
    }

    fn build_all(&self) -> RepoResult<CountryChartsResponse> {
        let mut response = CountryChartsResponse::default();

        for country in self.repo.funding_countries()? {
            let totals = engaged_totals(&country, &self.repo.project_amounts(&country)?);
            let engaged_items =
                engaged_area_items(&country, &self.repo.tagged_project_amounts(&country)?);
            let mip_rows = self.repo.country_mip_rows(&country)?;
            let titles = resolve_titles(&country, &mip_rows);

            response.engage.extend(chart_items(
                FundingSource::Engaged,
                engaged_items,
                &totals,
                &titles,
            ));
            response.projected.extend(chart_items(
                FundingSource::Projected,
                projected_area_items(&country, &mip_rows),
                &[],
                &titles,
            ));
            response.cad_data_chart2.extend(self.repo.country_cad_items(&country)?);
            response
                .action_data_chart3
                .extend(action_items(&country, &self.repo.country_projects(&country)?));
        }

        Ok(response)
    }

    fn build(
        &self,
        country: &str,
        year_range: Option<YearRange>,
    ) -> RepoResult<NormalizedCountryResponse> {
        let totals = engaged_totals(country, &self.repo.project_amounts(country)?);
        let engaged_items =
            engaged_area_items(country, &self.repo.tagged_project_amounts(country)?);

        let mip_rows = self.repo.country_mip_rows(country)?;
        let titles = resolve_titles(country, &mip_rows);
        let projected_items = projected_area_items(country, &mip_rows);

        let engage = normalize_source(FundingSource::Engaged, &engaged_items, &totals, &titles);
        let projected = normalize_source(FundingSource::Projected, &projected_items, &[], &titles);

        let cad_items = self.repo.country_cad_items(country)?;
        let actions = action_items(country, &self.repo.country_projects(country)?);

        Ok(assemble_response(
            country, engage, projected, cad_items, actions, year_range,
        ))
    }
}
