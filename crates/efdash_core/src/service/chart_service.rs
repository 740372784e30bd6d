//! Chart use-case service: section-3 rankings, global rankings and lookups.
//!
//! # Invariants
//! - Section-3 category filters are trimmed; a blank category means no filter.
//! - A department filter must be positive.

use crate::model::charts::{Section3ChartsResponse, Section3Filter, TopCad, TopDepartment};
use crate::ranking::section3_charts;
use crate::repo::chart_repo::ChartRepository;
use crate::service::{log_failure, logged, require_positive, ServiceError, ServiceResult};
use log::info;

pub struct ChartService<R: ChartRepository> {
    repo: R,
}

impl<R: ChartRepository> ChartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn section3_charts(&self, filter: Section3Filter) -> ServiceResult<Section3ChartsResponse> {
        let result = normalize_filter(filter).and_then(|filter| self.build_section3(&filter));
        if let Err(err) = &result {
            log_failure("section3_charts", err);
        }
        result
    }

    pub fn global_top_cad(&self) -> ServiceResult<Vec<TopCad>> {
        let result = self.repo.global_top_cad().map_err(ServiceError::from);
        logged("global_top_cad", result, Vec::len)
    }

    pub fn global_top_departments(&self) -> ServiceResult<Vec<TopDepartment>> {
        let result = self.repo.global_top_departments().map_err(ServiceError::from);
        logged("global_top_departments", result, Vec::len)
    }

    pub fn distinct_countries(&self) -> ServiceResult<Vec<String>> {
        let result = self.repo.distinct_countries().map_err(ServiceError::from);
        logged("distinct_countries", result, Vec::len)
    }

    pub fn distinct_departments(&self) -> ServiceResult<Vec<String>> {
        let result = self.repo.distinct_departments().map_err(ServiceError::from);
        logged("distinct_departments", result, Vec::len)
    }

    pub fn distinct_cad_categories(&self) -> ServiceResult<Vec<String>> {
        let result = self.repo.distinct_cad_categories().map_err(ServiceError::from);
        logged("distinct_cad_categories", result, Vec::len)
    }

    fn build_section3(&self, filter: &Section3Filter) -> ServiceResult<Section3ChartsResponse> {
        let facts = self.repo.section3_facts(filter)?;
        let mip_rows = self.repo.mip_rows()?;
        let charts = section3_charts(filter, &facts, &mip_rows);
        info!(
            "event=section3_charts module=service status=ok year_range={} facts={} countries={}",
            filter.effective_year_range(),
            facts.len(),
            charts.top_countries.len()
        );
        Ok(charts)
    }
}

fn normalize_filter(filter: Section3Filter) -> ServiceResult<Section3Filter> {
    let category = filter
        .category
        .map(|category| category.trim().to_string())
        .filter(|category| !category.is_empty());
    let department = filter
        .department
        .map(|department| require_positive(department, "department"))
        .transpose()?;
    Ok(Section3Filter {
        year_range: filter.year_range,
        category,
        department,
    })
}

#[cfg(test)]
mod tests {
    use super::normalize_filter;
    use crate::model::charts::Section3Filter;
    use crate::service::ServiceError;

    #[test]
    fn blank_category_is_dropped() {
        let filter = normalize_filter(Section3Filter {
            year_range: None,
            category: Some("  ".to_string()),
            department: Some(4),
        })
        .unwrap();
        assert_eq!(filter.category, None);
        assert_eq!(filter.department, Some(4));
    }

    #[test]
    fn non_positive_department_is_rejected() {
        let err = normalize_filter(Section3Filter {
            department: Some(0),
            ..Section3Filter::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
