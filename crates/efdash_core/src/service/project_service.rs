//! Project use-case service.
//!
//! # Invariants
//! - Ids must be positive; countries non-blank; years positive.
//! - A missing project is `ServiceError::NotFound`.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::service::{logged, require_positive, require_text, ServiceError, ServiceResult};
use uuid::Uuid;

/// Project read service over a repository implementation.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        let result = self.repo.list_projects().map_err(ServiceError::from);
        logged("projects_list", result, Vec::len)
    }

    pub fn get_project(&self, id: ProjectId) -> ServiceResult<Project> {
        let result = require_positive(id, "project id").and_then(|id| {
            self.repo
                .get_project(id)?
                .ok_or_else(|| ServiceError::NotFound(format!("project {id} not found")))
        });
        logged("project_get", result, |_| 1)
    }

    pub fn get_project_by_guid(&self, guid: Uuid) -> ServiceResult<Project> {
        let result = self
            .repo
            .get_project_by_guid(guid)
            .map_err(ServiceError::from)
            .and_then(|project| {
                project.ok_or_else(|| ServiceError::NotFound(format!("project {guid} not found")))
            });
        logged("project_get_by_guid", result, |_| 1)
    }

    /// Projects of one country, matched case-insensitively.
    pub fn list_projects_by_country(&self, country: &str) -> ServiceResult<Vec<Project>> {
        let result = require_text(country, "country")
            .and_then(|country| Ok(self.repo.list_projects_by_country(country)?));
        logged("projects_by_country", result, Vec::len)
    }

    pub fn list_projects_by_year(&self, year: i32) -> ServiceResult<Vec<Project>> {
        let result = require_positive(i64::from(year), "year")
            .and_then(|_| Ok(self.repo.list_projects_by_year(year)?));
        logged("projects_by_year", result, Vec::len)
    }
}
