//! CAD use-case service.

use crate::model::cad::{CadData, CadId};
use crate::repo::cad_repo::CadRepository;
use crate::service::{logged, require_positive, require_text, ServiceError, ServiceResult};
use uuid::Uuid;

/// CAD read service over a repository implementation.
pub struct CadService<R: CadRepository> {
    repo: R,
}

impl<R: CadRepository> CadService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All CAD rows, newest first.
    pub fn list_cad_data(&self) -> ServiceResult<Vec<CadData>> {
        let result = self.repo.list_cad_data().map_err(ServiceError::from);
        logged("cad_list", result, Vec::len)
    }

    pub fn get_cad_data(&self, id: CadId) -> ServiceResult<CadData> {
        let result = require_positive(id, "cad id").and_then(|id| {
            self.repo
                .get_cad_data(id)?
                .ok_or_else(|| ServiceError::NotFound(format!("cad data {id} not found")))
        });
        logged("cad_get", result, |_| 1)
    }

    pub fn get_cad_data_by_guid(&self, guid: Uuid) -> ServiceResult<CadData> {
        let result = self
            .repo
            .get_cad_data_by_guid(guid)
            .map_err(ServiceError::from)
            .and_then(|cad| {
                cad.ok_or_else(|| ServiceError::NotFound(format!("cad data {guid} not found")))
            });
        logged("cad_get_by_guid", result, |_| 1)
    }

    pub fn list_cad_data_by_category(&self, category: &str) -> ServiceResult<Vec<CadData>> {
        let result = require_text(category, "category")
            .and_then(|category| Ok(self.repo.list_cad_data_by_category(category)?));
        logged("cad_by_category", result, Vec::len)
    }

    pub fn list_cad_data_by_department(&self, department: i64) -> ServiceResult<Vec<CadData>> {
        let result = require_positive(department, "department")
            .and_then(|department| Ok(self.repo.list_cad_data_by_department(department)?));
        logged("cad_by_department", result, Vec::len)
    }
}
