//! MIP use-case service.

use crate::model::mip::{MipData, MipId};
use crate::repo::mip_repo::MipRepository;
use crate::service::{logged, require_positive, require_text, ServiceError, ServiceResult};
use uuid::Uuid;

pub struct MipService<R: MipRepository> {
    repo: R,
}

impl<R: MipRepository> MipService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All MIP rows, newest first.
    pub fn list_mip_data(&self) -> ServiceResult<Vec<MipData>> {
        let result = self.repo.list_mip_data().map_err(ServiceError::from);
        logged("mip_list", result, Vec::len)
    }

    pub fn get_mip_data(&self, id: MipId) -> ServiceResult<MipData> {
        let result = require_positive(id, "mip id").and_then(|id| {
            self.repo
                .get_mip_data(id)?
                .ok_or_else(|| ServiceError::NotFound(format!("mip data {id} not found")))
        });
        logged("mip_get", result, |_| 1)
    }

    pub fn get_mip_data_by_guid(&self, guid: Uuid) -> ServiceResult<MipData> {
        let result = self
            .repo
            .get_mip_data_by_guid(guid)
            .map_err(ServiceError::from)
            .and_then(|mip| {
                mip.ok_or_else(|| ServiceError::NotFound(format!("mip data {guid} not found")))
            });
        logged("mip_get_by_guid", result, |_| 1)
    }

    pub fn list_mip_data_by_country(&self, country: &str) -> ServiceResult<Vec<MipData>> {
        let result = require_text(country, "country")
            .and_then(|country| Ok(self.repo.list_mip_data_by_country(country)?));
        logged("mip_by_country", result, Vec::len)
    }
}
