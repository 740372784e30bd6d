//! Shared server state and the blocking database bridge.
//!
//! # Invariants
//! - Every call opens its own connection on the blocking pool and drops it.
//! - The distinct-countries cache is the only cached data and expires by TTL.

use crate::error::ApiError;
use efdash_core::{open_db, RepoError, ServiceError, ServiceResult};
use moka::sync::Cache;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const COUNTRIES_KEY: &str = "countries";

#[derive(Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
    detailed_errors: bool,
    countries: Option<Cache<&'static str, Arc<Vec<String>>>>,
}

impl AppState {
    /// `countries_ttl` of zero disables the countries cache.
    pub fn new(
        db_path: impl Into<PathBuf>,
        detailed_errors: bool,
        countries_ttl: Duration,
    ) -> Self {
        let countries = (!countries_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(countries_ttl)
                .build()
        });
        Self {
            db_path: Arc::new(db_path.into()),
            detailed_errors,
            countries,
        }
    }

    pub fn detailed_errors(&self) -> bool {
        self.detailed_errors
    }

    /// Runs `work` against a fresh connection on the blocking pool.
    pub async fn with_connection<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        let detailed = self.detailed_errors;

        let outcome = tokio::task::spawn_blocking(move || {
            let conn = open_db(db_path.as_path())
                .map_err(|err| ServiceError::DataSource(RepoError::from(err)))?;
            work(&conn)
        })
        .await
        .map_err(|err| ApiError::internal(format!("database task failed: {err}"), detailed))?;

        outcome.map_err(|err| ApiError::from_service(err, detailed))
    }

    /// Distinct countries, served from the TTL cache when warm.
    pub async fn countries<F>(&self, load: F) -> Result<Arc<Vec<String>>, ApiError>
    where
        F: FnOnce(&Connection) -> ServiceResult<Vec<String>> + Send + 'static,
    {
        if let Some(hit) = self.countries.as_ref().and_then(|cache| cache.get(&COUNTRIES_KEY)) {
            return Ok(hit);
        }

        let countries = Arc::new(self.with_connection(load).await?);
        if let Some(cache) = &self.countries {
            cache.insert(COUNTRIES_KEY, Arc::clone(&countries));
        }
        Ok(countries)
    }
}
