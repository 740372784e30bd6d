//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input and orchestrate repository reads.
//! - Map storage failures into one error taxonomy for the HTTP layer.
//!
//! # Invariants
//! - Invalid input is rejected before any repository call.
//! - Every repository failure surfaces as `ServiceError::DataSource`.
//! - Every entry point logs exactly one `module=service` event.

use crate::repo::RepoError;
use log::{log, Level};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod breakdown_service;
pub mod cad_service;
pub mod chart_service;
pub mod mip_service;
pub mod project_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error shared by every use-case.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input failed validation.
    Validation(String),
    /// Requested record does not exist.
    NotFound(String),
    /// Funding data source failed.
    DataSource(RepoError),
}

impl ServiceError {
    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::DataSource(_) => "data_source",
        }
    }

    fn log_level(&self) -> Level {
        match self {
            Self::Validation(_) | Self::NotFound(_) => Level::Warn,
            Self::DataSource(_) => Level::Error,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::DataSource(err) => write!(f, "data source error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataSource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::DataSource(value)
    }
}

/// Logs the outcome of one entry point and hands `result` back unchanged.
///
/// `count` sizes a successful result (rows returned, or 1 for a single record).
pub(crate) fn logged<T>(
    event: &str,
    result: ServiceResult<T>,
    count: impl FnOnce(&T) -> usize,
) -> ServiceResult<T> {
    match &result {
        Ok(value) => log!(
            Level::Debug,
            "event={} module=service status=ok count={}",
            event,
            count(value)
        ),
        Err(err) => log_failure(event, err),
    }
    result
}

pub(crate) fn log_failure(event: &str, err: &ServiceError) {
    log!(
        err.log_level(),
        "event={} module=service status=error kind={} error={}",
        event,
        err.kind(),
        err
    );
}

pub(crate) fn require_text<'a>(value: &'a str, field: &str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

pub(crate) fn require_positive(value: i64, field: &str) -> ServiceResult<i64> {
    if value <= 0 {
        return Err(ServiceError::Validation(format!(
            "{field} must be greater than 0, got {value}"
        )));
    }
    Ok(value)
}
