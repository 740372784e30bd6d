//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define read contracts per dataset (projects, CAD, MIP, charts, funding).
//! - Keep SQL text and untyped column access inside this module.
//!
//! # Invariants
//! - Every row is converted into a typed record before it is returned.
//! - Repositories only read; the funding data source is owned elsewhere.
//! - Missing rows are `Ok(None)`; callers decide whether that is an error.

use crate::db::DbError;
use crate::model::amount::amount_from_sql;
use rusqlite::types::ValueRef;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod cad_repo;
pub mod chart_repo;
pub mod funding_repo;
pub mod mip_repo;
pub mod project_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for read queries and row decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn read_guid(row: &Row<'_>, column: &str, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(text.trim()).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

/// Lenient amount read: malformed values become `None` instead of an error.
pub(crate) fn read_amount(row: &Row<'_>, column: &str) -> RepoResult<Option<Decimal>> {
    Ok(amount_from_sql(row.get_ref(column)?))
}

/// Lenient year read: non-integer or out-of-range values become `None`.
pub(crate) fn read_year(row: &Row<'_>, column: &str) -> RepoResult<Option<i32>> {
    Ok(match row.get_ref(column)? {
        ValueRef::Integer(value) => i32::try_from(value).ok(),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.trim().parse().ok()),
        _ => None,
    })
}

pub(crate) fn read_count(row: &Row<'_>, column: &str) -> RepoResult<u32> {
    let value: i64 = row.get(column)?;
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("count `{value}` out of range in {column}")))
}
