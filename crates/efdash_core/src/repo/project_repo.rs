//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide entity reads over `PROJECTS`.
//!
//! # Invariants
//! - Country filters are case-insensitive.
//! - List order is deterministic (`ID ASC`).

use crate::model::project::{Project, ProjectId};
use crate::repo::{read_amount, read_guid, read_year, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const PROJECT_SELECT_SQL: &str = "SELECT
    ID,
    PROJECTGUID,
    COUNTRY,
    YEAR,
    ACTION_TITLE,
    ANNUAL_ACTION_TITLE,
    FILENAME,
    COLUMN_1_3_1_TOTAL_AMOUNT,
    GLOBAL_INDIRECT_MANAGEMENT_AMOUNT,
    CREATED_DATE,
    CREATED_BY,
    UPDATED_DATE,
    UPDATED_BY
FROM PROJECTS";

/// Repository interface for project reads.
pub trait ProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn get_project_by_guid(&self, guid: Uuid) -> RepoResult<Option<Project>>;
    fn list_projects_by_country(&self, country: &str) -> RepoResult<Vec<Project>>;
    fn list_projects_by_year(&self, year: i32) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        query_projects(self.conn, &format!("{PROJECT_SELECT_SQL} ORDER BY ID ASC;"), [])
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut projects = query_projects(
            self.conn,
            &format!("{PROJECT_SELECT_SQL} WHERE ID = ?1;"),
            params![id],
        )?;
        Ok(projects.pop())
    }

    fn get_project_by_guid(&self, guid: Uuid) -> RepoResult<Option<Project>> {
        let mut projects = query_projects(
            self.conn,
            &format!("{PROJECT_SELECT_SQL} WHERE PROJECTGUID = ?1 COLLATE NOCASE;"),
            params![guid.to_string()],
        )?;
        Ok(projects.pop())
    }

    fn list_projects_by_country(&self, country: &str) -> RepoResult<Vec<Project>> {
        query_projects(
            self.conn,
            &format!(
                "{PROJECT_SELECT_SQL}
                 WHERE TRIM(COUNTRY) = ?1 COLLATE NOCASE
                 ORDER BY ID ASC;"
            ),
            params![country.trim()],
        )
    }

    fn list_projects_by_year(&self, year: i32) -> RepoResult<Vec<Project>> {
        query_projects(
            self.conn,
            &format!("{PROJECT_SELECT_SQL} WHERE YEAR = ?1 ORDER BY ID ASC;"),
            params![year],
        )
    }
}

pub(crate) fn query_projects<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<Project>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut projects = Vec::new();

    while let Some(row) = rows.next()? {
        projects.push(parse_project_row(row)?);
    }

    Ok(projects)
}

pub(crate) fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: row.get("ID")?,
        project_guid: read_guid(row, "PROJECTGUID", "PROJECTS")?,
        country: row.get("COUNTRY")?,
        year: read_year(row, "YEAR")?,
        action_title: row.get("ACTION_TITLE")?,
        annual_action_title: row.get("ANNUAL_ACTION_TITLE")?,
        filename: row.get("FILENAME")?,
        total_amount: read_amount(row, "COLUMN_1_3_1_TOTAL_AMOUNT")?,
        global_indirect_management_amount: row.get("GLOBAL_INDIRECT_MANAGEMENT_AMOUNT")?,
        created_date: row.get("CREATED_DATE")?,
        created_by: row.get("CREATED_BY")?,
        updated_date: row.get("UPDATED_DATE")?,
        updated_by: row.get("UPDATED_BY")?,
    })
}
