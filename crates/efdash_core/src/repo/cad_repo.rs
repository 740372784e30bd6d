//! CAD repository contracts and SQLite implementation.

use crate::model::cad::{CadData, CadId};
use crate::repo::{read_amount, read_guid, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const CAD_SELECT_SQL: &str = "SELECT
    ID,
    CAD_GUID,
    CODE_CAD,
    NAME,
    CATEGORY,
    CATEGORYID,
    FILENAME,
    PERCENTAGE,
    DEPARTMENT,
    PRIORITY_AREAS,
    CREATED_DATE,
    CREATED_BY,
    UPDATED_DATE,
    UPDATED_BY
FROM CAD";

/// Repository interface for CAD reads. Lists are newest first.
pub trait CadRepository {
    fn list_cad_data(&self) -> RepoResult<Vec<CadData>>;
    fn get_cad_data(&self, id: CadId) -> RepoResult<Option<CadData>>;
    fn get_cad_data_by_guid(&self, guid: Uuid) -> RepoResult<Option<CadData>>;
    fn list_cad_data_by_category(&self, category: &str) -> RepoResult<Vec<CadData>>;
    fn list_cad_data_by_department(&self, department: i64) -> RepoResult<Vec<CadData>>;
}

/// SQLite-backed CAD repository.
pub struct SqliteCadRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCadRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> RepoResult<Vec<CadData>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_cad_row(row)?);
        }

        Ok(items)
    }
}

impl CadRepository for SqliteCadRepository<'_> {
    fn list_cad_data(&self) -> RepoResult<Vec<CadData>> {
        self.query(
            &format!("{CAD_SELECT_SQL} ORDER BY CREATED_DATE DESC, ID DESC;"),
            [],
        )
    }

    fn get_cad_data(&self, id: CadId) -> RepoResult<Option<CadData>> {
        let mut items = self.query(&format!("{CAD_SELECT_SQL} WHERE ID = ?1;"), params![id])?;
        Ok(items.pop())
    }

    fn get_cad_data_by_guid(&self, guid: Uuid) -> RepoResult<Option<CadData>> {
        let mut items = self.query(
            &format!("{CAD_SELECT_SQL} WHERE CAD_GUID = ?1 COLLATE NOCASE;"),
            params![guid.to_string()],
        )?;
        Ok(items.pop())
    }

    fn list_cad_data_by_category(&self, category: &str) -> RepoResult<Vec<CadData>> {
        self.query(
            &format!(
                "{CAD_SELECT_SQL}
                 WHERE TRIM(CATEGORY) = ?1 COLLATE NOCASE
                 ORDER BY CREATED_DATE DESC, ID DESC;"
            ),
            params![category.trim()],
        )
    }

    fn list_cad_data_by_department(&self, department: i64) -> RepoResult<Vec<CadData>> {
        self.query(
            &format!(
                "{CAD_SELECT_SQL}
                 WHERE DEPARTMENT = ?1
                 ORDER BY CREATED_DATE DESC, ID DESC;"
            ),
            params![department],
        )
    }
}

fn parse_cad_row(row: &Row<'_>) -> RepoResult<CadData> {
    Ok(CadData {
        id: row.get("ID")?,
        cad_guid: read_guid(row, "CAD_GUID", "CAD")?,
        code_cad: row.get("CODE_CAD")?,
        name: row.get("NAME")?,
        category: row.get("CATEGORY")?,
        category_id: row.get("CATEGORYID")?,
        filename: row.get("FILENAME")?,
        percentage: read_amount(row, "PERCENTAGE")?,
        department: row.get("DEPARTMENT")?,
        priority_areas: row.get("PRIORITY_AREAS")?,
        created_date: row.get("CREATED_DATE")?,
        created_by: row.get("CREATED_BY")?,
        updated_date: row.get("UPDATED_DATE")?,
        updated_by: row.get("UPDATED_BY")?,
    })
}
