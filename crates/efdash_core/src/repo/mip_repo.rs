//! MIP repository contracts and SQLite implementation.

use crate::model::mip::{MipAllocation, MipArea, MipData, MipId};
use crate::repo::{read_amount, read_guid, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const MIP_SELECT_SQL: &str = "SELECT
    ID,
    MIP_GUID,
    COUNTRY,
    SUPPORT_MEASURES_AMOUNT_21_24,
    SUPPORT_MEASURES_PERCENT_21_24,
    SUPPORT_MEASURES_AMOUNT_25_27,
    SUPPORT_MEASURES_PERCENT_25_27,
    P1_TITLE,
    P1_AMOUNT_21_24,
    P1_PERCENT_21_24,
    P1_AMOUNT_25_27,
    P1_PERCENT_25_27,
    P2_TITLE,
    P2_AMOUNT_21_24,
    P2_PERCENT_21_24,
    P2_AMOUNT_25_27,
    P2_PERCENT_25_27,
    P3_TITLE,
    P3_AMOUNT_21_24,
    P3_PERCENT_21_24,
    P3_AMOUNT_25_27,
    P3_PERCENT_25_27,
    CREATED_DATE,
    CREATED_BY,
    UPDATED_DATE,
    UPDATED_BY
FROM MIP_DATA";

/// Repository interface for MIP reads. Lists are newest first.
pub trait MipRepository {
    fn list_mip_data(&self) -> RepoResult<Vec<MipData>>;
    fn get_mip_data(&self, id: MipId) -> RepoResult<Option<MipData>>;
    fn get_mip_data_by_guid(&self, guid: Uuid) -> RepoResult<Option<MipData>>;
    fn list_mip_data_by_country(&self, country: &str) -> RepoResult<Vec<MipData>>;
}

/// SQLite-backed MIP repository.
pub struct SqliteMipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMipRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MipRepository for SqliteMipRepository<'_> {
    fn list_mip_data(&self) -> RepoResult<Vec<MipData>> {
        query_mip(
            self.conn,
            &format!("{MIP_SELECT_SQL} ORDER BY CREATED_DATE DESC, ID DESC;"),
            [],
        )
    }

    fn get_mip_data(&self, id: MipId) -> RepoResult<Option<MipData>> {
        let mut rows = query_mip(
            self.conn,
            &format!("{MIP_SELECT_SQL} WHERE ID = ?1;"),
            params![id],
        )?;
        Ok(rows.pop())
    }

    fn get_mip_data_by_guid(&self, guid: Uuid) -> RepoResult<Option<MipData>> {
        let mut rows = query_mip(
            self.conn,
            &format!("{MIP_SELECT_SQL} WHERE MIP_GUID = ?1 COLLATE NOCASE;"),
            params![guid.to_string()],
        )?;
        Ok(rows.pop())
    }

    fn list_mip_data_by_country(&self, country: &str) -> RepoResult<Vec<MipData>> {
        query_mip(
            self.conn,
            &format!(
                "{MIP_SELECT_SQL}
                 WHERE TRIM(COUNTRY) = ?1 COLLATE NOCASE
                 ORDER BY CREATED_DATE DESC, ID DESC;"
            ),
            params![country.trim()],
        )
    }
}

pub(crate) fn query_mip<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<MipData>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();

    while let Some(row) = rows.next()? {
        items.push(parse_mip_row(row)?);
    }

    Ok(items)
}

fn parse_mip_row(row: &Row<'_>) -> RepoResult<MipData> {
    Ok(MipData {
        id: row.get("ID")?,
        mip_guid: read_guid(row, "MIP_GUID", "MIP_DATA")?,
        country: row.get("COUNTRY")?,
        support_measures: parse_area(row, "SUPPORT_MEASURES", None)?,
        p1: parse_area(row, "P1", Some("P1_TITLE"))?,
        p2: parse_area(row, "P2", Some("P2_TITLE"))?,
        p3: parse_area(row, "P3", Some("P3_TITLE"))?,
        created_date: row.get("CREATED_DATE")?,
        created_by: row.get("CREATED_BY")?,
        updated_date: row.get("UPDATED_DATE")?,
        updated_by: row.get("UPDATED_BY")?,
    })
}

fn parse_area(row: &Row<'_>, prefix: &str, title_column: Option<&str>) -> RepoResult<MipArea> {
    let title = match title_column {
        Some(column) => row.get(column)?,
        None => None,
    };

    Ok(MipArea {
        title,
        period_21_24: MipAllocation {
            amount: read_amount(row, &format!("{prefix}_AMOUNT_21_24"))?,
            percent: read_amount(row, &format!("{prefix}_PERCENT_21_24"))?,
        },
        period_25_27: MipAllocation {
            amount: read_amount(row, &format!("{prefix}_AMOUNT_25_27"))?,
            percent: read_amount(row, &format!("{prefix}_PERCENT_25_27"))?,
        },
    })
}
