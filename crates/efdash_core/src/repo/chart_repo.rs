//! Chart repository: section-3 facts, global rankings and lookup lists.
//!
//! # Invariants
//! - Section-3 facts honor every filter present in `Section3Filter`.
//! - Lookup lists drop blank values and are sorted.

use crate::model::charts::{Section3Filter, TopCad, TopDepartment};
use crate::model::mip::MipData;
use crate::model::project::ProjectId;
use crate::repo::mip_repo::{query_mip, MIP_SELECT_SQL};
use crate::repo::{read_amount, read_count, read_year, RepoResult};
use rust_decimal::Decimal;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// One project as seen by the section-3 aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFact {
    pub project_id: ProjectId,
    pub country: Option<String>,
    pub year: Option<i32>,
    pub action_title: Option<String>,
    pub total_amount: Option<Decimal>,
    /// Raw indirect-management text as stored.
    pub indirect_amount: Option<String>,
    /// Name of the first department attached to the project's file.
    pub agency: Option<String>,
}

/// Repository interface for chart reads.
pub trait ChartRepository {
    /// Distinct country names across projects and MIP rows.
    fn distinct_countries(&self) -> RepoResult<Vec<String>>;
    fn distinct_departments(&self) -> RepoResult<Vec<String>>;
    fn distinct_cad_categories(&self) -> RepoResult<Vec<String>>;
    fn section3_facts(&self, filter: &Section3Filter) -> RepoResult<Vec<ProjectFact>>;
    /// Every MIP row, in source order. Feeds the projected column of top countries.
    fn mip_rows(&self) -> RepoResult<Vec<MipData>>;
    fn global_top_cad(&self) -> RepoResult<Vec<TopCad>>;
    fn global_top_departments(&self) -> RepoResult<Vec<TopDepartment>>;
}

/// SQLite-backed chart repository.
pub struct SqliteChartRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChartRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_strings(&self, sql: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut values = Vec::new();

        while let Some(row) = rows.next()? {
            values.push(row.get::<_, String>(0)?);
        }

        Ok(values)
    }
}

impl ChartRepository for SqliteChartRepository<'_> {
    fn distinct_countries(&self) -> RepoResult<Vec<String>> {
        self.query_strings(
            "SELECT country FROM (
                SELECT TRIM(COUNTRY) AS country FROM PROJECTS
                WHERE COUNTRY IS NOT NULL AND TRIM(COUNTRY) <> ''
                UNION
                SELECT TRIM(COUNTRY) AS country FROM MIP_DATA
                WHERE COUNTRY IS NOT NULL AND TRIM(COUNTRY) <> ''
             )
             ORDER BY country COLLATE NOCASE ASC, country ASC;",
        )
    }

    fn distinct_departments(&self) -> RepoResult<Vec<String>> {
        self.query_strings(
            "SELECT DISTINCT TRIM(DEPARTMENT_NAME) AS name
             FROM DEPARTMENTS
             WHERE DEPARTMENT_NAME IS NOT NULL AND TRIM(DEPARTMENT_NAME) <> ''
             ORDER BY name COLLATE NOCASE ASC;",
        )
    }

    fn distinct_cad_categories(&self) -> RepoResult<Vec<String>> {
        self.query_strings(
            "SELECT DISTINCT TRIM(CATEGORY) AS category
             FROM CAD
             WHERE CATEGORY IS NOT NULL AND TRIM(CATEGORY) <> ''
             ORDER BY category COLLATE NOCASE ASC;",
        )
    }

    fn section3_facts(&self, filter: &Section3Filter) -> RepoResult<Vec<ProjectFact>> {
        let (start, end) = filter.effective_year_range().bounds();
        let mut sql = String::from(
            "SELECT
                p.ID AS ID,
                TRIM(p.COUNTRY) AS COUNTRY,
                p.YEAR AS YEAR,
                p.ACTION_TITLE AS ACTION_TITLE,
                p.COLUMN_1_3_1_TOTAL_AMOUNT AS COLUMN_1_3_1_TOTAL_AMOUNT,
                p.GLOBAL_INDIRECT_MANAGEMENT_AMOUNT AS GLOBAL_INDIRECT_MANAGEMENT_AMOUNT,
                (
                    SELECT TRIM(d.DEPARTMENT_NAME)
                    FROM DEPARTMENTS d
                    WHERE d.FILENAME = p.FILENAME
                      AND d.DEPARTMENT_NAME IS NOT NULL
                    ORDER BY d.DEPARTMENT_ID ASC, d.ID ASC
                    LIMIT 1
                ) AS AGENCY
             FROM PROJECTS p
             WHERE p.YEAR BETWEEN ? AND ?",
        );
        let mut bind_values = vec![
            Value::Integer(i64::from(start)),
            Value::Integer(i64::from(end)),
        ];

        if let Some(category) = filter.category.as_deref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM CAD c
                    WHERE c.FILENAME = p.FILENAME AND TRIM(c.CATEGORY) = ? COLLATE NOCASE
                 )",
            );
            bind_values.push(Value::Text(category.trim().to_string()));
        }

        if let Some(department) = filter.department {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM DEPARTMENTS d
                    WHERE d.FILENAME = p.FILENAME AND d.DEPARTMENT_ID = ?
                 )",
            );
            bind_values.push(Value::Integer(department));
        }

        sql.push_str(" ORDER BY p.ID ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut facts = Vec::new();

        while let Some(row) = rows.next()? {
            facts.push(ProjectFact {
                project_id: row.get("ID")?,
                country: row.get("COUNTRY")?,
                year: read_year(row, "YEAR")?,
                action_title: row.get("ACTION_TITLE")?,
                total_amount: read_amount(row, "COLUMN_1_3_1_TOTAL_AMOUNT")?,
                indirect_amount: row.get("GLOBAL_INDIRECT_MANAGEMENT_AMOUNT")?,
                agency: row.get("AGENCY")?,
            });
        }

        Ok(facts)
    }

    fn mip_rows(&self) -> RepoResult<Vec<MipData>> {
        query_mip(self.conn, &format!("{MIP_SELECT_SQL} ORDER BY ID ASC;"), [])
    }

    fn global_top_cad(&self) -> RepoResult<Vec<TopCad>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.CODE_CAD AS CAD_CODE,
                c.NAME AS NAME,
                COUNT(DISTINCT c.FILENAME) AS ACTION_PLAN_COUNT
             FROM CAD c
             WHERE c.CODE_CAD IS NOT NULL
               AND c.NAME IS NOT NULL
               AND c.FILENAME IS NOT NULL
             GROUP BY c.CODE_CAD, c.NAME
             ORDER BY ACTION_PLAN_COUNT DESC, c.CODE_CAD ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut ranking = Vec::new();

        while let Some(row) = rows.next()? {
            ranking.push(TopCad {
                cad_code: row.get("CAD_CODE")?,
                name: row.get("NAME")?,
                action_plan_count: read_count(row, "ACTION_PLAN_COUNT")?,
            });
        }

        Ok(ranking)
    }

    fn global_top_departments(&self) -> RepoResult<Vec<TopDepartment>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                d.DEPARTMENT_ID AS DEPARTMENT_ID,
                d.DEPARTMENT_NAME AS DEPARTMENT_NAME,
                COUNT(DISTINCT d.FILENAME) AS ACTION_PLAN_COUNT
             FROM DEPARTMENTS d
             WHERE d.DEPARTMENT_ID IS NOT NULL
               AND d.DEPARTMENT_NAME IS NOT NULL
               AND d.FILENAME IS NOT NULL
             GROUP BY d.DEPARTMENT_ID, d.DEPARTMENT_NAME
             ORDER BY ACTION_PLAN_COUNT DESC, d.DEPARTMENT_ID ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut ranking = Vec::new();

        while let Some(row) = rows.next()? {
            ranking.push(TopDepartment {
                department_id: row.get("DEPARTMENT_ID")?,
                department_name: row.get("DEPARTMENT_NAME")?,
                action_plan_count: read_count(row, "ACTION_PLAN_COUNT")?,
            });
        }

        Ok(ranking)
    }
}
