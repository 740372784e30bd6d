//! Raw fetchers feeding the funding-breakdown pipeline.
//!
//! # Responsibility
//! - Read per-country engaged amounts, area tags, MIP rows and chart lists.
//!
//! # Invariants
//! - Engaged reads are restricted to project years 2021..=2027.
//! - MIP rows are returned in source order (`ID ASC`) so the title resolver
//!   can apply last-row-wins.
//! - Country matching is case-insensitive on trimmed values.

use crate::breakdown::aggregate::{ProjectAmountRow, TaggedProjectRow};
use crate::model::funding::{CadItem, PriorityArea};
use crate::model::mip::MipData;
use crate::model::project::Project;
use crate::model::year_range::YearRange;
use crate::repo::mip_repo::{query_mip, MIP_SELECT_SQL};
use crate::repo::project_repo::{query_projects, PROJECT_SELECT_SQL};
use crate::repo::{read_amount, read_year, RepoResult};
use rusqlite::{params, Connection};

/// Per-country reads used by the section-2 breakdown.
pub trait FundingRepository {
    /// Trimmed countries with projects in 2021..=2027 or MIP rows.
    ///
    /// Sorted case-insensitively; spellings differing only in case are
    /// collapsed to the first one.
    fn funding_countries(&self) -> RepoResult<Vec<String>>;
    /// Every project of the country in 2021..=2027 with its total amount.
    fn project_amounts(&self, country: &str) -> RepoResult<Vec<ProjectAmountRow>>;
    /// Projects joined with the priority-area tags of their files.
    fn tagged_project_amounts(&self, country: &str) -> RepoResult<Vec<TaggedProjectRow>>;
    /// MIP rows of the country in source order.
    fn country_mip_rows(&self, country: &str) -> RepoResult<Vec<MipData>>;
    /// CAD codes attached to the country's projects.
    fn country_cad_items(&self, country: &str) -> RepoResult<Vec<CadItem>>;
    /// Projects of the country in 2021..=2027, for action-title charts.
    fn country_projects(&self, country: &str) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed funding fetchers.
pub struct SqliteFundingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFundingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FundingRepository for SqliteFundingRepository<'_> {
    fn funding_countries(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT country FROM (
                SELECT TRIM(COUNTRY) AS country FROM PROJECTS
                WHERE COUNTRY IS NOT NULL AND TRIM(COUNTRY) <> ''
                  AND YEAR BETWEEN 2021 AND 2027
                UNION
                SELECT TRIM(COUNTRY) AS country FROM MIP_DATA
                WHERE COUNTRY IS NOT NULL AND TRIM(COUNTRY) <> ''
             )
             ORDER BY country COLLATE NOCASE ASC, country ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut countries: Vec<String> = Vec::new();

        while let Some(row) = rows.next()? {
            let country: String = row.get(0)?;
            if countries.last().is_some_and(|last| last.eq_ignore_ascii_case(&country)) {
                continue;
            }
            countries.push(country);
        }

        Ok(countries)
    }

    fn project_amounts(&self, country: &str) -> RepoResult<Vec<ProjectAmountRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT ID, YEAR, COLUMN_1_3_1_TOTAL_AMOUNT
             FROM PROJECTS
             WHERE TRIM(COUNTRY) = ?1 COLLATE NOCASE
               AND YEAR BETWEEN 2021 AND 2027
             ORDER BY ID ASC;",
        )?;
        let mut rows = stmt.query(params![country.trim()])?;
        let mut amounts = Vec::new();

        while let Some(row) = rows.next()? {
            amounts.push(ProjectAmountRow {
                project_id: row.get("ID")?,
                year: read_year(row, "YEAR")?,
                total_amount: read_amount(row, "COLUMN_1_3_1_TOTAL_AMOUNT")?,
            });
        }

        Ok(amounts)
    }

    fn tagged_project_amounts(&self, country: &str) -> RepoResult<Vec<TaggedProjectRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                p.ID AS ID,
                p.YEAR AS YEAR,
                p.COLUMN_1_3_1_TOTAL_AMOUNT AS COLUMN_1_3_1_TOTAL_AMOUNT,
                tagged.PRIORITY_AREAS AS PRIORITY_AREAS
             FROM PROJECTS p
             JOIN (
                SELECT DISTINCT FILENAME, PRIORITY_AREAS
                FROM CAD
                WHERE FILENAME IS NOT NULL
                  AND PRIORITY_AREAS BETWEEN 1 AND 4
             ) tagged ON tagged.FILENAME = p.FILENAME
             WHERE TRIM(p.COUNTRY) = ?1 COLLATE NOCASE
               AND p.YEAR BETWEEN 2021 AND 2027
             ORDER BY p.ID ASC, tagged.PRIORITY_AREAS ASC;",
        )?;
        let mut rows = stmt.query(params![country.trim()])?;
        let mut tagged = Vec::new();

        while let Some(row) = rows.next()? {
            let tag: i64 = row.get("PRIORITY_AREAS")?;
            let Some(area) = PriorityArea::from_tag(tag) else {
                continue;
            };
            tagged.push(TaggedProjectRow {
                project_id: row.get("ID")?,
                year: read_year(row, "YEAR")?,
                total_amount: read_amount(row, "COLUMN_1_3_1_TOTAL_AMOUNT")?,
                area,
            });
        }

        Ok(tagged)
    }

    fn country_mip_rows(&self, country: &str) -> RepoResult<Vec<MipData>> {
        query_mip(
            self.conn,
            &format!(
                "{MIP_SELECT_SQL}
                 WHERE TRIM(COUNTRY) = ?1 COLLATE NOCASE
                 ORDER BY ID ASC;"
            ),
            params![country.trim()],
        )
    }

    fn country_cad_items(&self, country: &str) -> RepoResult<Vec<CadItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT
                c.NAME AS NAME,
                c.CODE_CAD AS CODE_CAD,
                p.YEAR AS YEAR,
                TRIM(p.COUNTRY) AS COUNTRY
             FROM CAD c
             JOIN PROJECTS p ON p.FILENAME = c.FILENAME
             WHERE TRIM(p.COUNTRY) = ?1 COLLATE NOCASE
               AND c.CODE_CAD IS NOT NULL
               AND c.NAME IS NOT NULL
               AND p.YEAR BETWEEN 2021 AND 2027
             ORDER BY p.YEAR ASC, c.CODE_CAD ASC, c.NAME ASC;",
        )?;
        let mut rows = stmt.query(params![country.trim()])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            let Some(year) = read_year(row, "YEAR")? else {
                continue;
            };
            let Some(year_range) = YearRange::sub_period_of(year) else {
                continue;
            };
            items.push(CadItem {
                name: row.get("NAME")?,
                cad_code: row.get("CODE_CAD")?,
                year,
                country: row.get("COUNTRY")?,
                year_range,
            });
        }

        Ok(items)
    }

    fn country_projects(&self, country: &str) -> RepoResult<Vec<Project>> {
        query_projects(
            self.conn,
            &format!(
                "{PROJECT_SELECT_SQL}
                 WHERE TRIM(COUNTRY) = ?1 COLLATE NOCASE
                   AND YEAR BETWEEN 2021 AND 2027
                 ORDER BY ID ASC;"
            ),
            params![country.trim()],
        )
    }
}
