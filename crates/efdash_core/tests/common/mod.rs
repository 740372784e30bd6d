#![allow(dead_code)]

use rusqlite::{params, Connection};
use uuid::Uuid;

pub struct ProjectSeed<'a> {
    pub country: &'a str,
    pub year: i32,
    pub action_title: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub indirect: Option<&'a str>,
}

impl<'a> ProjectSeed<'a> {
    pub fn new(country: &'a str, year: i32, amount: &'a str) -> Self {
        Self {
            country,
            year,
            action_title: None,
            filename: None,
            amount: Some(amount),
            indirect: None,
        }
    }

    pub fn file(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.action_title = Some(title);
        self
    }

    pub fn indirect(mut self, indirect: &'a str) -> Self {
        self.indirect = Some(indirect);
        self
    }
}

pub fn insert_project(conn: &Connection, seed: ProjectSeed<'_>) -> i64 {
    conn.execute(
        "INSERT INTO PROJECTS (
            PROJECTGUID, COUNTRY, YEAR, ACTION_TITLE, FILENAME,
            COLUMN_1_3_1_TOTAL_AMOUNT, GLOBAL_INDIRECT_MANAGEMENT_AMOUNT
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            Uuid::new_v4().to_string(),
            seed.country,
            seed.year,
            seed.action_title,
            seed.filename,
            seed.amount,
            seed.indirect,
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub struct CadSeed<'a> {
    pub filename: &'a str,
    pub code: i64,
    pub name: &'a str,
    pub category: &'a str,
    pub department: Option<i64>,
    pub priority_area: Option<i64>,
}

pub fn insert_cad(conn: &Connection, seed: CadSeed<'_>) -> i64 {
    conn.execute(
        "INSERT INTO CAD (CAD_GUID, CODE_CAD, NAME, CATEGORY, FILENAME, DEPARTMENT, PRIORITY_AREAS)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            Uuid::new_v4().to_string(),
            seed.code,
            seed.name,
            seed.category,
            seed.filename,
            seed.department,
            seed.priority_area,
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Tags `filename` with a priority area (1..=4) without a CAD code.
pub fn tag_file(conn: &Connection, filename: &str, priority_area: i64) {
    conn.execute(
        "INSERT INTO CAD (CAD_GUID, FILENAME, CATEGORY, PRIORITY_AREAS) \
         VALUES (?1, ?2, 'Tag', ?3);",
        params![Uuid::new_v4().to_string(), filename, priority_area],
    )
    .unwrap();
}

pub fn insert_department(conn: &Connection, department_id: i64, name: &str, filename: &str) {
    conn.execute(
        "INSERT INTO DEPARTMENTS (DEPARTMENT_ID, DEPARTMENT_NAME, FILENAME) VALUES (?1, ?2, ?3);",
        params![department_id, name, filename],
    )
    .unwrap();
}

/// Amounts per area in `[21_24, 25_27]` order.
pub struct MipSeed<'a> {
    pub country: &'a str,
    pub titles: [Option<&'a str>; 3],
    pub p1: [&'a str; 2],
    pub p2: [&'a str; 2],
    pub p3: [&'a str; 2],
    pub support: [&'a str; 2],
}

impl<'a> MipSeed<'a> {
    pub fn empty(country: &'a str) -> Self {
        Self {
            country,
            titles: [None, None, None],
            p1: ["0", "0"],
            p2: ["0", "0"],
            p3: ["0", "0"],
            support: ["0", "0"],
        }
    }
}

pub fn insert_mip(conn: &Connection, seed: MipSeed<'_>) -> i64 {
    conn.execute(
        "INSERT INTO MIP_DATA (
            MIP_GUID, COUNTRY,
            P1_TITLE, P2_TITLE, P3_TITLE,
            P1_AMOUNT_21_24, P1_AMOUNT_25_27,
            P2_AMOUNT_21_24, P2_AMOUNT_25_27,
            P3_AMOUNT_21_24, P3_AMOUNT_25_27,
            SUPPORT_MEASURES_AMOUNT_21_24, SUPPORT_MEASURES_AMOUNT_25_27
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
        params![
            Uuid::new_v4().to_string(),
            seed.country,
            seed.titles[0],
            seed.titles[1],
            seed.titles[2],
            seed.p1[0],
            seed.p1[1],
            seed.p2[0],
            seed.p2[1],
            seed.p3[0],
            seed.p3[1],
            seed.support[0],
            seed.support[1],
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}
