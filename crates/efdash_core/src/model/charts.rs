//! Section-3 aggregates and global ranking rows.

use crate::model::year_range::YearRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional filters of the section-3 charts. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section3Filter {
    pub year_range: Option<YearRange>,
    /// Matches `CAD.CATEGORY` of the project's file.
    pub category: Option<String>,
    /// Matches `DEPARTMENTS.DEPARTMENT_ID` of the project's file.
    pub department: Option<i64>,
}

impl Section3Filter {
    /// Window used when no year range is requested.
    pub fn effective_year_range(&self) -> YearRange {
        self.year_range.unwrap_or(YearRange::From2021To2027)
    }

    /// Category label echoed in each row.
    pub fn category_label(&self) -> String {
        self.category.clone().unwrap_or_else(|| "All".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCountry {
    pub country: String,
    pub engaged_amount: Decimal,
    pub projected_amount: Decimal,
    pub year_range: YearRange,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProgram {
    pub program: String,
    pub total_amount: Decimal,
    pub category: String,
    pub year_range: YearRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAgency {
    pub year_range: YearRange,
    pub agency: String,
    pub category: String,
    pub indirect_amount: Decimal,
    pub project_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section3ChartsResponse {
    pub top_countries: Vec<TopCountry>,
    pub top_programs: Vec<TopProgram>,
    pub top_agencies: Vec<TopAgency>,
}

/// CAD code ranked by the number of distinct action-plan files using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCad {
    pub cad_code: i64,
    pub name: String,
    pub action_plan_count: u32,
}

/// Department ranked by the number of distinct action-plan files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDepartment {
    pub department_id: i64,
    pub department_name: String,
    pub action_plan_count: u32,
}
