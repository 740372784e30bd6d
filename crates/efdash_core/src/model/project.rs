//! Project record (`PROJECTS` table): realized, engaged funding.

use crate::model::amount::{contributing_amount, parse_amount};
use crate::model::year_range::YearRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = i64;

/// One action plan line with its engaged total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub project_guid: Uuid,
    pub country: Option<String>,
    pub year: Option<i32>,
    pub action_title: Option<String>,
    pub annual_action_title: Option<String>,
    /// Source document name; links a project to its CAD and department rows.
    pub filename: Option<String>,
    /// `COLUMN_1_3_1_TOTAL_AMOUNT`. `None` when missing or not numeric.
    pub total_amount: Option<Decimal>,
    /// Kept verbatim; the source stores it as free text.
    pub global_indirect_management_amount: Option<String>,
    pub created_date: Option<String>,
    pub created_by: Option<String>,
    pub updated_date: Option<String>,
    pub updated_by: Option<String>,
}

impl Project {
    /// Sub-period the project year falls into.
    pub fn year_range(&self) -> Option<YearRange> {
        self.year.and_then(YearRange::sub_period_of)
    }

    /// Engaged amount as it counts towards totals.
    pub fn engaged_amount(&self) -> Decimal {
        contributing_amount(self.total_amount)
    }

    /// Parsed indirect-management amount; unparseable text counts as 0.
    pub fn indirect_amount(&self) -> Decimal {
        contributing_amount(
            self.global_indirect_management_amount
                .as_deref()
                .and_then(parse_amount),
        )
    }
}
