//! CAD record (`CAD` table): categorized action codes per action-plan file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CadId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadData {
    pub id: CadId,
    pub cad_guid: Uuid,
    pub code_cad: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub filename: Option<String>,
    pub percentage: Option<Decimal>,
    pub department: Option<i64>,
    /// Priority-area tag of the file: 1..=3 for P1..P3, 4 for support measures.
    pub priority_areas: Option<i64>,
    pub created_date: String,
    pub created_by: Option<String>,
    pub updated_date: Option<String>,
    pub updated_by: Option<String>,
}
