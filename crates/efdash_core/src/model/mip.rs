//! MIP record (`MIP_DATA` table): programmed, projected funding per country.

use crate::model::amount::contributing_amount;
use crate::model::funding::{PriorityArea, PriorityTitles};
use crate::model::year_range::YearRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MipId = i64;

/// Amount and indicative percentage of one area in one sub-period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MipAllocation {
    pub amount: Option<Decimal>,
    pub percent: Option<Decimal>,
}

/// One area across both sub-periods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MipArea {
    pub title: Option<String>,
    pub period_21_24: MipAllocation,
    pub period_25_27: MipAllocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MipData {
    pub id: MipId,
    pub mip_guid: Uuid,
    pub country: Option<String>,
    /// Support measures carry no title.
    pub support_measures: MipArea,
    pub p1: MipArea,
    pub p2: MipArea,
    pub p3: MipArea,
    pub created_date: String,
    pub created_by: Option<String>,
    pub updated_date: Option<String>,
    pub updated_by: Option<String>,
}

impl MipData {
    pub fn area(&self, area: PriorityArea) -> Option<&MipArea> {
        match area {
            PriorityArea::P1 => Some(&self.p1),
            PriorityArea::P2 => Some(&self.p2),
            PriorityArea::P3 => Some(&self.p3),
            PriorityArea::Support => Some(&self.support_measures),
            PriorityArea::Unknown => None,
        }
    }

    /// Programmed amount for an area in one sub-period; missing counts as 0.
    ///
    /// The full horizon sums both sub-periods.
    pub fn programmed_amount(&self, area: PriorityArea, range: YearRange) -> Decimal {
        let Some(area) = self.area(area) else {
            return Decimal::ZERO;
        };
        range
            .sub_periods()
            .iter()
            .map(|period| match period {
                YearRange::From2021To2024 => contributing_amount(area.period_21_24.amount),
                _ => contributing_amount(area.period_25_27.amount),
            })
            .sum()
    }

    /// P1..P3 display titles as stored on this row, blanks dropped.
    pub fn titles(&self) -> PriorityTitles {
        PriorityTitles {
            p1: non_blank(self.p1.title.as_deref()),
            p2: non_blank(self.p2.title.as_deref()),
            p3: non_blank(self.p3.title.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
