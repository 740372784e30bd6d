//! Funding breakdown shapes: tagged items, totals and normalized sets.
//!
//! # Invariants
//! - Within one (country, year range, source) group there is at most one
//!   item per `PriorityArea`.
//! - `Unknown` never carries a title.
//! - Amounts are non-negative.

use crate::model::year_range::YearRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where an amount comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSource {
    /// Realized amounts from project records.
    Engaged,
    /// Indicative amounts from MIP records.
    Projected,
}

/// Funding bucket of a country breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityArea {
    P1,
    P2,
    P3,
    Support,
    /// Residual engaged funding not attributable to a tagged area.
    Unknown,
}

impl PriorityArea {
    /// Every bucket in display order.
    pub const ALL: [PriorityArea; 5] = [
        PriorityArea::P1,
        PriorityArea::P2,
        PriorityArea::P3,
        PriorityArea::Support,
        PriorityArea::Unknown,
    ];

    /// Buckets that can be tagged at the source.
    pub const KNOWN: [PriorityArea; 4] = [
        PriorityArea::P1,
        PriorityArea::P2,
        PriorityArea::P3,
        PriorityArea::Support,
    ];

    /// Maps the numeric `CAD.PRIORITY_AREAS` tag.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            1 => Some(Self::P1),
            2 => Some(Self::P2),
            3 => Some(Self::P3),
            4 => Some(Self::Support),
            _ => None,
        }
    }
}

/// One row of engaged or projected funding.
///
/// `title` and `percentage` are filled in only for the all-countries chart
/// lists; inside the normalizer they stay unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingItem {
    pub country: String,
    pub year_range: YearRange,
    pub area: PriorityArea,
    pub title: Option<String>,
    pub amount: Decimal,
    pub percentage: Decimal,
}

impl FundingItem {
    pub fn new(
        country: impl Into<String>,
        year_range: YearRange,
        area: PriorityArea,
        amount: Decimal,
    ) -> Self {
        Self {
            country: country.into(),
            year_range,
            area,
            title: None,
            amount,
            percentage: Decimal::ZERO,
        }
    }
}

/// Ground-truth engaged total for one country and year range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryTotal {
    pub country: String,
    pub year_range: YearRange,
    pub total: Decimal,
}

/// P1..P3 display titles of one country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTitles {
    pub p1: Option<String>,
    pub p2: Option<String>,
    pub p3: Option<String>,
}

impl PriorityTitles {
    pub fn title_for(&self, area: PriorityArea) -> Option<&str> {
        match area {
            PriorityArea::P1 => self.p1.as_deref(),
            PriorityArea::P2 => self.p2.as_deref(),
            PriorityArea::P3 => self.p3.as_deref(),
            PriorityArea::Support | PriorityArea::Unknown => None,
        }
    }
}

/// One bucket of a normalized set, both sub-periods side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityBucket {
    pub amount_21_24: Decimal,
    pub percentage_21_24: Decimal,
    pub amount_25_27: Decimal,
    pub percentage_25_27: Decimal,
    pub title: Option<String>,
}

/// Five-bucket breakdown of one source for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPrioritySet {
    pub p1: PriorityBucket,
    pub p2: PriorityBucket,
    pub p3: PriorityBucket,
    pub support_measure: PriorityBucket,
    pub unknown: PriorityBucket,
}

impl NormalizedPrioritySet {
    pub fn bucket(&self, area: PriorityArea) -> &PriorityBucket {
        match area {
            PriorityArea::P1 => &self.p1,
            PriorityArea::P2 => &self.p2,
            PriorityArea::P3 => &self.p3,
            PriorityArea::Support => &self.support_measure,
            PriorityArea::Unknown => &self.unknown,
        }
    }

    pub fn bucket_mut(&mut self, area: PriorityArea) -> &mut PriorityBucket {
        match area {
            PriorityArea::P1 => &mut self.p1,
            PriorityArea::P2 => &mut self.p2,
            PriorityArea::P3 => &mut self.p3,
            PriorityArea::Support => &mut self.support_measure,
            PriorityArea::Unknown => &mut self.unknown,
        }
    }
}

/// CAD code attached to a country's project (chart 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadItem {
    pub name: String,
    pub cad_code: i64,
    pub year: i32,
    pub country: String,
    pub year_range: YearRange,
}

/// Engaged and indirect amounts of one action title (chart 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub country: String,
    pub year_range: YearRange,
    pub action_title: String,
    pub total_amount: Decimal,
    pub indirect_amount: Decimal,
}

/// Normalized section-2 payload for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCountryResponse {
    pub country: String,
    pub engage: NormalizedPrioritySet,
    pub projected: NormalizedPrioritySet,
    pub cad_data_chart2: Vec<CadItem>,
    pub action_data_chart3: Vec<ActionItem>,
}

/// Raw section-2 chart lists of every country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryChartsResponse {
    pub engage: Vec<FundingItem>,
    pub projected: Vec<FundingItem>,
    pub cad_data_chart2: Vec<CadItem>,
    pub action_data_chart3: Vec<ActionItem>,
}
