//! Breakdown normalizer.
//!
//! Reconciles the area amounts of one (country, source, sub-period) slice
//! against its total and derives consistent percentages.
//!
//! # Invariants
//! - Known-area amounts pass through unchanged (negatives are clamped to 0).
//! - `Unknown` is synthesized only for ground-truth totals, and only when the
//!   total strictly exceeds the known sum.
//! - Percentages are `amount * 100 / total`, rounded per bucket to 2 decimals
//!   half away from zero; a zero total yields zero percentages. Rounded
//!   percentages are not re-balanced to sum to exactly 100.

use crate::breakdown::aggregate::total_for;
use crate::model::funding::{
    CountryTotal, FundingItem, FundingSource, NormalizedPrioritySet, PriorityArea,
    PriorityTitles,
};
use crate::model::year_range::{YearRange, SUB_PERIODS};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const PERCENT_SCALE: u32 = 2;

/// Denominator of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalBasis {
    /// Authoritative total; the shortfall becomes `Unknown`.
    GroundTruth(Decimal),
    /// The slice is its own total; `Unknown` stays 0.
    OwnSum,
}

impl TotalBasis {
    /// Engaged slices use the project total, projected slices their own sum.
    pub fn for_source(source: FundingSource, ground_truth: Decimal) -> Self {
        match source {
            FundingSource::Engaged => Self::GroundTruth(ground_truth),
            FundingSource::Projected => Self::OwnSum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBucket {
    pub area: PriorityArea,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Complete five-bucket breakdown of one slice, in `PriorityArea::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSlice {
    pub year_range: YearRange,
    /// Denominator the percentages were computed against.
    pub total: Decimal,
    pub buckets: [SliceBucket; 5],
}

impl NormalizedSlice {
    pub fn bucket(&self, area: PriorityArea) -> &SliceBucket {
        &self.buckets[area_index(area)]
    }

    pub fn amount_sum(&self) -> Decimal {
        self.buckets.iter().map(|bucket| bucket.amount).sum()
    }
}

/// `amount * 100 / total` rounded to 2 decimals, or 0 when `total` is not positive.
pub fn percentage_of(amount: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (amount * dec!(100) / total)
        .round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes the items of one sub-period slice.
///
/// `items` must already belong to a single (country, source, year range).
/// Items tagged `Unknown` are ignored since that bucket is derived here; a
/// repeated area is summed.
pub fn normalize_slice(
    year_range: YearRange,
    items: &[FundingItem],
    basis: TotalBasis,
) -> NormalizedSlice {
    let mut amounts = [Decimal::ZERO; 5];
    for item in items {
        if item.area == PriorityArea::Unknown {
            continue;
        }
        amounts[area_index(item.area)] += item.amount.max(Decimal::ZERO);
    }

    let known_sum: Decimal = amounts.iter().sum();
    let total = match basis {
        TotalBasis::GroundTruth(total) => {
            let total = total.max(Decimal::ZERO);
            if total > known_sum {
                amounts[area_index(PriorityArea::Unknown)] = total - known_sum;
            }
            total
        }
        TotalBasis::OwnSum => known_sum,
    };

    build_slice(year_range, total, amounts)
}

/// Full-horizon view of a normalized set: bucket amounts summed across both
/// sub-periods and percentages recomputed over the summed bucket amounts.
pub fn combined_view(set: &NormalizedPrioritySet) -> NormalizedSlice {
    let mut amounts = [Decimal::ZERO; 5];
    for area in PriorityArea::ALL {
        let bucket = set.bucket(area);
        amounts[area_index(area)] = bucket.amount_21_24 + bucket.amount_25_27;
    }
    let total = amounts.iter().sum();
    build_slice(YearRange::From2021To2027, total, amounts)
}

/// Normalizes both sub-periods of one source into a titled five-bucket set.
///
/// `totals` is only consulted for the engaged source.
pub fn normalize_source(
    source: FundingSource,
    items: &[FundingItem],
    totals: &[CountryTotal],
    titles: &PriorityTitles,
) -> NormalizedPrioritySet {
    let mut set = NormalizedPrioritySet::default();

    for range in SUB_PERIODS {
        let slice_items: Vec<FundingItem> = items
            .iter()
            .filter(|item| item.year_range == range)
            .cloned()
            .collect();
        let basis = TotalBasis::for_source(source, total_for(totals, range));
        let slice = normalize_slice(range, &slice_items, basis);

        for bucket in slice.buckets {
            let target = set.bucket_mut(bucket.area);
            match range {
                YearRange::From2021To2024 => {
                    target.amount_21_24 = bucket.amount;
                    target.percentage_21_24 = bucket.percentage;
                }
                _ => {
                    target.amount_25_27 = bucket.amount;
                    target.percentage_25_27 = bucket.percentage;
                }
            }
        }
    }

    for area in PriorityArea::ALL {
        set.bucket_mut(area).title = titles.title_for(area).map(str::to_string);
    }
    set
}

fn build_slice(year_range: YearRange, total: Decimal, amounts: [Decimal; 5]) -> NormalizedSlice {
    let buckets = PriorityArea::ALL.map(|area| {
        let amount = amounts[area_index(area)];
        SliceBucket {
            area,
            amount,
            percentage: percentage_of(amount, total),
        }
    });
    NormalizedSlice {
        year_range,
        total,
        buckets,
    }
}

fn area_index(area: PriorityArea) -> usize {
    match area {
        PriorityArea::P1 => 0,
        PriorityArea::P2 => 1,
        PriorityArea::P3 => 2,
        PriorityArea::Support => 3,
        PriorityArea::Unknown => 4,
    }
}
