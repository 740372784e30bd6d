//! Totals calculator and per-area aggregation of raw source rows.

use crate::model::amount::contributing_amount;
use crate::model::funding::{ActionItem, CountryTotal, FundingItem, PriorityArea};
use crate::model::mip::MipData;
use crate::model::project::{Project, ProjectId};
use crate::model::year_range::{YearRange, SUB_PERIODS};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Project amount as read for the totals calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAmountRow {
    pub project_id: ProjectId,
    pub year: Option<i32>,
    pub total_amount: Option<Decimal>,
}

/// Project amount tagged with a priority area through its file's CAD rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedProjectRow {
    pub project_id: ProjectId,
    pub year: Option<i32>,
    pub total_amount: Option<Decimal>,
    pub area: PriorityArea,
}

/// Ground-truth engaged total per sub-period, independent of area tagging.
///
/// Always returns one entry per sub-period (zero when nothing matches).
/// Each project counts once, in the sub-period of its own year.
pub fn engaged_totals(country: &str, rows: &[ProjectAmountRow]) -> Vec<CountryTotal> {
    let mut seen = BTreeSet::new();
    let mut sums: BTreeMap<YearRange, Decimal> =
        SUB_PERIODS.iter().map(|range| (*range, Decimal::ZERO)).collect();

    for row in rows {
        let Some(range) = row.year.and_then(YearRange::sub_period_of) else {
            continue;
        };
        if !seen.insert(row.project_id) {
            continue;
        }
        if let Some(sum) = sums.get_mut(&range) {
            *sum += contributing_amount(row.total_amount);
        }
    }

    sums.into_iter()
        .map(|(year_range, total)| CountryTotal {
            country: country.to_string(),
            year_range,
            total,
        })
        .collect()
}

/// Total for any year range; the full horizon is the sum of its sub-periods.
pub fn total_for(totals: &[CountryTotal], range: YearRange) -> Decimal {
    totals
        .iter()
        .filter(|total| total.year_range.is_sub_period())
        .filter(|total| range.sub_periods().contains(&total.year_range))
        .map(|total| total.total)
        .sum()
}

/// Engaged amount per (sub-period, area).
///
/// A project tagged several times with the same area counts once for it.
pub fn engaged_area_items(country: &str, rows: &[TaggedProjectRow]) -> Vec<FundingItem> {
    let mut seen = BTreeSet::new();
    let mut sums: BTreeMap<(YearRange, PriorityArea), Decimal> = BTreeMap::new();

    for row in rows {
        if row.area == PriorityArea::Unknown {
            continue;
        }
        let Some(range) = row.year.and_then(YearRange::sub_period_of) else {
            continue;
        };
        if !seen.insert((row.project_id, row.area)) {
            continue;
        }
        *sums.entry((range, row.area)).or_default() += contributing_amount(row.total_amount);
    }

    sums.into_iter()
        .map(|((range, area), amount)| FundingItem::new(country, range, area, amount))
        .collect()
}

/// Programmed amount per (sub-period, area), summed across the country's MIP rows.
///
/// No MIP rows means no items at all.
pub fn projected_area_items(country: &str, rows: &[MipData]) -> Vec<FundingItem> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::with_capacity(SUB_PERIODS.len() * PriorityArea::KNOWN.len());
    for range in SUB_PERIODS {
        for area in PriorityArea::KNOWN {
            let amount = rows
                .iter()
                .map(|row| row.programmed_amount(area, range))
                .sum();
            items.push(FundingItem::new(country, range, area, amount));
        }
    }
    items
}

/// Chart-3 rows: engaged and indirect amounts per action title.
///
/// Emits one row per (sub-period, title) plus a full-horizon row per title.
/// Projects without a title or outside 2021..=2027 are skipped.
pub fn action_items(country: &str, projects: &[Project]) -> Vec<ActionItem> {
    let mut sums: BTreeMap<(YearRange, String), (Decimal, Decimal)> = BTreeMap::new();

    for project in projects {
        let Some(range) = project.year_range() else {
            continue;
        };
        let Some(title) = project
            .action_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
        else {
            continue;
        };

        for key in [range, YearRange::From2021To2027] {
            let entry = sums.entry((key, title.to_string())).or_default();
            entry.0 += project.engaged_amount();
            entry.1 += project.indirect_amount();
        }
    }

    sums.into_iter()
        .map(
            |((year_range, action_title), (total_amount, indirect_amount))| ActionItem {
                country: country.to_string(),
                year_range,
                action_title,
                total_amount,
                indirect_amount,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        engaged_area_items, engaged_totals, total_for, ProjectAmountRow, TaggedProjectRow,
    };
    use crate::model::funding::PriorityArea;
    use crate::model::year_range::YearRange;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn amount_row(id: i64, year: Option<i32>, amount: Option<Decimal>) -> ProjectAmountRow {
        ProjectAmountRow {
            project_id: id,
            year,
            total_amount: amount,
        }
    }

    #[test]
    fn totals_split_by_sub_period_and_ignore_bad_rows() {
        let rows = vec![
            amount_row(1, Some(2021), Some(dec!(100))),
            amount_row(2, Some(2024), Some(dec!(50))),
            amount_row(3, Some(2026), Some(dec!(30))),
            amount_row(4, Some(2019), Some(dec!(999))),
            amount_row(5, None, Some(dec!(999))),
            amount_row(6, Some(2022), None),
            amount_row(7, Some(2022), Some(dec!(-10))),
        ];

        let totals = engaged_totals("Kenya", &rows);

        assert_eq!(totals.len(), 2);
        assert_eq!(total_for(&totals, YearRange::From2021To2024), dec!(150));
        assert_eq!(total_for(&totals, YearRange::From2025To2027), dec!(30));
        assert_eq!(total_for(&totals, YearRange::From2021To2027), dec!(180));
    }

    #[test]
    fn totals_are_zero_without_projects() {
        let totals = engaged_totals("Nowhere", &[]);
        assert!(totals.iter().all(|total| total.total == dec!(0)));
        assert_eq!(total_for(&totals, YearRange::From2021To2027), dec!(0));
    }

    #[test]
    fn duplicate_project_rows_count_once() {
        let rows = vec![
            amount_row(1, Some(2021), Some(dec!(100))),
            amount_row(1, Some(2021), Some(dec!(100))),
        ];
        let totals = engaged_totals("Kenya", &rows);
        assert_eq!(total_for(&totals, YearRange::From2021To2024), dec!(100));
    }

    #[test]
    fn area_items_dedupe_project_per_area() {
        let rows = vec![
            TaggedProjectRow {
                project_id: 1,
                year: Some(2021),
                total_amount: Some(dec!(100)),
                area: PriorityArea::P1,
            },
            TaggedProjectRow {
                project_id: 1,
                year: Some(2021),
                total_amount: Some(dec!(100)),
                area: PriorityArea::P1,
            },
            TaggedProjectRow {
                project_id: 2,
                year: Some(2025),
                total_amount: Some(dec!(40)),
                area: PriorityArea::Support,
            },
        ];

        let items = engaged_area_items("Kenya", &rows);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].area, PriorityArea::P1);
        assert_eq!(items[0].year_range, YearRange::From2021To2024);
        assert_eq!(items[0].amount, dec!(100));
        assert_eq!(items[1].area, PriorityArea::Support);
        assert_eq!(items[1].year_range, YearRange::From2025To2027);
    }
}
