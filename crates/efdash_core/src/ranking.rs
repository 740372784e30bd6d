//! Section-3 rankings built from project facts and MIP rows.
//!
//! # Invariants
//! - Each ranking holds at most `TOP_LIMIT` rows, largest amount first.
//! - Ties are broken by name so output is deterministic.
//! - Country, program and agency keys are trimmed; blanks are skipped.

use crate::model::amount::{contributing_amount, parse_amount};
use crate::model::charts::{
    Section3ChartsResponse, Section3Filter, TopAgency, TopCountry, TopProgram,
};
use crate::model::funding::PriorityArea;
use crate::model::mip::MipData;
use crate::model::project::ProjectId;
use crate::repo::chart_repo::ProjectFact;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub const TOP_LIMIT: usize = 10;

/// Builds the three section-3 rankings.
///
/// `facts` must already be filtered by `filter` at the read boundary.
/// Countries that only appear in MIP rows are listed when neither a
/// category nor a department filter is set.
pub fn section3_charts(
    filter: &Section3Filter,
    facts: &[ProjectFact],
    mip_rows: &[MipData],
) -> Section3ChartsResponse {
    Section3ChartsResponse {
        top_countries: top_countries(filter, facts, mip_rows),
        top_programs: top_programs(filter, facts),
        top_agencies: top_agencies(filter, facts),
    }
}

fn top_countries(
    filter: &Section3Filter,
    facts: &[ProjectFact],
    mip_rows: &[MipData],
) -> Vec<TopCountry> {
    let year_range = filter.effective_year_range();
    let category = filter.category_label();
    // lowercase key -> (display name, engaged)
    let mut engaged: BTreeMap<String, (String, Decimal)> = BTreeMap::new();

    for fact in facts {
        let Some(country) = non_blank(fact.country.as_deref()) else {
            continue;
        };
        let entry = engaged
            .entry(country.to_lowercase())
            .or_insert_with(|| (country.to_string(), Decimal::ZERO));
        entry.1 += contributing_amount(fact.total_amount);
    }

    let mut projected: BTreeMap<String, (String, Decimal)> = BTreeMap::new();
    for row in mip_rows {
        let Some(country) = non_blank(row.country.as_deref()) else {
            continue;
        };
        let amount: Decimal = PriorityArea::KNOWN
            .iter()
            .map(|area| row.programmed_amount(*area, year_range))
            .sum();
        let entry = projected
            .entry(country.to_lowercase())
            .or_insert_with(|| (country.to_string(), Decimal::ZERO));
        entry.1 += amount;
    }

    let unfiltered = filter.category.is_none() && filter.department.is_none();
    let mut keys: BTreeSet<&String> = engaged.keys().collect();
    if unfiltered {
        keys.extend(projected.keys());
    }

    let mut rows: Vec<TopCountry> = keys
        .into_iter()
        .map(|key| {
            let engaged_entry = engaged.get(key);
            let projected_entry = projected.get(key);
            let country = engaged_entry
                .or(projected_entry)
                .map(|(name, _)| name.clone())
                .unwrap_or_default();
            TopCountry {
                country,
                engaged_amount: engaged_entry.map_or(Decimal::ZERO, |(_, amount)| *amount),
                projected_amount: projected_entry.map_or(Decimal::ZERO, |(_, amount)| *amount),
                year_range,
                category: category.clone(),
            }
        })
        .collect();

    rows.sort_by(|left, right| {
        right
            .engaged_amount
            .cmp(&left.engaged_amount)
            .then_with(|| right.projected_amount.cmp(&left.projected_amount))
            .then_with(|| left.country.cmp(&right.country))
    });
    rows.truncate(TOP_LIMIT);
    rows
}

fn top_programs(filter: &Section3Filter, facts: &[ProjectFact]) -> Vec<TopProgram> {
    let year_range = filter.effective_year_range();
    let category = filter.category_label();
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();

    for fact in facts {
        let Some(program) = non_blank(fact.action_title.as_deref()) else {
            continue;
        };
        *sums.entry(program.to_string()).or_default() += contributing_amount(fact.total_amount);
    }

    let mut rows: Vec<TopProgram> = sums
        .into_iter()
        .map(|(program, total_amount)| TopProgram {
            program,
            total_amount,
            category: category.clone(),
            year_range,
        })
        .collect();

    rows.sort_by(|left, right| {
        by_amount_then_name(
            (left.total_amount, &left.program),
            (right.total_amount, &right.program),
        )
    });
    rows.truncate(TOP_LIMIT);
    rows
}

fn top_agencies(filter: &Section3Filter, facts: &[ProjectFact]) -> Vec<TopAgency> {
    let year_range = filter.effective_year_range();
    let category = filter.category_label();
    let mut sums: BTreeMap<String, (Decimal, BTreeSet<ProjectId>)> = BTreeMap::new();

    for fact in facts {
        let Some(agency) = non_blank(fact.agency.as_deref()) else {
            continue;
        };
        let entry = sums.entry(agency.to_string()).or_default();
        if entry.1.insert(fact.project_id) {
            entry.0 += contributing_amount(fact.indirect_amount.as_deref().and_then(parse_amount));
        }
    }

    let mut rows: Vec<TopAgency> = sums
        .into_iter()
        .map(|(agency, (indirect_amount, projects))| TopAgency {
            year_range,
            agency,
            category: category.clone(),
            indirect_amount,
            project_count: u32::try_from(projects.len()).unwrap_or(u32::MAX),
        })
        .collect();

    rows.sort_by(|left, right| {
        right
            .indirect_amount
            .cmp(&left.indirect_amount)
            .then_with(|| right.project_count.cmp(&left.project_count))
            .then_with(|| left.agency.cmp(&right.agency))
    });
    rows.truncate(TOP_LIMIT);
    rows
}

/// Largest amount first, then name ascending.
fn by_amount_then_name(left: (Decimal, &str), right: (Decimal, &str)) -> Ordering {
    right.0.cmp(&left.0).then_with(|| left.1.cmp(right.1))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
