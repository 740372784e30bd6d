//! Response assembler for the section-2 payloads.

use crate::breakdown::aggregate::total_for;
use crate::breakdown::normalizer::{percentage_of, TotalBasis};
use crate::model::funding::{
    ActionItem, CadItem, CountryTotal, FundingItem, FundingSource, NormalizedCountryResponse,
    NormalizedPrioritySet, PriorityTitles,
};
use crate::model::year_range::{YearRange, SUB_PERIODS};
use rust_decimal::Decimal;

/// Keeps CAD items of the requested range.
///
/// No range, or the full 2021-2027 horizon, keeps every item.
pub fn filter_cad_items(items: Vec<CadItem>, range: Option<YearRange>) -> Vec<CadItem> {
    match range {
        None | Some(YearRange::From2021To2027) => items,
        Some(range) => items
            .into_iter()
            .filter(|item| item.year_range == range)
            .collect(),
    }
}

/// Keeps action items whose range equals the requested one.
///
/// Action items carry their own full-horizon rows, so 2021-2027 matches
/// those rows only. No range keeps everything.
pub fn filter_action_items(items: Vec<ActionItem>, range: Option<YearRange>) -> Vec<ActionItem> {
    match range {
        None => items,
        Some(range) => items
            .into_iter()
            .filter(|item| item.year_range == range)
            .collect(),
    }
}

/// Packages both normalized sets and the chart lists for one country.
pub fn assemble_response(
    country: &str,
    engage: NormalizedPrioritySet,
    projected: NormalizedPrioritySet,
    cad_items: Vec<CadItem>,
    action_items: Vec<ActionItem>,
    range: Option<YearRange>,
) -> NormalizedCountryResponse {
    NormalizedCountryResponse {
        country: country.to_string(),
        engage,
        projected,
        cad_data_chart2: filter_cad_items(cad_items, range),
        action_data_chart3: filter_action_items(action_items, range),
    }
}

/// Titles the raw area items of one country and sets each item's share.
///
/// Engaged shares are taken against the project total of the sub-period,
/// projected shares against the sub-period's own sum. No `Unknown` row is
/// added; the residual only exists in the normalized view.
pub fn chart_items(
    source: FundingSource,
    mut items: Vec<FundingItem>,
    totals: &[CountryTotal],
    titles: &PriorityTitles,
) -> Vec<FundingItem> {
    for range in SUB_PERIODS {
        let total = match TotalBasis::for_source(source, total_for(totals, range)) {
            TotalBasis::GroundTruth(total) => total,
            TotalBasis::OwnSum => items
                .iter()
                .filter(|item| item.year_range == range)
                .map(|item| item.amount.max(Decimal::ZERO))
                .sum(),
        };
        for item in items.iter_mut().filter(|item| item.year_range == range) {
            item.percentage = percentage_of(item.amount, total);
        }
    }

    for item in &mut items {
        item.title = titles.title_for(item.area).map(str::to_string);
    }
    items
}
