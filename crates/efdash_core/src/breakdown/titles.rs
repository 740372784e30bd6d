//! Title resolver: priority-area display titles per country.

use crate::model::funding::PriorityTitles;
use crate::model::mip::MipData;

/// Returns the P1..P3 titles of `country` from its MIP rows.
///
/// Rows are expected in source order (ascending `ID`). When several rows
/// belong to the country, the last one wins as a whole, including its empty
/// titles. Country matching ignores case and surrounding whitespace.
pub fn resolve_titles(country: &str, rows: &[MipData]) -> PriorityTitles {
    let wanted = country.trim();
    rows.iter()
        .rev()
        .find(|row| {
            row.country
                .as_deref()
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(wanted))
        })
        .map(MipData::titles)
        .unwrap_or_default()
}
