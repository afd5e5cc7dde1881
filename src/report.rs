use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::model::{AdditionalMixKey, Aggregate, MainMixKey};
use crate::normalize::{MAIN_MIX_ITEM_TYPE, parse_decimal};

/// Label row opening the "Main Mixes" section.
pub const MAIN_SECTION_LABEL: &str = "Main Mixes";
/// Label row opening the "Additional Mixes" section.
pub const ADDITIONAL_SECTION_LABEL: &str = "Additional Mixes";

/// Column headers shared by both report sections.
pub const REPORT_COLUMNS: [&str; 9] = [
    "Level",
    "Location",
    "Item Type",
    "Mix Description",
    "Ticket Count",
    "Total Qty",
    "Qty Unit",
    "Unit Rate",
    "Total Cost",
];

/// One rendered report row. Monetary and quantity fields are preformatted to
/// two decimals; absent values render as empty fields rather than zeroes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub level: String,
    pub location: String,
    pub item_type: String,
    pub description: String,
    pub ticket_count: u64,
    pub total_qty: String,
    pub qty_unit: String,
    pub avg_unit_rate: String,
    pub total_cost: String,
}

/// Orders the "Main Mixes" aggregates and renders them as report rows.
pub fn assemble_main(aggregates: HashMap<MainMixKey, Aggregate>) -> Vec<ReportRow> {
    let mut entries: Vec<_> = aggregates.into_iter().collect();
    entries.sort_by(|(lhs, _), (rhs, _)| {
        compare_levels(&lhs.level, &rhs.level)
            .then_with(|| lhs.location.cmp(&rhs.location))
            .then_with(|| lhs.description.cmp(&rhs.description))
            .then_with(|| lhs.qty_unit.cmp(&rhs.qty_unit))
    });
    entries
        .into_iter()
        .map(|(key, aggregate)| {
            render_row(
                key.level,
                key.location,
                MAIN_MIX_ITEM_TYPE.to_string(),
                key.description,
                key.qty_unit,
                &aggregate,
            )
        })
        .collect()
}

/// Orders the "Additional Mixes" aggregates and renders them as report rows.
pub fn assemble_additional(aggregates: HashMap<AdditionalMixKey, Aggregate>) -> Vec<ReportRow> {
    let mut entries: Vec<_> = aggregates.into_iter().collect();
    entries.sort_by(|(lhs, _), (rhs, _)| {
        compare_levels(&lhs.level, &rhs.level)
            .then_with(|| lhs.location.cmp(&rhs.location))
            .then_with(|| lhs.item_type.cmp(&rhs.item_type))
            .then_with(|| lhs.description.cmp(&rhs.description))
            .then_with(|| lhs.qty_unit.cmp(&rhs.qty_unit))
    });
    entries
        .into_iter()
        .map(|(key, aggregate)| {
            render_row(
                key.level,
                key.location,
                key.item_type,
                key.description,
                key.qty_unit,
                &aggregate,
            )
        })
        .collect()
}

/// Orders building levels: numeric levels first by value, then textual levels
/// lexicographically.
pub fn compare_levels(lhs: &str, rhs: &str) -> Ordering {
    match (parse_decimal(lhs), parse_decimal(rhs)) {
        (Some(lhs_value), Some(rhs_value)) => {
            lhs_value.total_cmp(&rhs_value).then_with(|| lhs.cmp(rhs))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => lhs.cmp(rhs),
    }
}

fn render_row(
    level: String,
    location: String,
    item_type: String,
    description: String,
    qty_unit: String,
    aggregate: &Aggregate,
) -> ReportRow {
    // cost_count gates cost reporting: with no contributing rows the totals
    // render blank instead of 0.00.
    let total_cost = (aggregate.cost_count > 0).then_some(aggregate.total_cost);
    let avg_unit_rate = match total_cost {
        Some(cost) if aggregate.total_qty > 0.0 => Some(cost / aggregate.total_qty),
        _ => None,
    };

    ReportRow {
        level,
        location,
        item_type,
        description,
        ticket_count: aggregate.ticket_set.len() as u64,
        total_qty: format_amount(Some(aggregate.total_qty)),
        qty_unit,
        avg_unit_rate: format_amount(avg_unit_rate),
        total_cost: format_amount(total_cost),
    }
}

/// Renders a number to exactly two decimal places; absent values render as an
/// empty field.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => String::new(),
    }
}
