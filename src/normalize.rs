use crate::model::{CellValue, MixClass, NormalizedRow, RawRow};

/// Item type marking a primary concrete delivery, reported under "Main Mixes".
pub const MAIN_MIX_ITEM_TYPE: &str = "Mix Customer";
/// Placeholder for grouping fields that are blank in the source data.
pub const UNKNOWN: &str = "Unknown";

/// Why a raw row was excluded from the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// Blank item type. Dropped without counting.
    BlankItemType,
    /// Blank item description.
    BlankDescription,
    /// Quantity that did not parse as a number.
    NonNumericQty,
}

/// Interprets a cell as a decimal number. Text is trimmed and may carry
/// thousands separators; anything unparsable yields `None`, never an error.
pub fn parse_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(number) => Some(*number),
        CellValue::Text(text) => parse_decimal(text),
        CellValue::Missing => None,
    }
}

/// Parses decimal text, trimming whitespace and tolerating thousands
/// separators. Blank or unparsable text yields `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', "").parse::<f64>().ok()
}

/// Interprets a cell as trimmed text, substituting `fallback` for missing or
/// blank cells. Numeric cells are rendered through their display form.
pub fn normalize_text(value: &CellValue, fallback: &str) -> String {
    match value {
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        }
        CellValue::Number(number) => number.to_string(),
        CellValue::Missing => fallback.to_string(),
    }
}

/// Interprets a cell as a building level. Numeric levels with no fractional
/// part render as plain integers so `2.0` and `"2"` group together.
pub fn normalize_level(value: &CellValue) -> String {
    match value {
        CellValue::Number(number) if number.fract() == 0.0 => format!("{}", *number as i64),
        CellValue::Number(number) => number.to_string(),
        CellValue::Text(_) | CellValue::Missing => normalize_text(value, UNKNOWN),
    }
}

/// Derives the cost of one row: a positive raw cost wins verbatim, otherwise
/// the unit rate extends over the quantity (which may legitimately produce a
/// zero or negative cost), otherwise the row carries no cost data.
pub fn derive_cost(qty_value: f64, cost: Option<f64>, unit_rate: Option<f64>) -> Option<f64> {
    match (cost, unit_rate) {
        (Some(cost), _) if cost > 0.0 => Some(cost),
        (_, Some(rate)) => Some(qty_value * rate),
        _ => None,
    }
}

/// Validates and normalizes one raw row, or reports why it is excluded.
/// Exclusion checks short-circuit in order: item type, description, quantity.
pub fn normalize_row(raw: &RawRow) -> Result<NormalizedRow, RowSkip> {
    let item_type = normalize_text(&raw.item_type, "");
    if item_type.is_empty() {
        return Err(RowSkip::BlankItemType);
    }

    let description = normalize_text(&raw.description, "");
    if description.is_empty() {
        return Err(RowSkip::BlankDescription);
    }

    let Some(qty_value) = parse_number(&raw.qty_value) else {
        return Err(RowSkip::NonNumericQty);
    };

    let cost = derive_cost(
        qty_value,
        parse_number(&raw.cost),
        parse_number(&raw.unit_rate),
    );

    let class = if item_type == MAIN_MIX_ITEM_TYPE {
        MixClass::Main
    } else {
        MixClass::Additional(item_type)
    };

    Ok(NormalizedRow {
        class,
        description,
        qty_value,
        qty_unit: normalize_text(&raw.qty_unit, UNKNOWN),
        location: normalize_text(&raw.location, UNKNOWN),
        level: normalize_level(&raw.level),
        ticket_no: normalize_text(&raw.ticket_no, ""),
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn parse_number_accepts_numeric_and_separated_text() {
        assert_eq!(parse_number(&CellValue::Number(12.5)), Some(12.5));
        assert_eq!(parse_number(&text("  42 ")), Some(42.0));
        assert_eq!(parse_number(&text("1,234.5")), Some(1234.5));
    }

    #[test]
    fn parse_number_rejects_blank_and_garbage() {
        assert_eq!(parse_number(&CellValue::Missing), None);
        assert_eq!(parse_number(&text("   ")), None);
        assert_eq!(parse_number(&text("N/A")), None);
    }

    #[test]
    fn normalize_level_renders_integral_numbers_without_decimals() {
        assert_eq!(normalize_level(&CellValue::Number(2.0)), "2");
        assert_eq!(normalize_level(&CellValue::Number(2.5)), "2.5");
        assert_eq!(normalize_level(&text(" Roof ")), "Roof");
        assert_eq!(normalize_level(&CellValue::Missing), "Unknown");
        assert_eq!(normalize_level(&text("")), "Unknown");
    }

    #[test]
    fn derive_cost_prefers_positive_raw_cost() {
        assert_eq!(derive_cost(5.0, Some(100.0), Some(25.0)), Some(100.0));
        assert_eq!(derive_cost(5.0, Some(100.0), None), Some(100.0));
    }

    #[test]
    fn derive_cost_falls_back_to_unit_rate() {
        assert_eq!(derive_cost(5.0, None, Some(25.0)), Some(125.0));
        assert_eq!(derive_cost(5.0, Some(0.0), Some(25.0)), Some(125.0));
        // Zero or negative rates pass through unclamped.
        assert_eq!(derive_cost(5.0, Some(-3.0), Some(0.0)), Some(0.0));
        assert_eq!(derive_cost(5.0, None, Some(-2.0)), Some(-10.0));
    }

    #[test]
    fn derive_cost_absent_when_no_cost_data() {
        assert_eq!(derive_cost(5.0, None, None), None);
        assert_eq!(derive_cost(5.0, Some(0.0), None), None);
        assert_eq!(derive_cost(5.0, Some(-1.0), None), None);
    }

    fn raw_row(item_type: &str, description: &str, qty: &str) -> RawRow {
        RawRow {
            item_type: text(item_type),
            description: text(description),
            qty_value: text(qty),
            qty_unit: CellValue::Missing,
            unit_rate: CellValue::Missing,
            cost: CellValue::Missing,
            location: CellValue::Missing,
            level: CellValue::Missing,
            ticket_no: CellValue::Missing,
        }
    }

    #[test]
    fn normalize_row_applies_exclusions_in_order() {
        assert_eq!(
            normalize_row(&raw_row("  ", "30MPa", "bad")),
            Err(RowSkip::BlankItemType)
        );
        assert_eq!(
            normalize_row(&raw_row("Mix Customer", "  ", "bad")),
            Err(RowSkip::BlankDescription)
        );
        assert_eq!(
            normalize_row(&raw_row("Mix Customer", "30MPa", "bad")),
            Err(RowSkip::NonNumericQty)
        );
    }

    #[test]
    fn normalize_row_classifies_and_defaults() {
        let row = normalize_row(&raw_row("Mix Customer", " 30MPa ", "5")).unwrap();
        assert_eq!(row.class, MixClass::Main);
        assert_eq!(row.description, "30MPa");
        assert_eq!(row.qty_value, 5.0);
        assert_eq!(row.qty_unit, "Unknown");
        assert_eq!(row.location, "Unknown");
        assert_eq!(row.level, "Unknown");
        assert_eq!(row.ticket_no, "");
        assert_eq!(row.cost, None);

        let row = normalize_row(&raw_row("Pump Charge", "Line pump", "1")).unwrap();
        assert_eq!(row.class, MixClass::Additional("Pump Charge".to_string()));
    }
}
