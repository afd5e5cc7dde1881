use std::collections::HashMap;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::warn;

use crate::error::Result;
use crate::model::{CellValue, RawRow};

/// Name of the worksheet holding delivery line items.
pub const LINE_ITEMS_SHEET: &str = "LineItems";

/// Column headers a workbook must carry to take part in the report.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Item Type",
    "Item Description",
    "Qty Value",
    "Qty Unit",
    "Unit Rate",
    "Cost",
    "Location",
    "Level",
    "Ticket No.",
];

/// Reads the delivery line items of one workbook.
///
/// A workbook without the expected sheet, with an empty sheet, or with one or
/// more required columns missing is logged and yields no rows so the caller
/// can continue with the remaining files. Read failures on an openable file
/// still propagate as errors.
pub fn read_line_items(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = match workbook.worksheet_range(LINE_ITEMS_SHEET) {
        Some(range_result) => range_result?,
        None => {
            warn!(file = %path.display(), "skipping workbook: no LineItems sheet");
            return Ok(Vec::new());
        }
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        warn!(file = %path.display(), "skipping workbook: empty LineItems sheet");
        return Ok(Vec::new());
    };

    let header_map = map_headers(header);
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !header_map.contains_key(*column))
        .collect();
    if !missing.is_empty() {
        warn!(
            file = %path.display(),
            columns = ?missing,
            "skipping workbook: missing required columns"
        );
        return Ok(Vec::new());
    }

    Ok(rows.map(|row| raw_row(row, &header_map)).collect())
}

/// Maps trimmed header text to column position. The first occurrence wins
/// when a header repeats.
fn map_headers(header: &[DataType]) -> HashMap<String, usize> {
    let mut header_map = HashMap::new();
    for (idx, cell) in header.iter().enumerate() {
        let name = cell_to_string(cell);
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        header_map.entry(name.to_string()).or_insert(idx);
    }
    header_map
}

fn raw_row(row: &[DataType], header_map: &HashMap<String, usize>) -> RawRow {
    let field = |name: &str| {
        header_map
            .get(name)
            .and_then(|idx| row.get(*idx))
            .map(cell_value)
            .unwrap_or(CellValue::Missing)
    };

    RawRow {
        item_type: field("Item Type"),
        description: field("Item Description"),
        qty_value: field("Qty Value"),
        qty_unit: field("Qty Unit"),
        unit_rate: field("Unit Rate"),
        cost: field("Cost"),
        location: field("Location"),
        level: field("Level"),
        ticket_no: field("Ticket No."),
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Empty => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
