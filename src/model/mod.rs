use std::collections::BTreeSet;

/// A loosely typed cell value as handed over by the row source. Values stay
/// in this form until the normalizer decides how to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Textual cell content, untrimmed.
    Text(String),
    /// Numeric cell content.
    Number(f64),
    /// The cell is empty or the row is too short to contain it.
    Missing,
}

/// One delivery line item exactly as read from a workbook row, before any
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub item_type: CellValue,
    pub description: CellValue,
    pub qty_value: CellValue,
    pub qty_unit: CellValue,
    pub unit_rate: CellValue,
    pub cost: CellValue,
    pub location: CellValue,
    pub level: CellValue,
    pub ticket_no: CellValue,
}

/// Which report section a line item belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixClass {
    /// A `Mix Customer` line item, reported under "Main Mixes".
    Main,
    /// Any other item type (pump charges, surcharges, ...), reported under
    /// "Additional Mixes". Carries the item type verbatim.
    Additional(String),
}

/// A validated line item ready to be folded into an aggregate. `cost` is the
/// derived cost (raw cost when positive, otherwise quantity times unit rate),
/// or `None` when the row has no usable cost data.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub class: MixClass,
    pub description: String,
    pub qty_value: f64,
    pub qty_unit: String,
    pub location: String,
    pub level: String,
    pub ticket_no: String,
    pub cost: Option<f64>,
}

/// Grouping key for the "Main Mixes" section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MainMixKey {
    pub location: String,
    pub level: String,
    pub description: String,
    pub qty_unit: String,
}

/// Grouping key for the "Additional Mixes" section. Unlike the main section
/// the item type takes part in the grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdditionalMixKey {
    pub location: String,
    pub level: String,
    pub item_type: String,
    pub description: String,
    pub qty_unit: String,
}

/// Running totals for one grouping key. Created as the zero value on first
/// access and mutated in place as rows fold in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Sum of quantity over every folded row.
    pub total_qty: f64,
    /// Sum of derived cost over the rows that had one. Only meaningful when
    /// `cost_count > 0`; the report renders a blank otherwise.
    pub total_cost: f64,
    /// Number of rows that contributed to `total_cost`.
    pub cost_count: u32,
    /// Distinct non-empty delivery ticket numbers.
    pub ticket_set: BTreeSet<String>,
}

impl Aggregate {
    /// Folds one normalized row into the running totals. Repeated ticket
    /// numbers count once.
    pub fn fold(&mut self, row: &NormalizedRow) {
        self.total_qty += row.qty_value;
        if let Some(cost) = row.cost {
            self.total_cost += cost;
            self.cost_count += 1;
        }
        if !row.ticket_no.is_empty() {
            self.ticket_set.insert(row.ticket_no.clone());
        }
    }
}

/// Per-run counters, accumulated during aggregation and reported to the user
/// once the report is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunCounters {
    /// Workbooks that contributed at least one raw row.
    pub files_processed: u64,
    /// Rows folded into the "Main Mixes" section.
    pub included_main: u64,
    /// Rows folded into the "Additional Mixes" section.
    pub included_additional: u64,
    /// Rows dropped for a blank item description.
    pub skipped_blank_description: u64,
    /// Rows dropped for a quantity that did not parse as a number.
    pub skipped_non_numeric_qty: u64,
}
