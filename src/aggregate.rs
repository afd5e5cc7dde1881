use std::collections::HashMap;

use crate::model::{
    AdditionalMixKey, Aggregate, MainMixKey, MixClass, NormalizedRow, RawRow, RunCounters,
};
use crate::normalize::{self, RowSkip};

/// Streaming reduction of raw delivery rows into the two report sections.
///
/// Rows fold into per-key [`Aggregate`]s one at a time; the reduction is
/// associative and commutative per key, so row order within or across files
/// does not change the result.
#[derive(Debug, Default)]
pub struct Aggregator {
    main: HashMap<MainMixKey, Aggregate>,
    additional: HashMap<AdditionalMixKey, Aggregate>,
    counters: RunCounters,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every raw row of one source file into the aggregates. A file
    /// that contributed no rows is not counted as processed.
    pub fn ingest_file(&mut self, rows: &[RawRow]) {
        if rows.is_empty() {
            return;
        }
        self.counters.files_processed += 1;
        for raw in rows {
            self.ingest_row(raw);
        }
    }

    /// Normalizes and folds a single raw row, updating the skip counters on
    /// exclusion. Rows with a blank item type are dropped without counting.
    pub fn ingest_row(&mut self, raw: &RawRow) {
        match normalize::normalize_row(raw) {
            Ok(row) => self.fold(row),
            Err(RowSkip::BlankItemType) => {}
            Err(RowSkip::BlankDescription) => self.counters.skipped_blank_description += 1,
            Err(RowSkip::NonNumericQty) => self.counters.skipped_non_numeric_qty += 1,
        }
    }

    fn fold(&mut self, row: NormalizedRow) {
        match &row.class {
            MixClass::Main => {
                let key = MainMixKey {
                    location: row.location.clone(),
                    level: row.level.clone(),
                    description: row.description.clone(),
                    qty_unit: row.qty_unit.clone(),
                };
                self.counters.included_main += 1;
                self.main.entry(key).or_default().fold(&row);
            }
            MixClass::Additional(item_type) => {
                let key = AdditionalMixKey {
                    location: row.location.clone(),
                    level: row.level.clone(),
                    item_type: item_type.clone(),
                    description: row.description.clone(),
                    qty_unit: row.qty_unit.clone(),
                };
                self.counters.included_additional += 1;
                self.additional.entry(key).or_default().fold(&row);
            }
        }
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Consumes the aggregator, handing back the two section maps and the
    /// run counters.
    pub fn into_parts(
        self,
    ) -> (
        HashMap<MainMixKey, Aggregate>,
        HashMap<AdditionalMixKey, Aggregate>,
        RunCounters,
    ) {
        (self.main, self.additional, self.counters)
    }
}
