use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info, instrument};

use crate::aggregate::Aggregator;
use crate::error::{ReportError, Result};
use crate::io::{csv_write, excel_read};
use crate::model::RunCounters;
use crate::report;

/// Default report filename, placed inside the input directory.
pub const DEFAULT_REPORT_NAME: &str = "Mix_Report.csv";

/// Builds the delivery report: reads every workbook in `input_dir`, folds the
/// line items into the two report sections, and writes the sorted CSV to
/// `output`. Returns the run counters for the caller to present.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input_dir.display(), output = %output.display())
)]
pub fn build_report(input_dir: &Path, output: &Path) -> Result<RunCounters> {
    let inputs = discover_inputs(input_dir)?;
    info!(file_count = inputs.len(), "discovered input workbooks");

    let mut aggregator = Aggregator::new();
    for path in &inputs {
        let rows = excel_read::read_line_items(path)?;
        debug!(file = %path.display(), row_count = rows.len(), "read line items");
        aggregator.ingest_file(&rows);
    }

    let (main, additional, counters) = aggregator.into_parts();
    let main_rows = report::assemble_main(main);
    let additional_rows = report::assemble_additional(additional);
    csv_write::write_report(output, &main_rows, &additional_rows)?;
    info!(
        main_rows = main_rows.len(),
        additional_rows = additional_rows.len(),
        "report written"
    );
    Ok(counters)
}

/// Locates the `.xlsx` workbooks of the input directory, sorted by filename.
fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ReportError::MissingInputDir(input_dir.to_path_buf()));
    }

    let pattern = input_dir.join("*.xlsx");
    let mut paths = glob(&pattern.to_string_lossy())?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    paths.sort();

    if paths.is_empty() {
        return Err(ReportError::NoInputFiles(input_dir.to_path_buf()));
    }
    Ok(paths)
}
