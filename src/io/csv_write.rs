use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::report::{ADDITIONAL_SECTION_LABEL, MAIN_SECTION_LABEL, REPORT_COLUMNS, ReportRow};

/// Writes the two report sections to `path`: a label row and the shared
/// column header ahead of each section, with one blank row between them.
/// Records vary in width, so the writer runs in flexible mode.
pub fn write_report(path: &Path, main: &[ReportRow], additional: &[ReportRow]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)?;

    writer.write_record([MAIN_SECTION_LABEL])?;
    writer.write_record(REPORT_COLUMNS)?;
    for row in main {
        writer.serialize(row)?;
    }

    // Zero-field record: a truly blank separator line, not a quoted empty field.
    writer.write_record(None::<&[u8]>)?;
    writer.write_record([ADDITIONAL_SECTION_LABEL])?;
    writer.write_record(REPORT_COLUMNS)?;
    for row in additional {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
