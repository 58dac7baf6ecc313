use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;
use crate::export::types::{ExportFormat, default_file_name};
use crate::export::{export_csv, export_json, export_xlsx};
use crate::table::{Sheet, Workbook};

/// Serializes one sheet into the payload for `format`.
pub fn export(format: ExportFormat, sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => export_csv(sheet).map(String::into_bytes),
        ExportFormat::Xlsx => export_xlsx(sheet),
        ExportFormat::Json => export_json(sheet).map(String::into_bytes),
    }
}

pub fn write_export_file(
    format: ExportFormat,
    sheet: &Sheet,
    path: &Path,
) -> Result<(), ExportError> {
    let payload = export(format, sheet)?;

    let mut file = File::create(path)?;
    file.write_all(&payload)?;

    info!(
        sheet = sheet.id(),
        format = %format,
        path = %path.display(),
        bytes = payload.len(),
        "exported sheet"
    );
    Ok(())
}

/// Exports every sheet into `dir` in workbook order.
///
/// Files are named `edited_data_tab_<id>.<ext>`; a workbook with a single sheet gets
/// plain `edited_data.<ext>`.
pub fn export_all_sheets(
    workbook: &Workbook,
    format: ExportFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::with_capacity(workbook.len());

    for sheet in workbook.sheets() {
        let tab = (workbook.len() > 1).then_some(sheet.id());
        let path = dir.join(default_file_name(format, tab));
        write_export_file(format, sheet, &path)?;
        written.push(path);
    }

    Ok(written)
}
