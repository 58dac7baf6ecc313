use crate::error::ExportError;
use crate::table::Sheet;

/// Header line from the schema, then one line per row in schema order.
///
/// Columns a row lacks are written as empty fields. A sheet without columns exports as
/// an empty string.
pub fn export_csv(sheet: &Sheet) -> Result<String, ExportError> {
    let schema = sheet.schema();
    if schema.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(schema.iter())?;
    for row in sheet.rows() {
        writer.write_record(row.values_in(schema))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
