use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook as XlsxWorkbook, XlsxError};

use crate::error::ExportError;
use crate::table::Sheet;

/// Name of the single worksheet in every exported workbook.
pub const WORKSHEET_NAME: &str = "Sheet1";

/// Writes the sheet as a one-worksheet xlsx file and returns its bytes.
///
/// Row 0 holds the column names, data follows in schema order. Every value is written as
/// a string; empty values and columns a row lacks are left blank.
pub fn export_xlsx(sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
    let mut workbook = XlsxWorkbook::new();

    // Pin the creation timestamp so identical sheets give identical bytes.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    {
        let worksheet = workbook.add_worksheet().set_name(WORKSHEET_NAME)?;
        let schema = sheet.schema();

        for (col, name) in schema.iter().enumerate() {
            if !name.is_empty() {
                worksheet.write_string(0, col_index(col)?, name)?;
            }
        }

        for (row_idx, row) in sheet.rows().iter().enumerate() {
            let xlsx_row = row_index(row_idx + 1)?;
            for (col, value) in row.values_in(schema).enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet.write_string(xlsx_row, col_index(col)?, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_index(row: usize) -> Result<u32, XlsxError> {
    u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_index(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}
