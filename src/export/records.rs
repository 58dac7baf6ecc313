use crate::error::ExportError;
use crate::table::Sheet;

/// Pretty-printed JSON array with one object per row.
///
/// Each object carries exactly the keys its row has, in the row's own order. Rows are
/// not padded out to the schema.
pub fn export_json(sheet: &Sheet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(sheet.rows())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Workbook;
    use serde_json::{Value, json};

    #[test]
    fn test_export_keeps_row_key_order() {
        let mut wb = Workbook::new();
        let id = wb.create_sheet("t");
        wb.update_sheet(id, |s| {
            s.add_column("b")
                .add_column("a")
                .add_row()
                .edit_cell(0, "a", "1")
        })
        .unwrap();

        let out = export_json(wb.sheet(id).unwrap()).unwrap();
        assert!(out.find("\"b\"").unwrap() < out.find("\"a\"").unwrap());

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!([{ "b": "", "a": "1" }]));
    }

    #[test]
    fn test_export_empty_sheet() {
        let mut wb = Workbook::new();
        let id = wb.create_sheet("t");
        assert_eq!(export_json(wb.sheet(id).unwrap()).unwrap(), "[]");
    }
}
