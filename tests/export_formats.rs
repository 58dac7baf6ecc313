use calamine::{Data, Range, Reader, Xlsx};
use csv_tabs::export::{
    ExportFormat, WORKSHEET_NAME, export, export_all_sheets, export_xlsx, write_export_file,
};
use csv_tabs::import::ParseOptions;
use csv_tabs::{SheetId, Workbook};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn sample() -> (Workbook, SheetId) {
    let mut wb = Workbook::new();
    let id = wb.create_sheet("people");
    wb.import_into(
        id,
        "name,age\nAda,36\nLinus,54\nGrace\n",
        &ParseOptions::default(),
    )
    .unwrap();
    wb.update_sheet(id, |s| Ok(s.add_column("note"))).unwrap();
    wb.update_sheet(id, |s| s.edit_cell(1, "note", "kernel")).unwrap();
    (wb, id)
}

fn read_xlsx(bytes: Vec<u8>) -> (Vec<String>, Range<Data>) {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let names = workbook.sheet_names().to_vec();
    let range = workbook.worksheet_range(WORKSHEET_NAME).unwrap();
    (names, range)
}

fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => panic!("unexpected cell {:?}", other),
    }
}

#[test]
fn xlsx_has_one_sheet_with_header_and_rows_in_schema_order() {
    let (wb, id) = sample();
    let (names, range) = read_xlsx(export_xlsx(wb.sheet(id).unwrap()).unwrap());

    assert_eq!(names, vec![WORKSHEET_NAME.to_string()]);

    let grid: Vec<Vec<String>> = (0..4)
        .map(|r| (0..3).map(|c| text(&range, r, c)).collect())
        .collect();
    assert_eq!(
        grid,
        vec![
            vec!["name", "age", "note"],
            vec!["Ada", "36", ""],
            vec!["Linus", "54", "kernel"],
            vec!["Grace", "", ""],
        ]
    );
}

#[test]
fn numbers_stay_text_in_xlsx() {
    let (wb, id) = sample();
    let (_, range) = read_xlsx(export_xlsx(wb.sheet(id).unwrap()).unwrap());

    assert_eq!(range.get_value((1, 1)), Some(&Data::String("36".to_string())));
}

#[test]
fn exports_are_deterministic() {
    let (wb, id) = sample();
    let sheet = wb.sheet(id).unwrap();

    for format in [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Json] {
        assert_eq!(
            export(format, sheet).unwrap(),
            export(format, sheet).unwrap(),
            "{} export differs between runs",
            format
        );
    }
}

#[test]
fn write_export_file_writes_payload() {
    let (wb, id) = sample();
    let sheet = wb.sheet(id).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_export_file(ExportFormat::Csv, sheet, &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "name,age,note\nAda,36,\nLinus,54,kernel\nGrace,,\n"
    );
}

#[test]
fn export_all_sheets_uses_tab_suffix_for_multiple_sheets() {
    let (mut wb, _) = sample();
    let second = wb.create_sheet("empty");
    let dir = tempfile::tempdir().unwrap();

    let written = export_all_sheets(&wb, ExportFormat::Json, dir.path()).unwrap();

    assert_eq!(
        written,
        vec![
            dir.path().join("edited_data_tab_1.json"),
            dir.path().join(format!("edited_data_tab_{}.json", second)),
        ]
    );
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "[]");
}

#[test]
fn export_all_sheets_single_sheet_uses_plain_name() {
    let (wb, _) = sample();
    let dir = tempfile::tempdir().unwrap();

    let written = export_all_sheets(&wb, ExportFormat::Xlsx, dir.path()).unwrap();

    assert_eq!(written, vec![dir.path().join("edited_data.xlsx")]);
    let bytes = std::fs::read(&written[0]).unwrap();
    let (_, range) = read_xlsx(bytes);
    assert_eq!(text(&range, 0, 0), "name");
}
