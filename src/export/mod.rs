mod delimited;
mod exporters;
mod records;
mod types;
mod xlsx;

pub use delimited::export_csv;
pub use exporters::{export, export_all_sheets, write_export_file};
pub use records::export_json;
pub use types::{ExportFormat, default_file_name};
pub use xlsx::{WORKSHEET_NAME, export_xlsx};
