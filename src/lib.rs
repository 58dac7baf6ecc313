pub mod app;
pub mod commands;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod table;

pub use error::{ExportError, SheetError};
pub use import::{ParseOptions, ParsedTable};
pub use table::{Row, Schema, Sheet, SheetId, Workbook};
