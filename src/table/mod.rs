mod row;
mod schema;
mod sheet;
mod workbook;

pub use row::Row;
pub use schema::Schema;
pub use sheet::Sheet;
pub use workbook::Workbook;

/// Stable sheet identity handed out by a [`Workbook`].
pub type SheetId = u32;
