use tracing::debug;

use crate::error::SheetError;
use crate::import::ParsedTable;
use crate::table::{Row, Schema, SheetId};

/// One independently editable table.
///
/// Every edit takes `&self` and hands back the edited sheet; the receiver is left
/// untouched. Persist the result with [`crate::table::Workbook::replace_sheet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sheet {
    id: SheetId,
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Sheet {
    pub(crate) fn new(id: SheetId, name: String) -> Self {
        Self {
            id,
            name,
            schema: Schema::new(),
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// True when the sheet has no columns. Callers decide how to present that.
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Replaces schema and rows with an imported table in one shot.
    pub fn populate(&self, table: ParsedTable) -> Sheet {
        Sheet {
            id: self.id,
            name: self.name.clone(),
            schema: table.schema,
            rows: table.rows,
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Sheet {
        Sheet {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn add_row(&self) -> Sheet {
        let mut sheet = self.clone();
        sheet.rows.push(Row::materialize(&sheet.schema));
        sheet
    }

    pub fn remove_row(&self, index: usize) -> Result<Sheet, SheetError> {
        self.check_row(index)?;

        let mut sheet = self.clone();
        sheet.rows.remove(index);
        Ok(sheet)
    }

    pub fn edit_cell(
        &self,
        row: usize,
        column: &str,
        value: impl Into<String>,
    ) -> Result<Sheet, SheetError> {
        self.check_row(row)?;
        if !self.schema.contains(column) {
            return Err(SheetError::UnknownColumn(column.to_string()));
        }

        let mut sheet = self.clone();
        sheet.rows[row].set(column, value.into());
        Ok(sheet)
    }

    /// Appends a column and gives every existing row an empty value for it.
    ///
    /// An empty name or one already in the schema leaves the sheet unchanged.
    pub fn add_column(&self, name: &str) -> Sheet {
        if name.is_empty() || self.schema.contains(name) {
            debug!(sheet = self.id, column = name, "column not added");
            return self.clone();
        }

        let mut sheet = self.clone();
        sheet.schema.push(name.to_string());
        for row in &mut sheet.rows {
            row.set(name, String::new());
        }
        sheet
    }

    fn check_row(&self, index: usize) -> Result<(), SheetError> {
        if index >= self.rows.len() {
            return Err(SheetError::RowIndex {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}
