use tracing::{debug, info};

use crate::error::SheetError;
use crate::import::{self, ParseOptions, ParsedTable};
use crate::table::{Sheet, SheetId};

/// Ordered collection of independent sheets plus the active selection.
#[derive(Clone, Debug)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active: Option<SheetId>,
    next_sheet_id: SheetId,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            active: None,
            next_sheet_id: 1,
        }
    }

    /// Appends an empty sheet and makes it active. Ids are never handed out twice,
    /// even after the sheet holding one is removed.
    pub fn create_sheet(&mut self, name: impl Into<String>) -> SheetId {
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;

        let name = name.into();
        debug!(sheet = id, name = %name, "created sheet");
        self.sheets.push(Sheet::new(id, name));
        self.active = Some(id);
        id
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_ids(&self) -> Vec<SheetId> {
        self.sheets.iter().map(Sheet::id).collect()
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn position(&self, id: SheetId) -> Option<usize> {
        self.sheets.iter().position(|s| s.id() == id)
    }

    pub fn sheet(&self, id: SheetId) -> Result<&Sheet, SheetError> {
        self.sheets
            .iter()
            .find(|s| s.id() == id)
            .ok_or(SheetError::UnknownSheet(id))
    }

    pub fn active_id(&self) -> Option<SheetId> {
        self.active
    }

    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.active.and_then(|id| self.sheet(id).ok())
    }

    pub fn set_active(&mut self, id: SheetId) -> Result<(), SheetError> {
        self.sheet(id)?;
        self.active = Some(id);
        Ok(())
    }

    /// Stores a new state for sheet `id` at the same position.
    pub fn replace_sheet(&mut self, id: SheetId, sheet: Sheet) -> Result<(), SheetError> {
        if sheet.id() != id {
            return Err(SheetError::SheetMismatch {
                expected: id,
                found: sheet.id(),
            });
        }

        let index = self.position(id).ok_or(SheetError::UnknownSheet(id))?;
        self.sheets[index] = sheet;
        Ok(())
    }

    /// Applies a sheet operation and persists its result.
    pub fn update_sheet<F>(&mut self, id: SheetId, op: F) -> Result<(), SheetError>
    where
        F: FnOnce(&Sheet) -> Result<Sheet, SheetError>,
    {
        let updated = op(self.sheet(id)?)?;
        self.replace_sheet(id, updated)
    }

    /// Parses `raw` and populates sheet `id` with the result.
    pub fn import_into(
        &mut self,
        id: SheetId,
        raw: &str,
        options: &ParseOptions,
    ) -> Result<(), SheetError> {
        let table = import::parse_reader(raw.as_bytes(), options)?;
        self.populate_sheet(id, table)
    }

    /// Replaces schema and rows of sheet `id` with an already parsed table.
    pub fn populate_sheet(&mut self, id: SheetId, table: ParsedTable) -> Result<(), SheetError> {
        let (columns, rows) = (table.schema.len(), table.rows.len());
        self.update_sheet(id, |sheet| Ok(sheet.populate(table)))?;
        info!(sheet = id, columns, rows, "imported delimited text");
        Ok(())
    }

    pub fn rename_sheet(&mut self, id: SheetId, name: impl Into<String>) -> Result<(), SheetError> {
        let name = name.into();
        self.update_sheet(id, |sheet| Ok(sheet.with_name(name)))
    }

    /// Removes sheet `id` and returns it.
    ///
    /// When the active sheet goes, the one before it becomes active, or the one after it
    /// if it was first. Removing the last sheet leaves no active sheet.
    pub fn remove_sheet(&mut self, id: SheetId) -> Result<Sheet, SheetError> {
        let index = self.position(id).ok_or(SheetError::UnknownSheet(id))?;
        let removed = self.sheets.remove(index);

        if self.active == Some(id) {
            self.active = if self.sheets.is_empty() {
                None
            } else {
                Some(self.sheets[index.saturating_sub(1)].id())
            };
        }

        debug!(sheet = id, active = ?self.active, "removed sheet");
        Ok(removed)
    }
}
