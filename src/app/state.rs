use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::export::{self, ExportFormat, default_file_name};
use crate::import::{self, ParseOptions};
use crate::table::{SheetId, Workbook};

/// Where an export went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(PathBuf),
    Stdout,
}

/// One editing session: the workbook being edited plus what the command layer needs
/// around it.
pub struct Session {
    pub workbook: Workbook,
    pub out_dir: PathBuf,
    pub parse_options: ParseOptions,
    pub notification_messages: Vec<String>,
    pub max_notifications: usize,
    pub should_quit: bool,
}

impl Session {
    pub fn new(out_dir: PathBuf, parse_options: ParseOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            out_dir,
            parse_options,
            notification_messages: Vec::new(),
            max_notifications: 5,
            should_quit: false,
        }
    }

    pub fn add_notification(&mut self, message: String) {
        self.notification_messages.push(message);

        if self.notification_messages.len() > self.max_notifications {
            self.notification_messages.remove(0);
        }
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notification_messages)
    }

    /// Opens a new tab and makes it active. Unnamed tabs are called `Tab <id>`.
    pub fn new_tab(&mut self, name: Option<&str>) -> Result<SheetId> {
        match name {
            Some(name) => Ok(self.workbook.create_sheet(name)),
            None => {
                let id = self.workbook.create_sheet(String::new());
                self.workbook.rename_sheet(id, format!("Tab {}", id))?;
                Ok(id)
            }
        }
    }

    /// The active tab, opening one first if the workbook is empty.
    pub fn active_tab(&mut self) -> Result<SheetId> {
        match self.workbook.active_id() {
            Some(id) => Ok(id),
            None => self.new_tab(None),
        }
    }

    /// Reads a delimited file into tab `into`, or into a new tab named after the file.
    ///
    /// The file is parsed before any tab is opened, so a failed import leaves the
    /// workbook as it was.
    pub fn import_file(&mut self, path: &Path, into: Option<SheetId>) -> Result<SheetId> {
        let file = File::open(path)
            .with_context(|| format!("Unable to read file: {}", path.display()))?;
        let table = import::parse_reader(BufReader::new(file), &self.parse_options)
            .with_context(|| format!("Unable to parse file: {}", path.display()))?;

        let id = match into {
            Some(id) => id,
            None => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("import")
                    .to_string();
                self.new_tab(Some(&stem))?
            }
        };

        self.workbook.populate_sheet(id, table)?;
        Ok(id)
    }

    /// Default path for exporting tab `id`. The `_tab_<id>` suffix is only added when
    /// more than one tab is open.
    pub fn default_export_path(&self, id: SheetId, format: ExportFormat) -> PathBuf {
        let tab = (self.workbook.len() > 1).then_some(id);
        self.out_dir.join(default_file_name(format, tab))
    }

    /// Exports tab `id`. `target` of `-` writes text formats to stdout; `None` uses
    /// [`Session::default_export_path`].
    pub fn export_tab(
        &self,
        id: SheetId,
        format: ExportFormat,
        target: Option<&str>,
    ) -> Result<ExportTarget> {
        let sheet = self.workbook.sheet(id)?;

        if target == Some("-") {
            if !format.is_text() {
                anyhow::bail!("Cannot write {} export to stdout", format);
            }
            let payload = export::export(format, sheet)?;
            let text = String::from_utf8(payload).context("Export is not valid UTF-8")?;
            println!("{}", text.trim_end_matches('\n'));
            return Ok(ExportTarget::Stdout);
        }

        let path = match target {
            Some(path) => PathBuf::from(path),
            None => self.default_export_path(id, format),
        };
        export::write_export_file(format, sheet, &path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        Ok(ExportTarget::File(path))
    }

    /// Exports every tab into the output directory.
    pub fn export_all(&self, format: ExportFormat) -> Result<Vec<PathBuf>> {
        export::export_all_sheets(&self.workbook, format, &self.out_dir)
            .with_context(|| format!("Failed to export tabs to {}", self.out_dir.display()))
    }
}
