use anyhow::{Context, Result};
use std::path::Path;

use crate::app::{ExportTarget, Session};
use crate::export::ExportFormat;
use crate::table::SheetId;

pub const HELP_TEXT: &str = "\
tabnew [name]          open a new tab
tab <id>               switch to tab
tabs                   list tabs
tabrename <name>       rename the active tab
tabclose               close the active tab
import <path>          load a delimited file into the active tab
addrow                 append an empty row
delrow <n>             remove row n (1-based)
set <n> <col> <value>  set the value of column col in row n
addcol <name>          append a column
export <fmt> [path|-]  export the active tab as csv, xlsx or json
exportall <fmt>        export every tab
q                      quit";

impl Session {
    /// Runs one command line. Failures are reported as notifications.
    pub fn execute_command(&mut self, line: &str) {
        let command = line.trim();

        if command.is_empty() || command.starts_with('#') {
            return;
        }

        let (name, args) = match command.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (command, ""),
        };

        let result = match name {
            "q" | "quit" => {
                self.should_quit = true;
                Ok(())
            }
            "help" => {
                self.add_notification(HELP_TEXT.to_string());
                Ok(())
            }
            "tabnew" => self.handle_new_tab_command(args),
            "tab" => self.handle_switch_tab_command(args),
            "tabs" => {
                self.list_tabs();
                Ok(())
            }
            "tabrename" => self.handle_rename_tab_command(args),
            "tabclose" => self.handle_close_tab_command(),
            "import" => self.handle_import_command(args),
            "addrow" => self.handle_add_row_command(),
            "delrow" => self.handle_delete_row_command(args),
            "set" => self.handle_set_cell_command(args),
            "addcol" => self.handle_add_column_command(args),
            "export" => self.handle_export_command(args),
            "exportall" => self.handle_export_all_command(args),
            _ => {
                self.add_notification(format!("Unknown command: {}", command));
                Ok(())
            }
        };

        if let Err(e) = result {
            self.add_notification(format!("{} failed: {:#}", name, e));
        }
    }

    fn handle_new_tab_command(&mut self, args: &str) -> Result<()> {
        let name = (!args.is_empty()).then_some(args);
        let id = self.new_tab(name)?;
        let sheet_name = self.workbook.sheet(id)?.name().to_string();
        self.add_notification(format!("Opened tab {}: {}", id, sheet_name));
        Ok(())
    }

    fn handle_switch_tab_command(&mut self, args: &str) -> Result<()> {
        let id: SheetId = args
            .parse()
            .with_context(|| format!("Invalid tab id: {}", args))?;
        self.workbook.set_active(id)?;

        let sheet_name = self.workbook.sheet(id)?.name().to_string();
        self.add_notification(format!("Switched to tab {}: {}", id, sheet_name));
        Ok(())
    }

    fn list_tabs(&mut self) {
        if self.workbook.is_empty() {
            self.add_notification("No tabs open".to_string());
            return;
        }

        let active = self.workbook.active_id();
        let lines: Vec<String> = self
            .workbook
            .sheets()
            .iter()
            .map(|sheet| {
                let marker = if Some(sheet.id()) == active { '*' } else { ' ' };
                format!(
                    "{} {}: {} ({} columns, {} rows)",
                    marker,
                    sheet.id(),
                    sheet.name(),
                    sheet.column_count(),
                    sheet.row_count()
                )
            })
            .collect();

        self.add_notification(lines.join("\n"));
    }

    fn handle_rename_tab_command(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            anyhow::bail!("Usage: :tabrename <name>");
        }

        let id = self.active_tab()?;
        self.workbook.rename_sheet(id, args)?;
        self.add_notification(format!("Renamed tab {} to {}", id, args));
        Ok(())
    }

    fn handle_close_tab_command(&mut self) -> Result<()> {
        let Some(id) = self.workbook.active_id() else {
            anyhow::bail!("No tab to close");
        };

        let removed = self.workbook.remove_sheet(id)?;
        self.add_notification(format!("Closed tab {}: {}", id, removed.name()));
        Ok(())
    }

    fn handle_import_command(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            anyhow::bail!("Usage: :import <path>");
        }

        let id = self.active_tab()?;
        self.import_file(Path::new(args), Some(id))?;

        let sheet = self.workbook.sheet(id)?;
        let message = if sheet.is_empty() {
            format!("Imported {}: no data rows", args)
        } else {
            format!(
                "Imported {}: {} columns, {} rows",
                args,
                sheet.column_count(),
                sheet.row_count()
            )
        };
        self.add_notification(message);
        Ok(())
    }

    fn handle_add_row_command(&mut self) -> Result<()> {
        let id = self.active_tab()?;
        self.workbook.update_sheet(id, |sheet| Ok(sheet.add_row()))?;

        let rows = self.workbook.sheet(id)?.row_count();
        self.add_notification(format!("Added row {}", rows));
        Ok(())
    }

    fn handle_delete_row_command(&mut self, args: &str) -> Result<()> {
        let row = parse_row_number(args)?;
        let id = self.active_tab()?;
        self.workbook
            .update_sheet(id, |sheet| sheet.remove_row(row - 1))?;

        self.add_notification(format!("Removed row {}", row));
        Ok(())
    }

    fn handle_set_cell_command(&mut self, args: &str) -> Result<()> {
        let mut parts = args.splitn(3, char::is_whitespace);
        let (Some(row), Some(column)) = (parts.next(), parts.next()) else {
            anyhow::bail!("Usage: :set <row> <column> <value>");
        };
        let value = parts.next().unwrap_or("");

        let row = parse_row_number(row)?;
        let id = self.active_tab()?;
        self.workbook
            .update_sheet(id, |sheet| sheet.edit_cell(row - 1, column, value))?;

        self.add_notification(format!("Set row {} {} = {:?}", row, column, value));
        Ok(())
    }

    fn handle_add_column_command(&mut self, args: &str) -> Result<()> {
        let id = self.active_tab()?;
        let before = self.workbook.sheet(id)?.column_count();
        self.workbook
            .update_sheet(id, |sheet| Ok(sheet.add_column(args)))?;

        if self.workbook.sheet(id)?.column_count() > before {
            self.add_notification(format!("Added column {}", args));
        } else {
            self.add_notification(format!("Column not added: {:?}", args));
        }
        Ok(())
    }

    fn handle_export_command(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            anyhow::bail!("Usage: :export <csv|xlsx|json> [path|-]");
        }
        let (format, target) = match args.split_once(char::is_whitespace) {
            Some((format, target)) => (format, Some(target.trim())),
            None => (args, None),
        };
        let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;

        let id = self.active_tab()?;
        match self.export_tab(id, format, target)? {
            ExportTarget::File(path) => {
                self.add_notification(format!("Exported to {}", path.display()));
            }
            ExportTarget::Stdout => {}
        }
        Ok(())
    }

    fn handle_export_all_command(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            anyhow::bail!("Usage: :exportall <csv|xlsx|json>");
        }
        let format: ExportFormat = args.parse().map_err(anyhow::Error::msg)?;

        let written = self.export_all(format)?;
        self.add_notification(format!("Exported {} tabs", written.len()));
        Ok(())
    }
}

// Rows are numbered from 1 on the command line.
fn parse_row_number(input: &str) -> Result<usize> {
    match input.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row),
        _ => anyhow::bail!("Invalid row number: {}", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ParseOptions;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(std::env::temp_dir(), ParseOptions::default())
    }

    fn last(session: &Session) -> &str {
        session
            .notification_messages
            .last()
            .map(String::as_str)
            .unwrap_or("")
    }

    #[test]
    fn test_edit_commands_open_a_tab_on_demand() {
        let mut s = session();
        s.execute_command("addcol name");
        s.execute_command("addrow");
        s.execute_command("set 1 name Ada Lovelace");

        let sheet = s.workbook.active_sheet().unwrap();
        assert_eq!(sheet.name(), "Tab 1");
        assert_eq!(sheet.cell(0, "name"), Some("Ada Lovelace"));
    }

    #[test]
    fn test_delrow_is_one_based() {
        let mut s = session();
        s.execute_command("addcol n");
        for _ in 0..3 {
            s.execute_command("addrow");
        }
        s.execute_command("set 1 n first");
        s.execute_command("set 2 n second");
        s.execute_command("delrow 1");

        let sheet = s.workbook.active_sheet().unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(0, "n"), Some("second"));
    }

    #[test]
    fn test_failures_become_notifications() {
        let mut s = session();
        s.execute_command("addrow");
        s.execute_command("delrow 5");
        assert_eq!(
            last(&s),
            "delrow failed: row index 4 out of range (sheet has 1 rows)"
        );

        s.execute_command("delrow 0");
        assert_eq!(last(&s), "delrow failed: Invalid row number: 0");

        s.execute_command("set 1 missing x");
        assert_eq!(last(&s), "set failed: no column named \"missing\"");

        s.execute_command("tab 42");
        assert_eq!(last(&s), "tab failed: no sheet with id 42");

        s.execute_command("frobnicate");
        assert_eq!(last(&s), "Unknown command: frobnicate");
    }

    #[test]
    fn test_duplicate_column_is_reported_not_failed() {
        let mut s = session();
        s.execute_command("addcol a");
        s.execute_command("addcol a");
        assert_eq!(last(&s), "Column not added: \"a\"");
        assert_eq!(s.workbook.active_sheet().unwrap().column_count(), 1);
    }

    #[test]
    fn test_tab_commands() {
        let mut s = session();
        s.execute_command("tabnew sales");
        s.execute_command("tabnew");
        s.execute_command("tab 1");
        s.execute_command("tabrename q3 sales");
        s.execute_command("tabs");

        assert_eq!(last(&s), "* 1: q3 sales (0 columns, 0 rows)\n  2: Tab 2 (0 columns, 0 rows)");

        s.execute_command("tabclose");
        assert_eq!(s.workbook.active_id(), Some(2));
    }

    #[test]
    fn test_export_path_may_contain_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my export.csv");

        let mut s = session();
        s.execute_command("addcol a");
        s.execute_command(&format!("export csv {}", path.display()));

        assert_eq!(last(&s), format!("Exported to {}", path.display()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn test_notifications_are_bounded() {
        let mut s = session();
        for _ in 0..10 {
            s.execute_command("nope");
        }
        assert_eq!(s.notification_messages.len(), s.max_notifications);
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        s.execute_command("q");
        assert!(s.should_quit);
    }
}
