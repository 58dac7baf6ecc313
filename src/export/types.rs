use std::fmt;
use std::str::FromStr;

use crate::table::SheetId;

const FILE_STEM: &str = "edited_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }

    /// Whether the payload is UTF-8 text that can go straight to a terminal.
    pub fn is_text(self) -> bool {
        !matches!(self, ExportFormat::Xlsx)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("unknown export format: {}", s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `edited_data.<ext>`, or `edited_data_tab_<id>.<ext>` when a tab is given.
pub fn default_file_name(format: ExportFormat, tab: Option<SheetId>) -> String {
    match tab {
        Some(id) => format!("{}_tab_{}.{}", FILE_STEM, id, format.extension()),
        None => format!("{}.{}", FILE_STEM, format.extension()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        assert_eq!(default_file_name(ExportFormat::Csv, None), "edited_data.csv");
        assert_eq!(
            default_file_name(ExportFormat::Xlsx, Some(2)),
            "edited_data_tab_2.xlsx"
        );
        assert_eq!(
            default_file_name(ExportFormat::Json, Some(10)),
            "edited_data_tab_10.json"
        );
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse(), Ok(ExportFormat::Csv));
        assert_eq!("excel".parse(), Ok(ExportFormat::Xlsx));
        assert_eq!("json".parse(), Ok(ExportFormat::Json));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
