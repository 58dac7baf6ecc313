use thiserror::Error;

use crate::table::SheetId;

/// Errors raised by the in-memory table model and the import adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("failed to parse delimited input{}: {reason}", line_suffix(.line))]
    Parse { line: Option<u64>, reason: String },
    #[error("no sheet with id {0}")]
    UnknownSheet(SheetId),
    #[error("no column named {0:?}")]
    UnknownColumn(String),
    #[error("row index {index} out of range (sheet has {len} rows)")]
    RowIndex { index: usize, len: usize },
    #[error("sheet {found} cannot replace sheet {expected}")]
    SheetMismatch { expected: SheetId, found: SheetId },
}

/// Errors raised while serializing a sheet.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv export produced invalid UTF-8")]
    CsvEncoding(#[from] std::string::FromUtf8Error),
    #[error("excel export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_includes_line() {
        let err = SheetError::Parse {
            line: Some(3),
            reason: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse delimited input at line 3: bad");

        let err = SheetError::Parse {
            line: None,
            reason: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse delimited input: bad");
    }

    #[test]
    fn test_row_index_message() {
        let err = SheetError::RowIndex { index: 4, len: 2 };
        assert_eq!(err.to_string(), "row index 4 out of range (sheet has 2 rows)");
    }
}
