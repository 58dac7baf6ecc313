use csv::ByteRecord;
use std::io::Read;
use tracing::warn;

use crate::error::SheetError;
use crate::table::{Row, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Schema and rows read from one import source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

/// Parses comma-separated text with the default options.
pub fn parse(raw: &str) -> Result<ParsedTable, SheetError> {
    parse_reader(raw.as_bytes(), &ParseOptions::default())
}

/// Parses header-first delimited text.
///
/// Header names are trimmed and kept in order, duplicates included. Only lines with no
/// characters at all are skipped as empty; values are kept verbatim. A line with fewer
/// fields than the header produces a row without the trailing columns. Lines that cannot
/// be mapped onto the header (more fields than columns, invalid UTF-8) are skipped.
/// When no data line survives, the table has no columns at all.
pub fn parse_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<ParsedTable, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = ByteRecord::new();

    if !read_record(&mut reader, &mut record)? {
        return Ok(ParsedTable::default());
    }
    let header = header_from_record(&record)?;

    let mut rows = Vec::new();
    while read_record(&mut reader, &mut record)? {
        let line = record_line(&record);
        if record.len() > header.len() {
            warn!(
                line,
                fields = record.len(),
                columns = header.len(),
                "skipping line with more fields than the header"
            );
            continue;
        }

        let fields = match record
            .iter()
            .map(std::str::from_utf8)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(fields) => fields,
            Err(e) => {
                warn!(line, error = %e, "skipping line that is not valid UTF-8");
                continue;
            }
        };

        rows.push(header.iter().zip(fields).collect::<Row>());
    }

    if rows.is_empty() {
        return Ok(ParsedTable::default());
    }

    Ok(ParsedTable {
        schema: header,
        rows,
    })
}

fn read_record<R: Read>(
    reader: &mut csv::Reader<R>,
    record: &mut ByteRecord,
) -> Result<bool, SheetError> {
    loop {
        match reader.read_byte_record(record) {
            Ok(more) => return Ok(more),
            Err(e) if e.is_io_error() => {
                return Err(SheetError::Parse {
                    line: e.position().map(|p| p.line()),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed line");
            }
        }
    }
}

fn header_from_record(record: &ByteRecord) -> Result<Schema, SheetError> {
    record
        .iter()
        .map(|field| {
            std::str::from_utf8(field)
                .map(|name| name.trim().to_string())
                .map_err(|e| SheetError::Parse {
                    line: record_line(record),
                    reason: format!("header is not valid UTF-8: {}", e),
                })
        })
        .collect()
}

fn record_line(record: &ByteRecord) -> Option<u64> {
    record.position().map(|p| p.line())
}
