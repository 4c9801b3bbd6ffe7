use crate::domain::model::InputRecord;
use crate::utils::error::{EtlError, Result};
use serde_json::error::Category;
use std::io::BufRead;

/// Read every non-blank line of `reader` as one record.
///
/// All or nothing: the first bad line aborts the load with its 1-based line
/// number. Invalid JSON is a [`EtlError::ParseError`]; valid JSON that is not
/// an object or lacks `categories`/`coordinates` is a [`EtlError::SchemaError`].
pub fn load_records<R: BufRead>(mut reader: R) -> Result<Vec<InputRecord>> {
    let mut records = Vec::new();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    // Bytes, not `lines()`: invalid UTF-8 must fail as a bad line, not a bad file.
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let text = buffer.trim_ascii();
        if text.is_empty() {
            continue;
        }

        let mut record = parse_record(text, line_number)?;
        record.line = line_number;
        records.push(record);
    }

    tracing::debug!("Loaded {} records", records.len());
    Ok(records)
}

fn parse_record(text: &[u8], line: usize) -> Result<InputRecord> {
    serde_json::from_slice::<InputRecord>(text).map_err(|source| match source.classify() {
        Category::Data => EtlError::SchemaError {
            line,
            alias: alias_hint(text),
            message: source.to_string(),
        },
        Category::Syntax | Category::Eof | Category::Io => EtlError::ParseError { line, source },
    })
}

// Best effort: the line parsed as JSON, so re-read it loosely for an alias.
fn alias_hint(text: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(text).ok()?;
    value.get("alias")?.as_str().map(str::to_string)
}
