//! LCOV tracefile parser
//!
//! Only `SF:`, `LF:`, `LH:` and `end_of_record` are interpreted; every other
//! directive (`TN:`, `DA:`, `FN:`, `BRF:`, ...) is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{CoverageRecord, LcovReport};
use crate::error::CoverageError;

/// Parse an LCOV file, streaming it line by line
pub fn parse_lcov(path: &Path) -> Result<LcovReport, CoverageError> {
    let file = File::open(path).map_err(|e| CoverageError::io(path, e))?;
    parse_lcov_reader(BufReader::new(file)).map_err(|e| match e {
        CoverageError::Io { source, .. } => CoverageError::io(path, source),
        other => other,
    })
}

/// Parse LCOV content from any buffered reader
pub fn parse_lcov_reader<R: BufRead>(reader: R) -> Result<LcovReport, CoverageError> {
    let mut report = LcovReport::default();

    let mut current_file = String::new();
    let mut file_found = 0u64;
    let mut file_hit = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CoverageError::io("<input>", e))?;
        let line = line.trim();

        if let Some(path) = line.strip_prefix("SF:") {
            current_file = path.to_string();
        } else if let Some(count) = line.strip_prefix("LF:") {
            file_found = parse_count(count, "LF", index + 1)?;
        } else if let Some(count) = line.strip_prefix("LH:") {
            file_hit = parse_count(count, "LH", index + 1)?;
        } else if line == "end_of_record" {
            let record = CoverageRecord {
                path: std::mem::take(&mut current_file),
                lines_hit: file_hit,
                lines_found: file_found,
            };
            report.push(record, index + 1)?;
            file_found = 0;
            file_hit = 0;
        }
    }

    Ok(report)
}

/// Parse LCOV content from a string
pub fn parse_lcov_string(content: &str) -> Result<LcovReport, CoverageError> {
    parse_lcov_reader(content.as_bytes())
}

fn parse_count(value: &str, directive: &str, line: usize) -> Result<u64, CoverageError> {
    value.trim().parse::<u64>().map_err(|_| CoverageError::Parse {
        line,
        directive: directive.to_string(),
        value: value.to_string(),
    })
}
