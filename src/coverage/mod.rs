//! Coverage module
//!
//! Provides:
//! - LCOV parsing
//! - Threshold validation and the plain-text report

mod lcov;
mod threshold;

pub use lcov::*;
pub use threshold::*;

use crate::error::CoverageError;

/// Line counts for one closed `end_of_record` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub path: String,
    pub lines_hit: u64,
    pub lines_found: u64,
}

impl CoverageRecord {
    /// `None` when the file has no instrumented lines
    pub fn percentage(&self) -> Option<f64> {
        percentage(self.lines_hit, self.lines_found)
    }
}

/// Totals across every record in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    pub total_hit: u64,
    pub total_found: u64,
}

impl CoverageSummary {
    pub fn percentage(&self) -> Option<f64> {
        percentage(self.total_hit, self.total_found)
    }

    fn checked_add(&self, record: &CoverageRecord) -> Option<Self> {
        Some(Self {
            total_hit: self.total_hit.checked_add(record.lines_hit)?,
            total_found: self.total_found.checked_add(record.lines_found)?,
        })
    }
}

/// A parsed tracefile: records in the order they were closed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcovReport {
    pub summary: CoverageSummary,
    pub records: Vec<CoverageRecord>,
}

impl LcovReport {
    /// `line` is the `end_of_record` that closed `record`
    fn push(&mut self, record: CoverageRecord, line: usize) -> Result<(), CoverageError> {
        self.summary = self
            .summary
            .checked_add(&record)
            .ok_or(CoverageError::TotalOverflow { line })?;
        self.records.push(record);
        Ok(())
    }
}

fn percentage(hit: u64, found: u64) -> Option<f64> {
    if found == 0 {
        return None;
    }
    Some((hit as f64 / found as f64) * 100.0)
}
