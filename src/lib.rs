//! Toolshed - developer tooling for a Dart/Flutter repository
//!
//! - LCOV coverage parsing and a minimum-coverage gate
//! - Pass-through wrappers for `dart format` / `flutter analyze` that
//!   strip git worktree variables from the child environment
//! - Static analysis of every package under a packages directory

pub mod config;
pub mod coverage;
pub mod error;
pub mod tools;

pub use config::Config;
pub use coverage::{
    evaluate, parse_lcov, CoverageRecord, CoverageSummary, LcovReport, ThresholdResult,
};
pub use error::CoverageError;
pub use tools::{analyze_packages, discover_packages, Package, PackageAnalysis, ToolCommand};
