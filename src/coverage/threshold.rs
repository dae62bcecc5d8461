//! Coverage threshold validation

use super::LcovReport;
use crate::error::CoverageError;

/// A file whose own coverage is under the minimum
#[derive(Debug, Clone, PartialEq)]
pub struct BelowThreshold {
    pub path: String,
    pub percentage: f64,
}

/// Result of threshold validation
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub minimum: f64,
    pub overall_percentage: f64,
    pub total_hit: u64,
    pub total_found: u64,
    /// Sorted ascending by percentage, ties in input order
    pub below_threshold: Vec<BelowThreshold>,
    pub passed: bool,
}

impl ThresholdResult {
    /// Report body: the below-threshold listing and the overall line
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if !self.below_threshold.is_empty() {
            lines.push(String::new());
            lines.push(format!("Files below {:.0}% coverage:", self.minimum));
            lines.extend(
                self.below_threshold
                    .iter()
                    .map(|file| format!("  {:5.1}%  {}", file.percentage, file.path)),
            );
        }

        lines.push(String::new());
        lines.push(format!(
            "Overall coverage: {:.1}% ({}/{} lines)",
            self.overall_percentage, self.total_hit, self.total_found
        ));

        lines.join("\n") + "\n"
    }

    pub fn verdict(&self) -> String {
        if self.passed {
            format!("PASSED: Coverage meets the {:.0}% threshold.", self.minimum)
        } else {
            format!(
                "FAILED: Coverage {:.1}% is below the minimum threshold of {:.0}%.",
                self.overall_percentage, self.minimum
            )
        }
    }
}

/// Validate a parsed report against a minimum line coverage percentage
pub fn evaluate(report: &LcovReport, minimum: f64) -> Result<ThresholdResult, CoverageError> {
    let overall_percentage = report
        .summary
        .percentage()
        .ok_or(CoverageError::EmptyReport)?;

    let mut below_threshold: Vec<BelowThreshold> = report
        .records
        .iter()
        .filter_map(|record| {
            let percentage = record.percentage()?;
            (percentage < minimum).then(|| BelowThreshold {
                path: record.path.clone(),
                percentage,
            })
        })
        .collect();

    // sort_by is stable, so equal percentages keep their input order
    below_threshold.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));

    Ok(ThresholdResult {
        minimum,
        overall_percentage,
        total_hit: report.summary.total_hit,
        total_found: report.summary.total_found,
        below_threshold,
        passed: overall_percentage >= minimum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::parse_lcov_string;

    fn report(lcov: &str) -> LcovReport {
        parse_lcov_string(lcov).unwrap()
    }

    #[test]
    fn test_single_file_passes() {
        let result = evaluate(&report("SF:a.dart\nLF:10\nLH:8\nend_of_record\n"), 78.0).unwrap();

        assert!(result.passed);
        assert_eq!(result.overall_percentage, 80.0);
        assert_eq!(result.total_hit, 8);
        assert_eq!(result.total_found, 10);
        assert!(result.below_threshold.is_empty());
    }

    #[test]
    fn test_overall_below_minimum_fails() {
        let lcov = "SF:a.dart\nLF:10\nLH:4\nend_of_record\nSF:b.dart\nLF:10\nLH:9\nend_of_record\n";
        let result = evaluate(&report(lcov), 78.0).unwrap();

        assert!(!result.passed);
        assert_eq!(result.overall_percentage, 65.0);
        assert_eq!(
            result.below_threshold,
            vec![BelowThreshold {
                path: "a.dart".to_string(),
                percentage: 40.0,
            }]
        );
    }

    #[test]
    fn test_empty_report_is_error() {
        let err = evaluate(&report("TN:\nDA:1,1\n"), 78.0).unwrap_err();
        assert!(matches!(err, CoverageError::EmptyReport));
    }

    #[test]
    fn test_only_zero_found_records_is_error() {
        let err = evaluate(&report("SF:a\nend_of_record\nSF:b\nLF:0\nend_of_record\n"), 50.0)
            .unwrap_err();
        assert!(matches!(err, CoverageError::EmptyReport));
    }

    #[test]
    fn test_exact_boundary_passes() {
        let result = evaluate(&report("SF:a\nLF:4\nLH:3\nend_of_record\n"), 75.0).unwrap();

        assert!(result.passed);
        assert!(result.below_threshold.is_empty());
    }

    #[test]
    fn test_below_list_sorted_and_stable() {
        let lcov = "\
SF:half_one\nLF:2\nLH:1\nend_of_record
SF:zero\nLF:5\nLH:0\nend_of_record
SF:full\nLF:3\nLH:3\nend_of_record
SF:empty\nLF:0\nLH:0\nend_of_record
SF:half_two\nLF:4\nLH:2\nend_of_record
SF:tenth\nLF:10\nLH:1\nend_of_record
";
        let result = evaluate(&report(lcov), 80.0).unwrap();

        let paths: Vec<&str> = result
            .below_threshold
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(paths, vec!["zero", "tenth", "half_one", "half_two"]);
        assert!(result
            .below_threshold
            .windows(2)
            .all(|w| w[0].percentage <= w[1].percentage));
        assert!(result.below_threshold.iter().all(|f| f.percentage < 80.0));
    }

    #[test]
    fn test_render_with_below_files() {
        let lcov = concat!(
            "SF:a.dart\nLF:10\nLH:4\nend_of_record\n",
            "SF:b.dart\nLF:10\nLH:9\nend_of_record\n",
        );
        let result = evaluate(&report(lcov), 78.0).unwrap();

        assert_eq!(
            result.render(),
            concat!(
                "\nFiles below 78% coverage:\n",
                "   40.0%  a.dart\n",
                "\nOverall coverage: 65.0% (13/20 lines)\n",
            )
        );
        assert_eq!(
            result.verdict(),
            "FAILED: Coverage 65.0% is below the minimum threshold of 78%."
        );
    }

    #[test]
    fn test_render_without_below_files() {
        let result = evaluate(&report("SF:a.dart\nLF:3\nLH:3\nend_of_record\n"), 78.0).unwrap();

        assert_eq!(result.render(), "\nOverall coverage: 100.0% (3/3 lines)\n");
        assert_eq!(result.verdict(), "PASSED: Coverage meets the 78% threshold.");
    }

    #[test]
    fn test_passed_matches_overall_comparison() {
        let lcov = "SF:a\nLF:3\nLH:1\nend_of_record\nSF:b\nLF:7\nLH:7\nend_of_record\n";
        let parsed = report(lcov);

        for minimum in [0.0, 50.0, 79.9, 80.0, 80.1, 100.0] {
            let result = evaluate(&parsed, minimum).unwrap();
            assert_eq!(result.passed, result.overall_percentage >= minimum);
        }
    }
}
