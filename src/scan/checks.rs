//! Check result model
//!
//! Types for representing the outcome of a single quality check: the
//! check kind, its status, its score, and its structured findings.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// The five checks of the battery, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Null cell counting per column and overall
    MissingValues,
    /// Exact duplicate row detection
    Duplicates,
    /// Text columns that look numeric or date-like
    DataTypes,
    /// IQR-based outlier detection on numeric columns
    Outliers,
    /// Overall non-null cell ratio
    Completeness,
}

impl CheckKind {
    /// The fixed battery order. `run` produces exactly one result per
    /// entry, in this order.
    pub const ALL: [Self; 5] = [
        Self::MissingValues,
        Self::Duplicates,
        Self::DataTypes,
        Self::Outliers,
        Self::Completeness,
    ];

    /// Stable identifier used in persisted records and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValues => "missing_values",
            Self::Duplicates => "duplicates",
            Self::DataTypes => "data_types",
            Self::Outliers => "outliers",
            Self::Completeness => "completeness",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// No issues found
    Passed,
    /// Issues found, below the failure threshold
    Warning,
    /// Issue rate above the failure threshold, or the check faulted
    Failed,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Warning => write!(f, "warning"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Why a text column was flagged by the data-types check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSuspicion {
    /// Every non-null value parses as a number
    NumericStoredAsText,
    /// Values match a `YYYY-MM-DD` date pattern
    DateStoredAsText,
}

/// A text column flagged by the data-types check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeIssue {
    /// Column name
    pub column: String,
    /// Why the column was flagged
    pub suspicion: TypeSuspicion,
}

impl TypeIssue {
    /// Human-readable description of the issue.
    pub fn describe(&self) -> String {
        match self.suspicion {
            TypeSuspicion::NumericStoredAsText => format!(
                "Column '{}' appears to be numeric but is stored as text",
                self.column
            ),
            TypeSuspicion::DateStoredAsText => format!(
                "Column '{}' appears to contain dates but is stored as text",
                self.column
            ),
        }
    }
}

/// A numeric column flagged by the outlier check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierColumn {
    /// Column name
    pub column: String,
    /// Values outside the IQR fence
    pub outlier_count: usize,
    /// Outliers as a percentage of all rows, rounded to 2 decimals
    pub outlier_percentage: f64,
}

/// Structured findings payload, one shape per check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckFindings {
    /// Findings of the missing-values check
    MissingValues {
        /// Total null cells across the dataset
        total_missing: usize,
        /// Null cells as a percentage of all cells, rounded to 2 decimals
        total_missing_percentage: f64,
        /// Per-column null percentage, unrounded
        missing_by_column: BTreeMap<String, f64>,
    },
    /// Findings of the duplicates check
    Duplicates {
        /// Rows that exactly duplicate an earlier row
        duplicate_count: usize,
        /// Duplicates as a percentage of all rows, rounded to 2 decimals
        duplicate_percentage: f64,
    },
    /// Findings of the data-types check
    DataTypes {
        /// Flagged text columns
        type_issues: Vec<TypeIssue>,
        /// Declared Arrow type per column
        declared_types: BTreeMap<String, String>,
    },
    /// Findings of the outliers check
    Outliers {
        /// Numeric columns with more than 10% of values outside the fence
        flagged_columns: Vec<OutlierColumn>,
        /// How many numeric columns were examined
        numeric_columns_checked: usize,
    },
    /// Findings of the completeness check
    Completeness {
        /// Rows times columns
        total_cells: usize,
        /// Cells holding a value
        non_null_cells: usize,
        /// Non-null cells as a percentage of all cells, rounded to 2 decimals
        completeness_percentage: f64,
    },
    /// The check itself errored; the rest of the battery still ran
    Faulted {
        /// What went wrong
        message: String,
    },
}

/// Result of a single quality check.
///
/// Produced once per check per scan, never mutated afterwards. Collected
/// into [`ScanReport`](crate::scan::ScanReport) in the fixed
/// [`CheckKind::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Which check produced this result
    #[serde(rename = "check_type")]
    pub kind: CheckKind,
    /// Outcome status
    pub status: CheckStatus,
    /// Quality score in [0, 1]; non-increasing as the issue rate grows
    pub score: f64,
    /// Structured findings payload
    #[serde(rename = "result")]
    pub findings: CheckFindings,
    /// Human-readable summary line
    pub details: String,
}

impl CheckResult {
    /// True if the check found no issues.
    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }

    /// True if the check failed outright (including internal faults).
    pub fn is_failed(&self) -> bool {
        self.status == CheckStatus::Failed
    }

    /// True if the check errored internally rather than scoring the data.
    pub fn is_faulted(&self) -> bool {
        matches!(self.findings, CheckFindings::Faulted { .. })
    }
}
