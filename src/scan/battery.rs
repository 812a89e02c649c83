//! Scan orchestration
//!
//! [`ScanBattery`] collects the dataset into a column-ordered table view
//! once, then runs the five checks over it in the fixed
//! [`CheckKind::ALL`] order. Checks share nothing and mutate nothing;
//! a scan is a pure function of its input.

use std::{
    collections::{BTreeMap, HashSet},
    sync::OnceLock,
};

use arrow::{
    array::{Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray},
    datatypes::DataType,
};
use regex::Regex;
use serde::Serialize;

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

use super::checks::{
    CheckFindings, CheckKind, CheckResult, CheckStatus, OutlierColumn, TypeIssue, TypeSuspicion,
};

/// Matches `YYYY-MM-DD` anywhere in a value, as the ingestion side of the
/// original pipeline did.
fn date_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    match PATTERN.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}")) {
        Ok(re) => Ok(re),
        Err(e) => Err(Error::Format(format!("invalid date pattern: {e}"))),
    }
}

/// Round a percentage to 2 decimals for payloads. Threshold comparisons
/// always use the unrounded value.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quantile of a sorted slice with linear interpolation between order
/// statistics.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Column-ordered view of a dataset, collected once per scan.
struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

struct Column {
    name: String,
    declared: DataType,
    values: Vec<Option<String>>,
}

impl Table {
    fn collect(dataset: &ArrowDataset) -> Result<Self> {
        let schema = dataset.schema();
        let mut columns: Vec<Column> = schema
            .fields()
            .iter()
            .map(|f| Column {
                name: f.name().clone(),
                declared: f.data_type().clone(),
                values: Vec::with_capacity(dataset.len()),
            })
            .collect();

        let mut row_count = 0;
        for batch in dataset.iter() {
            row_count += batch.num_rows();
            for (col_idx, column) in columns.iter_mut().enumerate() {
                let array = batch.column(col_idx);
                for i in 0..array.len() {
                    if array.is_null(i) {
                        column.values.push(None);
                    } else {
                        column.values.push(Some(cell_to_string(array.as_ref(), i)?));
                    }
                }
            }
        }

        Ok(Self { columns, row_count })
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn total_cells(&self) -> usize {
        self.row_count * self.columns.len()
    }
}

/// Render a non-null cell as a comparable string.
fn cell_to_string(array: &dyn Array, idx: usize) -> Result<String> {
    if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
        Ok(arr.value(idx).to_string())
    } else if let Some(arr) = array.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(idx).to_string())
    } else if let Some(arr) = array.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(idx).to_string())
    } else if let Some(arr) = array.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(idx).to_string())
    } else if let Some(arr) = array.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(idx).to_string())
    } else if let Some(arr) = array.as_any().downcast_ref::<BooleanArray>() {
        Ok(arr.value(idx).to_string())
    } else {
        // Dates, timestamps, decimals: fall back to Arrow's formatter
        arrow::util::display::array_value_to_string(array, idx).map_err(Error::Arrow)
    }
}

/// Runs the fixed five-check battery over a dataset.
///
/// Holds no state between scans; `run` borrows the dataset immutably and
/// does no I/O, so independent scans may run concurrently without
/// coordination.
///
/// # Example
///
/// ```ignore
/// let report = ScanBattery::new().run(&dataset)?;
/// assert_eq!(report.checks.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ScanBattery {
    min_numeric_sample: usize,
}

impl Default for ScanBattery {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanBattery {
    /// Create a battery with default settings.
    pub fn new() -> Self {
        Self {
            min_numeric_sample: 4,
        }
    }

    /// Minimum non-null values a numeric column needs before the outlier
    /// check examines it (default: 4, below which quartiles are
    /// meaningless).
    #[must_use]
    pub fn min_numeric_sample(mut self, min: usize) -> Self {
        self.min_numeric_sample = min;
        self
    }

    /// Run all five checks and return their results in fixed order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the dataset has no columns or
    /// no rows; in that case no check runs and no partial results are
    /// produced. Faults inside an individual check do not error the
    /// scan: they surface as a `failed` result for that check.
    pub fn run(&self, dataset: &ArrowDataset) -> Result<ScanReport> {
        if dataset.schema().fields().is_empty() {
            return Err(Error::invalid_input("dataset has no columns"));
        }
        if dataset.is_empty() {
            return Err(Error::invalid_input("dataset has no rows"));
        }

        let table = Table::collect(dataset)?;

        let checks = CheckKind::ALL
            .iter()
            .map(|kind| self.run_guarded(*kind, &table))
            .collect();

        Ok(ScanReport {
            row_count: table.row_count,
            column_count: table.column_count(),
            checks,
        })
    }

    /// Run one check, converting an internal error into a `failed`
    /// result so the rest of the battery is unaffected.
    fn run_guarded(&self, kind: CheckKind, table: &Table) -> CheckResult {
        let outcome = match kind {
            CheckKind::MissingValues => Ok(self.check_missing_values(table)),
            CheckKind::Duplicates => Ok(self.check_duplicates(table)),
            CheckKind::DataTypes => self.check_data_types(table),
            CheckKind::Outliers => Ok(self.check_outliers(table)),
            CheckKind::Completeness => Ok(self.check_completeness(table)),
        };

        outcome.unwrap_or_else(|e| CheckResult {
            kind,
            status: CheckStatus::Failed,
            score: 0.0,
            findings: CheckFindings::Faulted {
                message: e.to_string(),
            },
            details: format!("Check {} did not complete: {}", kind, e),
        })
    }

    fn check_missing_values(&self, table: &Table) -> CheckResult {
        let rows = table.row_count;
        let mut total_missing = 0;
        let mut missing_by_column = BTreeMap::new();

        for column in &table.columns {
            let nulls = column.values.iter().filter(|v| v.is_none()).count();
            total_missing += nulls;
            // Per-column percentages are persisted raw; only the total
            // is rounded for the payload
            missing_by_column.insert(column.name.clone(), nulls as f64 / rows as f64 * 100.0);
        }

        let total_missing_percentage = total_missing as f64 / table.total_cells() as f64 * 100.0;

        let (status, score) = if total_missing == 0 {
            (CheckStatus::Passed, 1.0)
        } else if total_missing_percentage < 5.0 {
            (CheckStatus::Warning, 0.8)
        } else if total_missing_percentage < 20.0 {
            (CheckStatus::Warning, 0.6)
        } else {
            (CheckStatus::Failed, 0.2)
        };

        CheckResult {
            kind: CheckKind::MissingValues,
            status,
            score,
            findings: CheckFindings::MissingValues {
                total_missing,
                total_missing_percentage: round2(total_missing_percentage),
                missing_by_column,
            },
            details: format!(
                "Found {} missing values ({:.2}%)",
                total_missing, total_missing_percentage
            ),
        }
    }

    fn check_duplicates(&self, table: &Table) -> CheckResult {
        let rows = table.row_count;
        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(rows);
        let mut duplicate_count = 0;

        // Structural key: null stays distinct from any value and cell
        // boundaries are preserved, so rows only match cell-for-cell
        for i in 0..rows {
            let row_key: Vec<Option<&str>> = table
                .columns
                .iter()
                .map(|c| c.values[i].as_deref())
                .collect();

            if !seen.insert(row_key) {
                duplicate_count += 1;
            }
        }

        let duplicate_percentage = duplicate_count as f64 / rows as f64 * 100.0;

        let (status, score) = if duplicate_count == 0 {
            (CheckStatus::Passed, 1.0)
        } else if duplicate_percentage < 1.0 {
            (CheckStatus::Warning, 0.9)
        } else if duplicate_percentage < 5.0 {
            (CheckStatus::Warning, 0.7)
        } else {
            (CheckStatus::Failed, 0.3)
        };

        CheckResult {
            kind: CheckKind::Duplicates,
            status,
            score,
            findings: CheckFindings::Duplicates {
                duplicate_count,
                duplicate_percentage: round2(duplicate_percentage),
            },
            details: format!(
                "Found {} duplicate rows ({:.2}%)",
                duplicate_count, duplicate_percentage
            ),
        }
    }

    fn check_data_types(&self, table: &Table) -> Result<CheckResult> {
        let pattern = date_pattern()?;
        let mut type_issues = Vec::new();
        let mut declared_types = BTreeMap::new();

        for column in &table.columns {
            declared_types.insert(column.name.clone(), format!("{}", column.declared));

            if !matches!(column.declared, DataType::Utf8 | DataType::LargeUtf8) {
                continue;
            }

            let non_null: Vec<&str> = column.values.iter().filter_map(|v| v.as_deref()).collect();
            if non_null.is_empty() {
                continue;
            }

            if non_null.iter().all(|v| v.trim().parse::<f64>().is_ok()) {
                type_issues.push(TypeIssue {
                    column: column.name.clone(),
                    suspicion: TypeSuspicion::NumericStoredAsText,
                });
            }

            if non_null.iter().any(|v| pattern.is_match(v)) {
                type_issues.push(TypeIssue {
                    column: column.name.clone(),
                    suspicion: TypeSuspicion::DateStoredAsText,
                });
            }
        }

        let (status, score) = if type_issues.is_empty() {
            (CheckStatus::Passed, 1.0)
        } else {
            let score = 1.0 - 0.1 * type_issues.len() as f64;
            (CheckStatus::Warning, score.max(0.5))
        };

        let details = format!("Found {} potential data type issues", type_issues.len());

        Ok(CheckResult {
            kind: CheckKind::DataTypes,
            status,
            score,
            findings: CheckFindings::DataTypes {
                type_issues,
                declared_types,
            },
            details,
        })
    }

    fn check_outliers(&self, table: &Table) -> CheckResult {
        let rows = table.row_count;
        let mut flagged_columns = Vec::new();
        let mut numeric_columns_checked = 0;

        for column in &table.columns {
            if !column.declared.is_numeric() {
                continue;
            }
            numeric_columns_checked += 1;

            let mut values: Vec<f64> = column
                .values
                .iter()
                .filter_map(|v| v.as_deref())
                .filter_map(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect();

            if values.len() < self.min_numeric_sample {
                continue;
            }

            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let q1 = quantile(&values, 0.25);
            let q3 = quantile(&values, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - 1.5 * iqr;
            let upper = q3 + 1.5 * iqr;

            let outlier_count = values.iter().filter(|&&v| v < lower || v > upper).count();
            let outlier_percentage = outlier_count as f64 / rows as f64 * 100.0;

            if outlier_percentage > 10.0 {
                flagged_columns.push(OutlierColumn {
                    column: column.name.clone(),
                    outlier_count,
                    outlier_percentage: round2(outlier_percentage),
                });
            }
        }

        let (status, score) = if flagged_columns.is_empty() {
            (CheckStatus::Passed, 1.0)
        } else {
            let score = 1.0 - 0.1 * flagged_columns.len() as f64;
            (CheckStatus::Warning, score.max(0.6))
        };

        let details = format!("Found outliers in {} numeric columns", flagged_columns.len());

        CheckResult {
            kind: CheckKind::Outliers,
            status,
            score,
            findings: CheckFindings::Outliers {
                flagged_columns,
                numeric_columns_checked,
            },
            details,
        }
    }

    fn check_completeness(&self, table: &Table) -> CheckResult {
        let total_cells = table.total_cells();
        let non_null_cells: usize = table
            .columns
            .iter()
            .map(|c| c.values.iter().filter(|v| v.is_some()).count())
            .sum();

        let completeness_percentage = non_null_cells as f64 / total_cells as f64 * 100.0;

        let (status, score) = if completeness_percentage >= 95.0 {
            (CheckStatus::Passed, 1.0)
        } else if completeness_percentage >= 80.0 {
            (CheckStatus::Warning, 0.8)
        } else if completeness_percentage >= 60.0 {
            (CheckStatus::Warning, 0.6)
        } else {
            (CheckStatus::Failed, 0.3)
        };

        CheckResult {
            kind: CheckKind::Completeness,
            status,
            score,
            findings: CheckFindings::Completeness {
                total_cells,
                non_null_cells,
                completeness_percentage: round2(completeness_percentage),
            },
            details: format!("Data completeness: {:.2}%", completeness_percentage),
        }
    }
}

/// Run the battery with default settings.
///
/// Convenience for `ScanBattery::new().run(dataset)`.
///
/// # Errors
///
/// Same contract as [`ScanBattery::run`].
pub fn run_checks(dataset: &ArrowDataset) -> Result<ScanReport> {
    ScanBattery::new().run(dataset)
}

/// Results of one scan: exactly five [`CheckResult`]s in
/// [`CheckKind::ALL`] order, plus the dataset dimensions they were
/// computed over.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Rows scanned
    pub row_count: usize,
    /// Columns scanned
    pub column_count: usize,
    /// One result per check, fixed order
    pub checks: Vec<CheckResult>,
}

impl ScanReport {
    /// Mean of the five check scores, the aggregate dashboards persist
    /// alongside a data source.
    pub fn overall_score(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        self.checks.iter().map(|c| c.score).sum::<f64>() / self.checks.len() as f64
    }

    /// True if any check failed.
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.is_failed())
    }

    /// Number of checks that reported a warning.
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Warning)
            .count()
    }

    /// Look up the result of a specific check.
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}
