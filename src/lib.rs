//! calidad - Data Quality Scanning for Tabular Data in Pure Rust
//!
//! Runs a fixed battery of statistical quality checks over Arrow-backed
//! tabular datasets: missing values, duplicate rows, suspicious data
//! types, IQR outliers, and overall completeness. Each check reports a
//! status, a score in [0, 1], a structured findings payload, and a
//! human-readable detail line.
//!
//! # Design Principles
//!
//! 1. **Pure Rust** - No Python, no FFI
//! 2. **Zero-copy ingestion** - Arrow `RecordBatch` throughout
//! 3. **Pure scans** - The battery does no I/O and holds no shared state;
//!    concurrent scans over independent datasets need no coordination
//!
//! # Quick Start
//!
//! ```no_run
//! use calidad::{ArrowDataset, ScanBattery};
//!
//! let dataset = ArrowDataset::from_csv("data/customers.csv").unwrap();
//! let report = ScanBattery::new().run(&dataset).unwrap();
//!
//! for check in &report.checks {
//!     println!("{}: {} ({:.2})", check.kind, check.status, check.score);
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::map_unwrap_or)]

/// CLI module for command-line interface
pub mod cli;
pub mod dataset;
pub mod error;
pub mod scan;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use dataset::{ArrowDataset, CsvOptions, Dataset, JsonOptions};
pub use error::{Error, Result};
pub use scan::{CheckFindings, CheckKind, CheckResult, CheckStatus, ScanBattery, ScanReport};
