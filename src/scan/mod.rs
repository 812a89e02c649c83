//! Quality scan battery for tabular datasets
//!
//! Runs five independent checks over a dataset and reports, for each,
//! a status (`passed`/`warning`/`failed`), a score in [0, 1], a
//! structured findings payload, and a human-readable detail string.
//!
//! The battery order is fixed: missing values, duplicates, data types,
//! outliers, completeness. Checks are independent: a fault inside one
//! surfaces as a `failed` result for that check and the rest still run.
//!
//! # Example
//!
//! ```ignore
//! use calidad::scan::ScanBattery;
//!
//! let report = ScanBattery::new().run(&dataset)?;
//! println!("overall score: {:.2}", report.overall_score());
//! for check in &report.checks {
//!     println!("{}: {} ({:.2}) - {}", check.kind, check.status, check.score, check.details);
//! }
//! ```

// Statistical computation and percentage arithmetic
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::unused_self)]

mod battery;
mod checks;


pub use battery::{run_checks, ScanBattery, ScanReport};
pub use checks::{
    CheckFindings, CheckKind, CheckResult, CheckStatus, OutlierColumn, TypeIssue, TypeSuspicion,
};
