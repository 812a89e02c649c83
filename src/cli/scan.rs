//! Quality scan CLI commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::scan::{ScanBattery, ScanReport};

use super::basic::load_dataset;

/// Data quality scan commands.
#[derive(Subcommand)]
pub enum ScanCommands {
    /// Run the five-check quality battery on a dataset
    Run {
        /// Path to dataset file
        path: PathBuf,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a JSON scan report
    Report {
        /// Path to dataset file
        path: PathBuf,
        /// Output file for the report (JSON format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn report_to_json(path: &PathBuf, report: &ScanReport) -> crate::Result<String> {
    let json = serde_json::json!({
        "path": path.display().to_string(),
        "rows": report.row_count,
        "columns": report.column_count,
        "overall_score": report.overall_score(),
        "has_failures": report.has_failures(),
        "checks": report.checks,
    });

    serde_json::to_string_pretty(&json).map_err(|e| crate::Error::Format(e.to_string()))
}

/// Run the quality battery and print the results.
pub(crate) fn cmd_scan_run(path: &PathBuf, format: &str) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let report = ScanBattery::new().run(&dataset)?;

    if format == "json" {
        println!("{}", report_to_json(path, &report)?);
    } else {
        println!("Data Quality Scan");
        println!("=================");
        println!("File: {}", path.display());
        println!("Rows: {}", report.row_count);
        println!("Columns: {}", report.column_count);
        println!();

        println!(
            "{:<16} {:<10} {:<8} {}",
            "CHECK", "STATUS", "SCORE", "DETAILS"
        );
        println!("{}", "-".repeat(72));

        for check in &report.checks {
            println!(
                "{:<16} {:<10} {:<8.2} {}",
                check.kind.as_str(),
                check.status,
                check.score,
                check.details
            );
        }

        println!();
        println!("Overall Score: {:.2}", report.overall_score());

        if report.has_failures() {
            println!("\u{2717} One or more checks failed");
        } else if report.warning_count() > 0 {
            println!("\u{25B3} {} check(s) reported warnings", report.warning_count());
        } else {
            println!("\u{2713} All checks passed");
        }
    }

    Ok(())
}

/// Run the quality battery and write a JSON report.
pub(crate) fn cmd_scan_report(path: &PathBuf, output: Option<&PathBuf>) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let report = ScanBattery::new().run(&dataset)?;

    let json_str = report_to_json(path, &report)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &json_str).map_err(|e| crate::Error::io(e, output_path))?;
        println!("Scan report written to: {}", output_path.display());
    } else {
        println!("{}", json_str);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{Int32Array, RecordBatch, StringArray},
        datatypes::{DataType, Field, Schema},
    };

    use crate::ArrowDataset;

    use super::*;

    fn create_test_parquet(path: &PathBuf, rows: usize) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, false),
        ]));

        let ids: Vec<i32> = (0..rows as i32).collect();
        let names: Vec<String> = ids.iter().map(|i| format!("item_{}", i)).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(ids)),
                Arc::new(StringArray::from(names)),
            ],
        )
        .unwrap();

        ArrowDataset::from_batch(batch)
            .unwrap()
            .to_parquet(path)
            .unwrap();
    }

    #[test]
    fn test_cmd_scan_run_text() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.parquet");
        create_test_parquet(&path, 100);

        assert!(cmd_scan_run(&path, "text").is_ok());
    }

    #[test]
    fn test_cmd_scan_run_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.parquet");
        create_test_parquet(&path, 100);

        assert!(cmd_scan_run(&path, "json").is_ok());
    }

    #[test]
    fn test_cmd_scan_report_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_path = temp_dir.path().join("data.parquet");
        let output_path = temp_dir.path().join("scan.json");
        create_test_parquet(&data_path, 100);

        assert!(cmd_scan_report(&data_path, Some(&output_path)).is_ok());
        assert!(output_path.exists());

        // Verify JSON is valid and carries all five checks
        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["checks"].as_array().unwrap().len(), 5);
        assert!(parsed.get("overall_score").is_some());
    }

    #[test]
    fn test_cmd_scan_report_stdout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.parquet");
        create_test_parquet(&path, 50);

        assert!(cmd_scan_report(&path, None).is_ok());
    }

    #[test]
    fn test_cmd_scan_run_missing_file() {
        let path = PathBuf::from("/nonexistent/data.parquet");
        assert!(cmd_scan_run(&path, "text").is_err());
    }
}
