//! Basic CLI commands for dataset inspection.

use std::path::{Path, PathBuf};

use arrow::util::pretty::print_batches;

use crate::{ArrowDataset, Dataset};

/// Load a dataset from a file path based on extension.
pub(crate) fn load_dataset(path: &PathBuf) -> crate::Result<ArrowDataset> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "parquet" => ArrowDataset::from_parquet(path),
        "csv" => ArrowDataset::from_csv(path),
        "json" | "jsonl" => ArrowDataset::from_json(path),
        ext => Err(crate::Error::unsupported_format(ext)),
    }
}

/// Get format name from file extension.
pub(crate) fn get_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => "Parquet",
        Some("csv") => "CSV",
        Some("json" | "jsonl") => "JSON",
        _ => "Unknown",
    }
}

/// Display dataset information.
pub(crate) fn cmd_info(path: &PathBuf) -> crate::Result<()> {
    let dataset = load_dataset(path)?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("File: {}", path.display());
    println!("Format: {}", get_format(path));
    println!("Rows: {}", dataset.len());
    println!("Batches: {}", dataset.num_batches());
    println!("Columns: {}", dataset.schema().fields().len());
    println!("Size: {} bytes", file_size);

    Ok(())
}

/// Display first N rows of a dataset.
pub(crate) fn cmd_head(path: &PathBuf, rows: usize) -> crate::Result<()> {
    let dataset = load_dataset(path)?;

    if dataset.is_empty() {
        println!("Dataset is empty");
        return Ok(());
    }

    let mut collected = Vec::new();
    let mut count = 0;

    for batch in dataset.iter() {
        let take = (rows - count).min(batch.num_rows());
        if take > 0 {
            collected.push(batch.slice(0, take));
            count += take;
        }
        if count >= rows {
            break;
        }
    }

    if collected.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    print_batches(&collected).map_err(crate::Error::Arrow)?;

    if count < dataset.len() {
        println!("... showing {} of {} rows", count, dataset.len());
    }

    Ok(())
}

/// Display dataset schema.
pub(crate) fn cmd_schema(path: &PathBuf) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let schema = dataset.schema();

    println!("Schema for {}:", path.display());
    println!("{:<24} {:<16} {:<8}", "COLUMN", "TYPE", "NULLABLE");
    println!("{}", "-".repeat(50));

    for field in schema.fields() {
        println!(
            "{:<24} {:<16} {:<8}",
            field.name(),
            format!("{}", field.data_type()),
            field.is_nullable()
        );
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

    use super::*;

    fn write_test_parquet(path: &PathBuf, rows: usize) {
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
    fn test_load_dataset_unsupported_extension() {
        let result = load_dataset(&PathBuf::from("data.xlsx"));
        assert!(matches!(
            result,
            Err(crate::Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_get_format() {
        assert_eq!(get_format(Path::new("a.parquet")), "Parquet");
        assert_eq!(get_format(Path::new("a.csv")), "CSV");
        assert_eq!(get_format(Path::new("a.jsonl")), "JSON");
        assert_eq!(get_format(Path::new("a.bin")), "Unknown");
    }

    #[test]
    fn test_cmd_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        write_test_parquet(&path, 25);

        assert!(cmd_info(&path).is_ok());
    }

    #[test]
    fn test_cmd_head() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        write_test_parquet(&path, 25);

        assert!(cmd_head(&path, 5).is_ok());
    }

    #[test]
    fn test_cmd_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        write_test_parquet(&path, 5);

        assert!(cmd_schema(&path).is_ok());
    }
}
