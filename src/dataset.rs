//! Dataset types for calidad.
//!
//! Provides the [`Dataset`] trait and [`ArrowDataset`] implementation
//! for working with Arrow-based tabular data. A dataset is the unit the
//! scan battery operates on: an ordered set of named, typed, nullable
//! columns, immutable for the duration of a scan.

use std::{path::Path, sync::Arc};

use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    file::properties::WriterProperties,
};

use crate::error::{Error, Result};

/// A dataset that can be iterated over.
///
/// Datasets provide access to tabular data stored as Arrow RecordBatches.
/// All implementations must be thread-safe (Send + Sync).
pub trait Dataset: Send + Sync {
    /// Returns the total number of rows in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a single row as a RecordBatch with one row.
    ///
    /// Returns `None` if the index is out of bounds.
    fn get(&self, index: usize) -> Option<RecordBatch>;

    /// Returns the schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// Returns an iterator over all RecordBatches in the dataset.
    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_>;

    /// Returns the number of batches in the dataset.
    fn num_batches(&self) -> usize;

    /// Returns a specific batch by index.
    fn get_batch(&self, index: usize) -> Option<&RecordBatch>;
}

/// An in-memory dataset backed by Arrow RecordBatches.
///
/// This is the primary dataset type for calidad. It stores data as a
/// collection of RecordBatches and is what callers hand to
/// [`ScanBattery::run`](crate::ScanBattery::run).
///
/// # Example
///
/// ```no_run
/// use calidad::{ArrowDataset, Dataset};
///
/// let dataset = ArrowDataset::from_csv("data.csv").unwrap();
/// println!("Dataset has {} rows", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct ArrowDataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl ArrowDataset {
    /// Creates a new ArrowDataset from a vector of RecordBatches.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batches vector is empty
    /// - The batches have inconsistent schemas
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let schema = batches[0].schema();

        // Verify all batches have the same schema
        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "Batch {} has different schema than batch 0",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates an ArrowDataset from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is empty.
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Loads a dataset from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The file is not valid Parquet
    /// - The file is empty
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let reader = builder.build().map_err(Error::Parquet)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Saves the dataset to a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let props = WriterProperties::builder().build();
        let mut writer =
            ArrowWriter::try_new(file, self.schema.clone(), Some(props)).map_err(Error::Parquet)?;

        for batch in &self.batches {
            writer.write(batch).map_err(Error::Parquet)?;
        }

        writer.close().map_err(Error::Parquet)?;
        Ok(())
    }

    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The file is not valid CSV
    /// - The file is empty
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a dataset from a CSV file with options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the file is empty.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        // Get schema (infer or use provided)
        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let mut format = Format::default().with_header(options.has_header);
            if let Some(delim) = options.delimiter {
                format = format.with_delimiter(delim);
            }
            let (inferred, _) = format
                .infer_schema(&mut buf_reader, Some(1000))
                .map_err(Error::Arrow)?;

            // Reset file position after inference
            buf_reader
                .seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(e, path))?;

            Arc::new(inferred)
        };

        let mut builder = ReaderBuilder::new(schema)
            .with_batch_size(options.batch_size)
            .with_header(options.has_header);

        if let Some(delim) = options.delimiter {
            builder = builder.with_delimiter(delim);
        }

        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Saves the dataset to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        use arrow_csv::WriterBuilder;

        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let mut writer = WriterBuilder::new().with_header(true).build(file);

        for batch in &self.batches {
            writer.write(batch).map_err(Error::Arrow)?;
        }

        Ok(())
    }

    /// Loads a dataset from a JSON Lines (JSONL) file.
    ///
    /// Each line in the file should be a valid JSON object representing a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_with_options(path, JsonOptions::default())
    }

    /// Loads a dataset from a JSON Lines file with options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the file is empty.
    pub fn from_json_with_options(path: impl AsRef<Path>, options: JsonOptions) -> Result<Self> {
        use std::io::BufReader;

        use arrow_json::ReaderBuilder;

        let path = path.as_ref();

        // Get schema (infer or use provided)
        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let infer_file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
            let infer_reader = BufReader::new(infer_file);
            let (inferred, _) = arrow_json::reader::infer_json_schema(infer_reader, Some(1000))
                .map_err(Error::Arrow)?;
            Arc::new(inferred)
        };

        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let buf_reader = BufReader::new(file);

        let reader = ReaderBuilder::new(schema)
            .with_batch_size(options.batch_size)
            .build(buf_reader)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Self::new(batches)
    }

    /// Returns all batches as a slice.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }
}

impl Dataset for ArrowDataset {
    fn len(&self) -> usize {
        self.row_count
    }

    fn get(&self, index: usize) -> Option<RecordBatch> {
        if index >= self.row_count {
            return None;
        }

        let mut offset = index;
        for batch in &self.batches {
            if offset < batch.num_rows() {
                return Some(batch.slice(offset, 1));
            }
            offset -= batch.num_rows();
        }

        None
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RecordBatch> + Send + '_> {
        Box::new(self.batches.iter().cloned())
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }

    fn get_batch(&self, index: usize) -> Option<&RecordBatch> {
        self.batches.get(index)
    }
}

/// Options for CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the file has a header row (default: true).
    pub has_header: bool,
    /// Field delimiter (default: inferred as `,`).
    pub delimiter: Option<u8>,
    /// Rows per RecordBatch (default: 1024).
    pub batch_size: usize,
    /// Explicit schema; inferred from the file when `None`.
    pub schema: Option<Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 1024,
            schema: None,
        }
    }
}

/// Options for JSON Lines parsing.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Rows per RecordBatch (default: 1024).
    pub batch_size: usize,
    /// Explicit schema; inferred from the file when `None`.
    pub schema: Option<Schema>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            schema: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Int32Array, StringArray},
        datatypes::{DataType, Field},
    };

    use super::*;

    fn sample_batch(rows: usize) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, false),
        ]));

        let ids: Vec<i32> = (0..rows as i32).collect();
        let names: Vec<String> = ids.iter().map(|i| format!("item_{}", i)).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(ids)),
                Arc::new(StringArray::from(names)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_empty_batches() {
        let result = ArrowDataset::new(vec![]);
        assert!(matches!(result, Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_from_batch() {
        let dataset = ArrowDataset::from_batch(sample_batch(10)).unwrap();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.num_batches(), 1);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_multi_batch_row_count() {
        let dataset = ArrowDataset::new(vec![sample_batch(10), sample_batch(5)]).unwrap();
        assert_eq!(dataset.len(), 15);
        assert_eq!(dataset.num_batches(), 2);
    }

    #[test]
    fn test_schema_mismatch() {
        let other_schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Int32, false)]));
        let other = RecordBatch::try_new(
            other_schema,
            vec![Arc::new(Int32Array::from(vec![1, 2, 3]))],
        )
        .unwrap();

        let result = ArrowDataset::new(vec![sample_batch(3), other]);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_get_row() {
        let dataset = ArrowDataset::new(vec![sample_batch(10), sample_batch(5)]).unwrap();

        let row = dataset.get(12).unwrap();
        assert_eq!(row.num_rows(), 1);
        let ids = row
            .column(0)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        // Index 12 lands at offset 2 of the second batch
        assert_eq!(ids.value(0), 2);

        assert!(dataset.get(15).is_none());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let dataset = ArrowDataset::from_batch(sample_batch(20)).unwrap();
        dataset.to_csv(&path).unwrap();

        let loaded = ArrowDataset::from_csv(&path).unwrap();
        assert_eq!(loaded.len(), 20);
        assert_eq!(loaded.schema().fields().len(), 2);
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");

        let dataset = ArrowDataset::from_batch(sample_batch(20)).unwrap();
        dataset.to_parquet(&path).unwrap();

        let loaded = ArrowDataset::from_parquet(&path).unwrap();
        assert_eq!(loaded.len(), 20);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let result = ArrowDataset::from_csv("/nonexistent/data.csv");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
