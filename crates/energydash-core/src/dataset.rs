//! Energy measurement dataset.
//!
//! The dataset is read once from CSV and never modified. Every column is kept
//! as display text for the data table; the algorithm, input size, and energy
//! columns are also parsed into typed [`EnergyRecord`]s.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::Float64Type;
use arrow_array::{Array, RecordBatch};
use arrow_csv::reader::Format;
use arrow_csv::ReaderBuilder;
use arrow_schema::{ArrowError, DataType, Field, Schema};
use serde::Serialize;

use crate::constants::{
    ALGORITHM_COLUMN, ENERGY_COLUMN, INPUT_SIZE_COLUMN, SCHEMA_INFERENCE_ROWS,
};

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] ArrowError),

    /// A required column is absent from the header.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A required cell is empty.
    #[error("missing value in column {column} at row {row}")]
    MissingValue { row: usize, column: String },

    /// An energy value is NaN or infinite.
    #[error("non-finite energy value at row {row}")]
    NonFinite { row: usize },

    /// A column was decoded with an unexpected type.
    #[error("column {0} has an unexpected type")]
    UnexpectedType(String),
}

/// One energy measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyRecord {
    pub algorithm: String,
    pub input_size: String,
    pub energy: f64,
}

impl EnergyRecord {
    #[must_use]
    pub fn new(algorithm: impl Into<String>, input_size: impl Into<String>, energy: f64) -> Self {
        Self {
            algorithm: algorithm.into(),
            input_size: input_size.into(),
            energy,
        }
    }
}

/// Energy values of one algorithm at one input size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub label: String,
    pub values: Vec<f64>,
}

impl AsRef<[f64]> for Group {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// One page of the data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Zero-based page index.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

/// The loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    records: Vec<EnergyRecord>,
}

/// Positions of the required columns within the CSV schema.
struct ColumnIndices {
    algorithm: usize,
    input_size: usize,
    energy: usize,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_csv_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            input_sizes = dataset.input_sizes().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse a dataset from CSV bytes with a header row.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let (inferred, _) = Format::default()
            .with_header(true)
            .infer_schema(Cursor::new(bytes), Some(SCHEMA_INFERENCE_ROWS))?;

        // Pin the column types: energy is numeric, everything else is text.
        let fields: Vec<Field> = inferred
            .fields()
            .iter()
            .map(|f| {
                let data_type = if f.name() == ENERGY_COLUMN {
                    DataType::Float64
                } else {
                    DataType::Utf8
                };
                Field::new(f.name(), data_type, true)
            })
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let index_of = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| DatasetError::MissingColumn(name.to_string()))
        };
        let indices = ColumnIndices {
            algorithm: index_of(ALGORITHM_COLUMN)?,
            input_size: index_of(INPUT_SIZE_COLUMN)?,
            energy: index_of(ENERGY_COLUMN)?,
        };

        let mut dataset = Dataset {
            columns: schema.fields().iter().map(|f| f.name().clone()).collect(),
            rows: Vec::new(),
            records: Vec::new(),
        };

        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_header(true)
            .build(Cursor::new(bytes))?;
        for batch in reader {
            dataset.append_batch(&batch?, &indices)?;
        }

        tracing::debug!(records = dataset.len(), "parsed CSV dataset");
        Ok(dataset)
    }

    /// Build a dataset from typed records, with only the three required columns.
    #[must_use]
    pub fn from_records(records: Vec<EnergyRecord>) -> Self {
        let rows = records
            .iter()
            .map(|r| vec![r.algorithm.clone(), r.input_size.clone(), r.energy.to_string()])
            .collect();
        Self {
            columns: vec![
                ALGORITHM_COLUMN.to_string(),
                INPUT_SIZE_COLUMN.to_string(),
                ENERGY_COLUMN.to_string(),
            ],
            rows,
            records,
        }
    }

    fn append_batch(
        &mut self,
        batch: &RecordBatch,
        indices: &ColumnIndices,
    ) -> Result<(), DatasetError> {
        let text_columns = (0..batch.num_columns())
            .map(|i| {
                if i == indices.energy {
                    Ok(None)
                } else {
                    batch
                        .column(i)
                        .as_string_opt::<i32>()
                        .map(Some)
                        .ok_or_else(|| DatasetError::UnexpectedType(self.columns[i].clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let energy = batch
            .column(indices.energy)
            .as_primitive_opt::<Float64Type>()
            .ok_or_else(|| DatasetError::UnexpectedType(ENERGY_COLUMN.to_string()))?;

        for i in 0..batch.num_rows() {
            let row_number = self.rows.len() + 1;

            let cell = |column: usize| -> Option<String> {
                if column == indices.energy {
                    (!energy.is_null(i)).then(|| energy.value(i).to_string())
                } else {
                    text_columns[column]
                        .filter(|array| !array.is_null(i))
                        .map(|array| array.value(i).to_string())
                }
            };
            let required = |column: usize, name: &str| {
                cell(column)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| DatasetError::MissingValue {
                        row: row_number,
                        column: name.to_string(),
                    })
            };

            let algorithm = required(indices.algorithm, ALGORITHM_COLUMN)?;
            let input_size = required(indices.input_size, INPUT_SIZE_COLUMN)?;
            if energy.is_null(i) {
                return Err(DatasetError::MissingValue {
                    row: row_number,
                    column: ENERGY_COLUMN.to_string(),
                });
            }
            let value = energy.value(i);
            if !value.is_finite() {
                return Err(DatasetError::NonFinite { row: row_number });
            }

            self.rows
                .push((0..batch.num_columns()).map(|c| cell(c).unwrap_or_default()).collect());
            self.records.push(EnergyRecord {
                algorithm,
                input_size,
                energy: value,
            });
        }
        Ok(())
    }

    /// Column names in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Display rows, one per record.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct input sizes in order of first appearance.
    #[must_use]
    pub fn input_sizes(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.input_size.as_str()))
    }

    /// Distinct algorithms in order of first appearance.
    #[must_use]
    pub fn algorithms(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.algorithm.as_str()))
    }

    /// Whether any record has the given input size.
    #[must_use]
    pub fn has_input_size(&self, size: &str) -> bool {
        self.records.iter().any(|r| r.input_size == size)
    }

    /// `preferred` if present in the data, else the first input size.
    #[must_use]
    pub fn default_input_size<'a>(&'a self, preferred: &'a str) -> Option<&'a str> {
        if self.has_input_size(preferred) {
            Some(preferred)
        } else {
            self.input_sizes().first().copied()
        }
    }

    /// Records with the given input size, in file order.
    pub fn filter_by_size<'a>(&'a self, size: &'a str) -> impl Iterator<Item = &'a EnergyRecord> {
        self.records.iter().filter(move |r| r.input_size == size)
    }

    /// Energy values at one input size, grouped by algorithm.
    ///
    /// Groups appear in order of each algorithm's first record at that size.
    #[must_use]
    pub fn groups_for(&self, size: &str) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for record in self.filter_by_size(size) {
            match groups.iter_mut().find(|g| g.label == record.algorithm) {
                Some(group) => group.values.push(record.energy),
                None => groups.push(Group {
                    label: record.algorithm.clone(),
                    values: vec![record.energy],
                }),
            }
        }
        groups
    }

    /// The first `n` display rows.
    #[must_use]
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// One page of display rows. Out-of-range pages clamp to the last page.
    #[must_use]
    pub fn page(&self, index: usize, page_size: usize) -> TablePage {
        let page_size = page_size.max(1);
        let page_count = self.rows.len().div_ceil(page_size).max(1);
        let page = index.min(page_count - 1);
        let start = page * page_size;
        let end = (start + page_size).min(self.rows.len());

        TablePage {
            columns: self.columns.clone(),
            rows: self.rows[start..end].to_vec(),
            page,
            page_count,
            total_rows: self.rows.len(),
        }
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
