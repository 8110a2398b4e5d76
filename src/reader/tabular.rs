//! Decode pass for the two self-describing data sections.

use std::io::BufRead;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int16Array, Int64Array};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::info;

use super::cursor::{locate_section, parse_token, LineCursor};
use super::section::{CRITICAL_POINTS_DATA_MARKER, FILAMENTS_DATA_MARKER};
use super::{ReaderConfig, ReaderError};
use crate::metadata::TableLayout;
use crate::schema::{create_data_table_schema, infer_column_type, ColumnType, TableKind};

/// A decoded `[CRITICAL POINTS DATA]` or `[FILAMENTS DATA]` table
#[derive(Debug, Clone)]
pub struct DataTable {
    kind: TableKind,
    batch: RecordBatch,
}

impl DataTable {
    /// Which section the table came from
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// The decoded columns
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Float64 column by name
    pub fn float64_column(&self, name: &str) -> Option<&Float64Array> {
        self.column(name)?.as_any().downcast_ref()
    }

    /// Int64 column by name
    pub fn int64_column(&self, name: &str) -> Option<&Int64Array> {
        self.column(name)?.as_any().downcast_ref()
    }

    /// Int16 column by name
    pub fn int16_column(&self, name: &str) -> Option<&Int16Array> {
        self.column(name)?.as_any().downcast_ref()
    }
}

/// Preallocated storage for one column
enum ColumnBuffer {
    Int16(Vec<i16>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ColumnBuffer {
    fn allocate(column_type: ColumnType, rows: usize) -> Self {
        match column_type {
            ColumnType::Int16 => ColumnBuffer::Int16(vec![0; rows]),
            ColumnType::Int64 => ColumnBuffer::Int64(vec![0; rows]),
            ColumnType::Float64 => ColumnBuffer::Float64(vec![0.0; rows]),
        }
    }

    fn write(&mut self, row: usize, token: &str, line: usize, name: &str) -> Result<(), ReaderError> {
        match self {
            ColumnBuffer::Int16(values) => values[row] = parse_token(token, line, name)?,
            ColumnBuffer::Int64(values) => values[row] = parse_token(token, line, name)?,
            ColumnBuffer::Float64(values) => values[row] = parse_token(token, line, name)?,
        }
        Ok(())
    }

    fn into_array(self) -> ArrayRef {
        match self {
            ColumnBuffer::Int16(values) => Arc::new(Int16Array::from(values)),
            ColumnBuffer::Int64(values) => Arc::new(Int64Array::from(values)),
            ColumnBuffer::Float64(values) => Arc::new(Float64Array::from(values)),
        }
    }
}

/// Decode one data section.
///
/// `layout` comes from the metadata pass: its column names fix the column
/// types and its row count is the governing count (critical points, or total
/// sampling points).
pub(crate) fn decode_data_table<R: BufRead>(
    reader: R,
    kind: TableKind,
    layout: &TableLayout,
    config: &ReaderConfig,
) -> Result<DataTable, ReaderError> {
    let (marker, context) = match kind {
        TableKind::CriticalPointsData => (CRITICAL_POINTS_DATA_MARKER, "critical point data"),
        TableKind::FilamentsData => (FILAMENTS_DATA_MARKER, "filament data"),
    };
    let rows = layout.row_count;
    let names = &layout.column_names;

    let mut buffers: Vec<ColumnBuffer> = names
        .iter()
        .map(|name| ColumnBuffer::allocate(infer_column_type(kind, name), rows))
        .collect();

    let mut cursor = LineCursor::new(reader, config.comment_char);
    locate_section(&mut cursor, marker)?;

    let column_count = cursor.expect_count("column count")?;
    if column_count != names.len() {
        return Err(ReaderError::consistency(
            format!("{} column count", context),
            names.len(),
            column_count,
        ));
    }
    // Names were captured by the metadata pass
    cursor.skip_lines(column_count, "column name")?;

    if config.table_row_counts {
        let declared = cursor.expect_count("row count")?;
        if declared != rows {
            return Err(ReaderError::consistency(
                format!("{} row count", context),
                rows,
                declared,
            ));
        }
    }

    for row in 0..rows {
        let record = cursor.expect_record("data row")?;
        if record.len() != column_count {
            return Err(ReaderError::format(
                record.line(),
                format!(
                    "{} row has {} values, expected {}",
                    context,
                    record.len(),
                    column_count
                ),
            ));
        }
        for ((buffer, token), name) in buffers.iter_mut().zip(record.tokens()).zip(names) {
            buffer.write(row, token, record.line(), name)?;
        }
    }

    let arrays: Vec<ArrayRef> = buffers.into_iter().map(ColumnBuffer::into_array).collect();
    // Explicit row count keeps a table without columns at its declared length
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    let batch = RecordBatch::try_new_with_options(
        Arc::new(create_data_table_schema(kind, names.as_slice())),
        arrays,
        &options,
    )?;

    info!(
        "Decoded {} table: {} rows x {} columns",
        context, rows, column_count
    );

    Ok(DataTable { kind, batch })
}
