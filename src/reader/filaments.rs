//! `[FILAMENTS]` decode pass.

use std::io::BufRead;
use std::sync::Arc;

use arrow::array::{ArrayRef, FixedSizeListArray, Float32Array, Int64Array};
use arrow::datatypes::{DataType, Field};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::info;

use super::cursor::{locate_section, LineCursor};
use super::section::FILAMENTS_MARKER;
use super::{ReaderConfig, ReaderError};
use crate::metadata::FileMetadata;
use crate::schema::{columns, create_filaments_schema, create_sampling_points_schema};

/// Positions of every filament sampling point, row-major `(rows, ndims)`
#[derive(Debug, Clone)]
pub struct SamplingPoints {
    ndims: usize,
    values: Float32Array,
}

impl SamplingPoints {
    /// Number of dimensions per point
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Number of sampling points
    pub fn len(&self) -> usize {
        self.values.len() / self.ndims
    }

    /// True when there are no sampling points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(rows, ndims)`
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.ndims)
    }

    /// Flat row-major coordinates
    pub fn values(&self) -> &[f32] {
        self.values.values()
    }

    /// Coordinates of point `index`
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows(index, 1)
    }

    /// Coordinates of `count` consecutive points starting at `start`, flattened
    pub fn rows(&self, start: usize, count: usize) -> Option<&[f32]> {
        let begin = start.checked_mul(self.ndims)?;
        let end = start.checked_add(count)?.checked_mul(self.ndims)?;
        self.values().get(begin..end)
    }

    /// One `Pos*` column per dimension
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let rows = self.len();
        let columns: Vec<ArrayRef> = (0..self.ndims)
            .map(|dim| {
                let column: Float32Array = (0..rows)
                    .map(|row| self.values()[row * self.ndims + dim])
                    .collect::<Vec<f32>>()
                    .into();
                Arc::new(column) as ArrayRef
            })
            .collect();
        RecordBatch::try_new(Arc::new(create_sampling_points_schema(self.ndims)), columns)
    }

    /// The points as a `FixedSizeList<Float32>[ndims]` array, one entry per point
    pub fn to_fixed_size_list(&self) -> Result<FixedSizeListArray, ArrowError> {
        let field = Arc::new(Field::new("item", DataType::Float32, false));
        let size = i32::try_from(self.ndims)
            .map_err(|_| ArrowError::InvalidArgumentError("ndims too large".to_string()))?;
        FixedSizeListArray::try_new(field, size, Arc::new(self.values.clone()), None)
    }
}

/// Decoded `[FILAMENTS]` section
///
/// Filament `i` owns sampling points `[firstIndex[i], firstIndex[i] + nSamp[i])`.
#[derive(Debug, Clone)]
pub struct Filaments {
    table: RecordBatch,
    nsamp: Int64Array,
    first_index: Int64Array,
    samples: SamplingPoints,
}

impl Filaments {
    /// The filament table (`CP1`, `CP2`, `nSamp`, `firstIndex`)
    pub fn table(&self) -> &RecordBatch {
        &self.table
    }

    /// All sampling points
    pub fn sampling_points(&self) -> &SamplingPoints {
        &self.samples
    }

    /// Number of filaments
    pub fn len(&self) -> usize {
        self.table.num_rows()
    }

    /// True when the section declared no filaments
    pub fn is_empty(&self) -> bool {
        self.table.num_rows() == 0
    }

    /// The `nSamp` column
    pub fn nsamp(&self) -> &Int64Array {
        &self.nsamp
    }

    /// The `firstIndex` column
    pub fn first_index(&self) -> &Int64Array {
        &self.first_index
    }

    /// Flattened coordinates of the sampling points of filament `index`
    pub fn samples_of(&self, index: usize) -> Option<&[f32]> {
        if index >= self.len() {
            return None;
        }
        let start = usize::try_from(self.first_index.value(index)).ok()?;
        let count = usize::try_from(self.nsamp.value(index)).ok()?;
        self.samples.rows(start, count)
    }
}

/// Decode `[FILAMENTS]` into exact-size buffers sized from `metadata`
pub(crate) fn decode_filaments<R: BufRead>(
    reader: R,
    metadata: &FileMetadata,
    config: &ReaderConfig,
) -> Result<Filaments, ReaderError> {
    let ndims = metadata.ndims;
    let count = metadata.filaments_count;
    let total_samples = metadata.sampling_points_count;

    let mut cp1 = vec![0i64; count];
    let mut cp2 = vec![0i64; count];
    let mut nsamps = vec![0i64; count];
    let mut first_indices = vec![0i64; count];
    let mut points = vec![0f32; total_samples * ndims];

    let mut cursor = LineCursor::new(reader, config.comment_char);
    locate_section(&mut cursor, FILAMENTS_MARKER)?;

    let declared = cursor.expect_count("filament count")?;
    if declared != count {
        return Err(ReaderError::consistency("filament count", count, declared));
    }

    let mut offset = 0usize;
    for i in 0..count {
        let nsamp: usize = {
            let record = cursor.expect_record("filament record")?;
            record.require(3)?;
            cp1[i] = record.get(0, columns::CP1)?;
            cp2[i] = record.get(1, columns::CP2)?;
            record.get(2, columns::NSAMP)?
        };
        let end = offset
            .checked_add(nsamp)
            .filter(|end| *end <= total_samples)
            .ok_or_else(|| {
                ReaderError::consistency(
                    "sampling point count",
                    total_samples,
                    offset.saturating_add(nsamp),
                )
            })?;
        nsamps[i] = nsamp as i64;
        first_indices[i] = offset as i64;

        for row in points[offset * ndims..end * ndims].chunks_exact_mut(ndims) {
            let record = cursor.expect_record("sampling point")?;
            record.require(ndims)?;
            for (dim, value) in row.iter_mut().enumerate() {
                *value = record.get(dim, "sampling point coordinate")?;
            }
        }
        offset = end;
    }

    if offset != total_samples {
        return Err(ReaderError::consistency(
            "sampling point count",
            total_samples,
            offset,
        ));
    }

    let nsamp = Int64Array::from(nsamps);
    let first_index = Int64Array::from(first_indices);
    let table = RecordBatch::try_new(
        Arc::new(create_filaments_schema()),
        vec![
            Arc::new(Int64Array::from(cp1)) as ArrayRef,
            Arc::new(Int64Array::from(cp2)),
            Arc::new(nsamp.clone()),
            Arc::new(first_index.clone()),
        ],
    )?;

    info!(
        "Decoded {} filaments with {} sampling points",
        count, total_samples
    );

    Ok(Filaments {
        table,
        nsamp,
        first_index,
        samples: SamplingPoints {
            ndims,
            values: Float32Array::from(points),
        },
    })
}
