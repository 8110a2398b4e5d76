//! `[CRITICAL POINTS]` decode pass.

use std::io::BufRead;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array, Float64Array, Int16Array, Int64Array};
use arrow::record_batch::RecordBatch;
use log::info;

use super::cursor::{locate_section, LineCursor};
use super::section::CRITICAL_POINTS_MARKER;
use super::{ReaderConfig, ReaderError};
use crate::metadata::FileMetadata;
use crate::schema::{columns, create_critical_points_schema};

/// Decoded `[CRITICAL POINTS]` section
///
/// `table` has one row per critical point. The filament references of all
/// points are concatenated in `dest_id` / `fil_id`; point `i` owns the range
/// `[firstIndex[i], firstIndex[i] + nfil[i])`.
#[derive(Debug, Clone)]
pub struct CriticalPoints {
    table: RecordBatch,
    nfil: Int64Array,
    first_index: Int64Array,
    dest_id: Int64Array,
    fil_id: Int64Array,
}

impl CriticalPoints {
    /// The critical point table
    pub fn table(&self) -> &RecordBatch {
        &self.table
    }

    /// Destination critical point id of every filament reference
    pub fn dest_id(&self) -> &Int64Array {
        &self.dest_id
    }

    /// Filament id of every filament reference
    pub fn fil_id(&self) -> &Int64Array {
        &self.fil_id
    }

    /// Number of critical points
    pub fn len(&self) -> usize {
        self.table.num_rows()
    }

    /// True when the section declared no critical points
    pub fn is_empty(&self) -> bool {
        self.table.num_rows() == 0
    }

    /// The `nfil` column
    pub fn nfil(&self) -> &Int64Array {
        &self.nfil
    }

    /// The `firstIndex` column
    pub fn first_index(&self) -> &Int64Array {
        &self.first_index
    }

    /// `(destID, filID)` slices of the references owned by critical point `index`
    pub fn links(&self, index: usize) -> Option<(&[i64], &[i64])> {
        if index >= self.len() {
            return None;
        }
        let start = usize::try_from(self.first_index.value(index)).ok()?;
        let end = start.checked_add(usize::try_from(self.nfil.value(index)).ok()?)?;
        Some((
            self.dest_id.values().get(start..end)?,
            self.fil_id.values().get(start..end)?,
        ))
    }

    /// The flat reference arrays as a two-column batch (`destID`, `filID`)
    pub fn links_batch(&self) -> Result<RecordBatch, ReaderError> {
        let batch = RecordBatch::try_new(
            Arc::new(crate::schema::create_critical_point_links_schema()),
            vec![
                Arc::new(self.dest_id.clone()) as ArrayRef,
                Arc::new(self.fil_id.clone()) as ArrayRef,
            ],
        )?;
        Ok(batch)
    }
}

/// Decode `[CRITICAL POINTS]` into exact-size buffers sized from `metadata`
pub(crate) fn decode_critical_points<R: BufRead>(
    reader: R,
    metadata: &FileMetadata,
    config: &ReaderConfig,
) -> Result<CriticalPoints, ReaderError> {
    let ndims = metadata.ndims;
    let count = metadata.critical_points_count;
    let total_links = metadata.critical_point_links_count;

    let mut types = vec![0i16; count];
    let mut positions = vec![vec![0f32; count]; ndims];
    let mut values = vec![0f64; count];
    let mut pair_ids = vec![0i64; count];
    let mut boundaries = vec![0i16; count];
    let mut nfils = vec![0i64; count];
    let mut first_indices = vec![0i64; count];
    let mut dest_id = vec![0i64; total_links];
    let mut fil_id = vec![0i64; total_links];

    let mut cursor = LineCursor::new(reader, config.comment_char);
    locate_section(&mut cursor, CRITICAL_POINTS_MARKER)?;

    let declared = cursor.expect_count("critical point count")?;
    if declared != count {
        return Err(ReaderError::consistency("critical point count", count, declared));
    }

    let mut offset = 0usize;
    for i in 0..count {
        {
            let record = cursor.expect_record("critical point record")?;
            record.require(ndims + 4)?;
            types[i] = record.get(0, columns::TYPE)?;
            for (dim, column) in positions.iter_mut().enumerate() {
                column[i] = record.get(1 + dim, "position")?;
            }
            values[i] = record.get(ndims + 1, columns::VALUE)?;
            pair_ids[i] = record.get(ndims + 2, columns::PAIR_ID)?;
            boundaries[i] = record.get(ndims + 3, columns::BOUNDARY)?;
        }

        let nfil: usize = cursor.expect_record("filament count line")?.get(0, columns::NFIL)?;
        let end = offset
            .checked_add(nfil)
            .filter(|end| *end <= total_links)
            .ok_or_else(|| {
                ReaderError::consistency(
                    "filament reference count",
                    total_links,
                    offset.saturating_add(nfil),
                )
            })?;
        nfils[i] = nfil as i64;
        first_indices[i] = offset as i64;

        for slot in offset..end {
            let record = cursor.expect_record("filament reference")?;
            record.require_exact(2)?;
            dest_id[slot] = record.get(0, columns::DEST_ID)?;
            fil_id[slot] = record.get(1, columns::FIL_ID)?;
        }
        offset = end;
    }

    if offset != total_links {
        return Err(ReaderError::consistency(
            "filament reference count",
            total_links,
            offset,
        ));
    }

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(ndims + 6);
    arrays.push(Arc::new(Int16Array::from(types)));
    for column in positions {
        arrays.push(Arc::new(Float32Array::from(column)));
    }
    arrays.push(Arc::new(Float64Array::from(values)));
    arrays.push(Arc::new(Int64Array::from(pair_ids)));
    arrays.push(Arc::new(Int16Array::from(boundaries)));
    let nfil = Int64Array::from(nfils);
    let first_index = Int64Array::from(first_indices);
    arrays.push(Arc::new(nfil.clone()));
    arrays.push(Arc::new(first_index.clone()));

    let table = RecordBatch::try_new(Arc::new(create_critical_points_schema(ndims)), arrays)?;

    info!(
        "Decoded {} critical points with {} filament references",
        count, total_links
    );

    Ok(CriticalPoints {
        table,
        nfil,
        first_index,
        dest_id: Int64Array::from(dest_id),
        fil_id: Int64Array::from(fil_id),
    })
}
