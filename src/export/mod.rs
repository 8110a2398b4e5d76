//! # Parquet Export
//!
//! Writes a decoded [`Skeleton`] to a directory as one Parquet file per table
//! plus a `metadata.json` copy of the [`FileMetadata`].
//!
//! ```text
//! out/
//! ├── metadata.json
//! ├── critical_points.parquet
//! ├── critical_point_links.parquet
//! ├── filaments.parquet
//! ├── sampling_points.parquet
//! ├── critical_points_data.parquet
//! └── filaments_data.parquet
//! ```
//!
//! Tables of sections that were not decoded are skipped. Every file carries
//! the footer keys `ndskl:format_version`, `ndskl:ndims` and `ndskl:section`.

mod config;
mod error;
mod stats;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, ExportConfig};
pub use error::ExportError;
pub use stats::{ExportStats, TableStats};

use std::fs::{self, File};
use std::path::Path;

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::ArrowWriter;

use crate::metadata::FileMetadata;
use crate::reader::section::{
    CRITICAL_POINTS_DATA_MARKER, CRITICAL_POINTS_MARKER, FILAMENTS_DATA_MARKER, FILAMENTS_MARKER,
};
use crate::reader::{NdsklReader, ReaderConfig, Skeleton};
use crate::schema::{KEY_FORMAT_VERSION, KEY_NDIMS, KEY_SECTION, NDSKL_FORMAT_VERSION};

/// File name of the metadata copy
pub const METADATA_FILE: &str = "metadata.json";
/// Table holding one row per critical point
pub const CRITICAL_POINTS_TABLE: &str = "critical_points";
/// Table holding the flat `destID` / `filID` arrays
pub const CRITICAL_POINT_LINKS_TABLE: &str = "critical_point_links";
/// Table holding one row per filament
pub const FILAMENTS_TABLE: &str = "filaments";
/// Table holding one row per sampling point
pub const SAMPLING_POINTS_TABLE: &str = "sampling_points";
/// Table holding `[CRITICAL POINTS DATA]`
pub const CRITICAL_POINTS_DATA_TABLE: &str = "critical_points_data";
/// Table holding `[FILAMENTS DATA]`
pub const FILAMENTS_DATA_TABLE: &str = "filaments_data";

/// Load `input` and export every selected section to `output_dir`
pub fn export_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    reader_config: ReaderConfig,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    let skeleton = NdsklReader::open_with_config(input, reader_config)?.load()?;
    export_skeleton(&skeleton, output_dir, config)
}

/// Export the decoded sections of `skeleton` to `output_dir`, creating it if needed
pub fn export_skeleton<P: AsRef<Path>>(
    skeleton: &Skeleton,
    output_dir: P,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;
    write_metadata(skeleton.metadata(), dir)?;

    let metadata = skeleton.metadata();
    let mut stats = ExportStats::default();

    if let Some(cps) = skeleton.critical_points() {
        stats.tables.extend(write_table(
            dir,
            CRITICAL_POINTS_TABLE,
            CRITICAL_POINTS_MARKER,
            cps.table(),
            metadata,
            config,
        )?);
        stats.tables.extend(write_table(
            dir,
            CRITICAL_POINT_LINKS_TABLE,
            CRITICAL_POINTS_MARKER,
            &cps.links_batch()?,
            metadata,
            config,
        )?);
    }

    if let Some(filaments) = skeleton.filaments() {
        stats.tables.extend(write_table(
            dir,
            FILAMENTS_TABLE,
            FILAMENTS_MARKER,
            filaments.table(),
            metadata,
            config,
        )?);
        stats.tables.extend(write_table(
            dir,
            SAMPLING_POINTS_TABLE,
            FILAMENTS_MARKER,
            &filaments.sampling_points().to_record_batch()?,
            metadata,
            config,
        )?);
    }

    if let Some(table) = skeleton.critical_points_data() {
        stats.tables.extend(write_table(
            dir,
            CRITICAL_POINTS_DATA_TABLE,
            CRITICAL_POINTS_DATA_MARKER,
            table.batch(),
            metadata,
            config,
        )?);
    }

    if let Some(table) = skeleton.filaments_data() {
        stats.tables.extend(write_table(
            dir,
            FILAMENTS_DATA_TABLE,
            FILAMENTS_DATA_MARKER,
            table.batch(),
            metadata,
            config,
        )?);
    }

    info!("Exported skeleton to {}: {}", dir.display(), stats);
    Ok(stats)
}

fn write_metadata(metadata: &FileMetadata, dir: &Path) -> Result<(), ExportError> {
    fs::write(dir.join(METADATA_FILE), metadata.to_json()?)?;
    Ok(())
}

fn write_table(
    dir: &Path,
    name: &'static str,
    marker: &str,
    batch: &RecordBatch,
    metadata: &FileMetadata,
    config: &ExportConfig,
) -> Result<Option<TableStats>, ExportError> {
    let path = dir.join(format!("{}.parquet", name));
    if batch.num_columns() == 0 {
        // Parquet cannot represent a table without columns
        debug!("Skipping {}: no columns declared", name);
        return Ok(None);
    }
    debug!("Writing {} rows to {}", batch.num_rows(), path.display());

    let footer = vec![
        (KEY_FORMAT_VERSION.to_string(), NDSKL_FORMAT_VERSION.to_string()),
        (KEY_NDIMS.to_string(), metadata.ndims.to_string()),
        (KEY_SECTION.to_string(), marker.to_string()),
    ];
    let float_columns: Vec<String> = batch
        .schema_ref()
        .fields()
        .iter()
        .filter(|f| matches!(f.data_type(), DataType::Float32 | DataType::Float64))
        .map(|f| f.name().clone())
        .collect();
    let props = config.to_writer_properties(&footer, &float_columns);

    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    let file_metadata = writer.close()?;

    Ok(Some(TableStats {
        name,
        rows: batch.num_rows(),
        row_groups: file_metadata.row_groups.len(),
        file_size_bytes: fs::metadata(&path)?.len(),
    }))
}
