//! Metadata pass: sizes every section without storing payload.

use std::io::BufRead;

use log::{debug, info};

use super::cursor::{locate_section, LineCursor};
use super::section::{
    BBOX_TOKEN, CRITICAL_POINTS_DATA_MARKER, CRITICAL_POINTS_MARKER, FILAMENTS_DATA_MARKER,
    FILAMENTS_MARKER,
};
use super::{ReaderConfig, ReaderError};
use crate::metadata::{BoundingBox, FileMetadata, TableLayout};

/// Largest dimensionality accepted on the header line
pub const MAX_NDIMS: usize = 16;

/// Scan a whole NDskl stream and return its [`FileMetadata`]
pub(crate) fn scan_metadata<R: BufRead>(
    reader: R,
    config: &ReaderConfig,
) -> Result<FileMetadata, ReaderError> {
    let mut cursor = LineCursor::new(reader, config.comment_char);

    cursor.expect_line("file header")?;
    let ndims: usize = cursor.expect_record("dimension line")?.get(0, "Ndims")?;
    if ndims == 0 || ndims > MAX_NDIMS {
        return Err(cursor.format_error(format!(
            "Ndims must be between 1 and {}, found {}",
            MAX_NDIMS, ndims
        )));
    }

    let bbox = scan_bbox(&mut cursor, ndims)?;

    locate_section(&mut cursor, CRITICAL_POINTS_MARKER)?;
    let critical_points_count = cursor.expect_count("critical point count")?;
    let mut critical_point_links_count = 0;
    for _ in 0..critical_points_count {
        cursor.expect_line("critical point record")?;
        let nfil: usize = cursor
            .expect_record("filament count line")?
            .get(0, "nfil")?;
        cursor.skip_lines(nfil, "filament reference")?;
        critical_point_links_count += nfil;
    }
    debug!(
        "{} critical points, {} filament references",
        critical_points_count, critical_point_links_count
    );

    locate_section(&mut cursor, FILAMENTS_MARKER)?;
    let filaments_count = cursor.expect_count("filament count")?;
    let mut sampling_points_count = 0;
    for _ in 0..filaments_count {
        let nsamp: usize = cursor.expect_record("filament record")?.last("nSamp")?;
        cursor.skip_lines(nsamp, "sampling point")?;
        sampling_points_count += nsamp;
    }
    debug!(
        "{} filaments, {} sampling points",
        filaments_count, sampling_points_count
    );

    let critical_points_data = scan_table_layout(
        &mut cursor,
        CRITICAL_POINTS_DATA_MARKER,
        critical_points_count,
        config,
    )?;
    let filaments_data = scan_table_layout(
        &mut cursor,
        FILAMENTS_DATA_MARKER,
        sampling_points_count,
        config,
    )?;

    info!(
        "Scanned {} lines: ndims={}, {} critical points, {} filaments, {} sampling points",
        cursor.line_number(),
        ndims,
        critical_points_count,
        filaments_count,
        sampling_points_count
    );

    Ok(FileMetadata {
        ndims,
        bbox,
        critical_points_count,
        critical_point_links_count,
        filaments_count,
        sampling_points_count,
        critical_points_data,
        filaments_data,
    })
}

/// Skip comments after the header and parse an optional `BBOX` line.
///
/// A non-BBOX line is pushed back so the section search sees it.
fn scan_bbox<R: BufRead>(
    cursor: &mut LineCursor<R>,
    ndims: usize,
) -> Result<Option<BoundingBox>, ReaderError> {
    let line = cursor.expect_content_line("header")?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !tokens.first().is_some_and(|t| t.contains(BBOX_TOKEN)) {
        cursor.push_back();
        return Ok(None);
    }

    let parse = |index: usize, corner: &str| -> Result<Vec<f64>, String> {
        let token = tokens
            .get(index)
            .ok_or_else(|| format!("BBOX is missing its {} corner", corner))?;
        let values = BoundingBox::parse_corner(token)
            .ok_or_else(|| format!("cannot parse BBOX {} corner {:?}", corner, token))?;
        if values.len() != ndims {
            return Err(format!(
                "BBOX {} corner has {} values, Ndims is {}",
                corner,
                values.len(),
                ndims
            ));
        }
        Ok(values)
    };
    let corners = parse(1, "min").and_then(|min| parse(2, "max").map(|max| (min, max)));

    match corners {
        Ok((min, max)) => Ok(Some(BoundingBox::new(min, max))),
        Err(message) => Err(cursor.format_error(message)),
    }
}

/// Read the column declaration of a data section and skip its rows
fn scan_table_layout<R: BufRead>(
    cursor: &mut LineCursor<R>,
    marker: &str,
    row_count: usize,
    config: &ReaderConfig,
) -> Result<TableLayout, ReaderError> {
    locate_section(cursor, marker)?;
    let column_count = cursor.expect_count("column count")?;
    let mut column_names = Vec::new();
    for _ in 0..column_count {
        column_names.push(cursor.expect_line("column name")?.trim().to_string());
    }
    let declared_rows = usize::from(config.table_row_counts) + row_count;
    cursor.skip_lines(declared_rows, "data row")?;

    Ok(TableLayout {
        row_count,
        column_names,
    })
}
