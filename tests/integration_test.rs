//! Integration tests for ndskl
//!
//! These tests exercise the public API against files on disk.

mod common;

use std::fs::{self, File};
use std::path::Path;

use arrow::array::{Array, Float64Array, Int16Array, Int64Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::{tempdir, TempDir};

use ndskl::export::{export_file, ExportConfig, SAMPLING_POINTS_TABLE};
use ndskl::prelude::*;
use ndskl::validator::validate_ndskl_file;

use common::{drop_last_lines, generate_ndskl, planar_shape, SkeletonShape, CP_DATA_COLUMNS};

const MINIMAL_NDSKL: &str = "\
ANDSKEL
3
# generated by test
BBOX [0,0,0] [1,1,1]
[CRITICAL POINTS]
1
0 0 0 0 1.5 -1 0
 1
 1 0
[FILAMENTS]
1
0 1 2
 0 0 0
 1 1 1
[CRITICAL POINTS DATA]
1
persistence
1
2.0
[FILAMENTS DATA]
1
type
2
0
1
";

fn write_file(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

/// The worked example: one 3D critical point, one filament of two samples
#[test]
fn test_minimal_file_end_to_end() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "minimal.NDskl.a", MINIMAL_NDSKL);

    let skeleton = ndskl::reader::load(&path).unwrap();
    let metadata = skeleton.metadata();
    assert_eq!(metadata.ndims, 3);
    assert_eq!(
        metadata.bbox,
        Some(BoundingBox::new(vec![0.0; 3], vec![1.0; 3]))
    );
    assert_eq!(metadata.critical_points_count, 1);
    assert_eq!(metadata.critical_point_links_count, 1);
    assert_eq!(metadata.filaments_count, 1);
    assert_eq!(metadata.sampling_points_count, 2);

    let cps = skeleton.critical_points().unwrap();
    let table = cps.table();
    let value = table
        .column_by_name(columns::VALUE)
        .unwrap()
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(value.value(0), 1.5);
    let pair = table
        .column_by_name(columns::PAIR_ID)
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(pair.value(0), -1);
    let boundary = table
        .column_by_name(columns::BOUNDARY)
        .unwrap()
        .as_any()
        .downcast_ref::<Int16Array>()
        .unwrap();
    assert_eq!(boundary.value(0), 0);
    assert_eq!(cps.nfil().value(0), 1);
    assert_eq!(cps.first_index().value(0), 0);
    assert_eq!(cps.dest_id().value(0), 1);
    assert_eq!(cps.fil_id().value(0), 0);

    let filaments = skeleton.filaments().unwrap();
    let fil_table = filaments.table();
    let cp1 = fil_table
        .column_by_name(columns::CP1)
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(cp1.value(0), 0);
    assert_eq!(filaments.nsamp().value(0), 2);
    assert_eq!(filaments.first_index().value(0), 0);
    assert_eq!(
        filaments.sampling_points().values(),
        &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]
    );

    let cp_data = skeleton.critical_points_data().unwrap();
    assert_eq!(cp_data.float64_column("persistence").unwrap().value(0), 2.0);
    let fil_data = skeleton.filaments_data().unwrap();
    let types = fil_data.int16_column("type").unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!((types.value(0), types.value(1)), (0, 1));
}

#[test]
fn test_scan_only() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "planar.NDskl.a", &generate_ndskl(&planar_shape()));

    let metadata = ndskl::reader::scan(&path).unwrap();
    assert_eq!(metadata.ndims, 2);
    assert_eq!(metadata.critical_points_count, 3);
    assert_eq!(metadata.critical_point_links_count, 4);
    assert_eq!(metadata.filaments_count, 2);
    assert_eq!(metadata.sampling_points_count, 5);
    assert_eq!(metadata.critical_points_data.column_names, CP_DATA_COLUMNS);
    assert_eq!(metadata.position_columns(), vec!["Pos0", "Pos1"]);
}

#[test]
fn test_generated_file_typing() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "planar.NDskl.a", &generate_ndskl(&planar_shape()));
    let skeleton = ndskl::reader::load(&path).unwrap();

    let cp_data = skeleton.critical_points_data().unwrap();
    assert!(cp_data.int64_column("persistence_pair").is_some());
    assert!(cp_data.int64_column("parent_index").is_some());
    assert!(cp_data.int64_column("parent_log_index").is_some());
    assert!(cp_data.float64_column("persistence").is_some());
    assert!(cp_data.float64_column("cell").is_some());

    let fil_data = skeleton.filaments_data().unwrap();
    assert!(fil_data.int16_column("type").is_some());
    assert!(fil_data.float64_column("robustness").is_some());
    assert_eq!(fil_data.float64_column("field_value").unwrap().value(0), 0.5);
}

#[test]
fn test_load_sections_from_disk() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "planar.NDskl.a", &generate_ndskl(&planar_shape()));

    let sections: SectionSet = [Section::CriticalPoints, Section::CriticalPointsData]
        .into_iter()
        .collect();
    let skeleton = ndskl::reader::load_sections(&path, sections).unwrap();
    assert!(skeleton.has_section(Section::CriticalPoints));
    assert!(skeleton.has_section(Section::CriticalPointsData));
    assert!(!skeleton.has_section(Section::Filaments));
    assert!(skeleton.filaments_data().is_none());
}

#[test]
fn test_truncated_file_on_disk() {
    let dir = tempdir().unwrap();
    let text = drop_last_lines(&generate_ndskl(&planar_shape()), 1);
    let path = write_file(&dir, "truncated.NDskl.a", &text);

    let err = ndskl::reader::load(&path).unwrap_err();
    assert!(err.is_format_error(), "unexpected error: {}", err);
}

#[test]
fn test_missing_file() {
    let err = ndskl::reader::load("/nonexistent/skeleton.NDskl.a").unwrap_err();
    assert!(matches!(err, ReaderError::IoError(_)));
}

#[test]
fn test_empty_sections() {
    let shape = SkeletonShape {
        ndims: 3,
        links_per_point: vec![],
        samples_per_filament: vec![],
        with_bbox: false,
    };
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "empty.NDskl.a", &generate_ndskl(&shape));

    let skeleton = ndskl::reader::load(&path).unwrap();
    assert!(skeleton.critical_points().unwrap().is_empty());
    assert!(skeleton.filaments().unwrap().is_empty());
    assert_eq!(skeleton.filaments().unwrap().sampling_points().shape(), (0, 3));
    assert_eq!(skeleton.critical_points_data().unwrap().num_rows(), 0);
    assert_eq!(skeleton.filaments_data().unwrap().num_rows(), 0);
}

#[test]
fn test_export_round_trip() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "planar.NDskl.a", &generate_ndskl(&planar_shape()));
    let out = dir.path().join("out");

    let stats = export_file(&path, &out, ReaderConfig::default(), &ExportConfig::default()).unwrap();
    assert_eq!(stats.tables.len(), 6);

    let file = File::open(out.join(format!("{}.parquet", SAMPLING_POINTS_TABLE))).unwrap();
    let batches: Vec<_> = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 5);
    assert_eq!(batches[0].num_columns(), 2);

    let json = fs::read_to_string(out.join("metadata.json")).unwrap();
    let metadata = FileMetadata::from_json(&json).unwrap();
    assert_eq!(metadata, ndskl::reader::scan(&path).unwrap());
}

#[test]
fn test_validate_generated_file() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "planar.NDskl.a", &generate_ndskl(&planar_shape()));
    let report = validate_ndskl_file(Path::new(&path)).unwrap();
    assert!(!report.has_failures(), "{}", report);
    assert!(!report.has_warnings(), "{}", report);
}
