use std::fs::File;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::tempdir;

use super::*;
use crate::reader::{NdsklReader, Section, SectionSet};

const SKELETON: &str = "\
ANDSKEL
2
[CRITICAL POINTS]
2
0 0.0 0.0 -1.0 1 0
 1
 1 0
3 1.0 1.0 2.5 0 0
 1
 0 0
[FILAMENTS]
1
0 1 3
 0.0 0.0
 0.5 0.5
 1.0 1.0
[CRITICAL POINTS DATA]
2
persistence
parent_index
2
3.5 0
3.5 1
[FILAMENTS DATA]
1
field_value
3
1.0
2.0
3.0
";

fn load(sections: SectionSet) -> Skeleton {
    NdsklReader::from_bytes(SKELETON, ReaderConfig::default())
        .unwrap()
        .load_sections(sections)
        .unwrap()
}

fn footer_value(path: &Path, key: &str) -> Option<String> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap()).unwrap();
    builder
        .metadata()
        .file_metadata()
        .key_value_metadata()?
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.clone())
}

#[test]
fn test_export_all_tables() {
    let dir = tempdir().unwrap();
    let skeleton = load(SectionSet::all());
    let stats = export_skeleton(&skeleton, dir.path(), &ExportConfig::default()).unwrap();

    assert_eq!(stats.tables.len(), 6);
    assert_eq!(stats.table(CRITICAL_POINTS_TABLE).unwrap().rows, 2);
    assert_eq!(stats.table(CRITICAL_POINT_LINKS_TABLE).unwrap().rows, 2);
    assert_eq!(stats.table(FILAMENTS_TABLE).unwrap().rows, 1);
    assert_eq!(stats.table(SAMPLING_POINTS_TABLE).unwrap().rows, 3);
    assert_eq!(stats.table(FILAMENTS_DATA_TABLE).unwrap().rows, 3);
    assert!(stats.total_bytes() > 0);

    let json = std::fs::read_to_string(dir.path().join(METADATA_FILE)).unwrap();
    assert_eq!(&FileMetadata::from_json(&json).unwrap(), skeleton.metadata());
}

#[test]
fn test_export_round_trip() {
    let dir = tempdir().unwrap();
    let skeleton = load(SectionSet::all());
    export_skeleton(&skeleton, dir.path(), &ExportConfig::fast()).unwrap();

    let path = dir.path().join("critical_points_data.parquet");
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<RecordBatch> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(batches.len(), 1);
    // The footer keys come back as schema metadata, so compare columns
    let original = skeleton.critical_points_data().unwrap().batch();
    assert_eq!(batches[0].columns(), original.columns());
    assert_eq!(batches[0].schema().fields(), original.schema().fields());
}

#[test]
fn test_footer_metadata() {
    let dir = tempdir().unwrap();
    let skeleton = load(SectionSet::all());
    export_skeleton(&skeleton, dir.path(), &ExportConfig::default()).unwrap();

    let path = dir.path().join("sampling_points.parquet");
    assert_eq!(footer_value(&path, KEY_NDIMS).as_deref(), Some("2"));
    assert_eq!(footer_value(&path, KEY_SECTION).as_deref(), Some(FILAMENTS_MARKER));
    assert_eq!(
        footer_value(&path, KEY_FORMAT_VERSION).as_deref(),
        Some(NDSKL_FORMAT_VERSION)
    );
}

#[test]
fn test_export_skips_unselected_sections() {
    let dir = tempdir().unwrap();
    let skeleton = load(SectionSet::none().with(Section::Filaments, true));
    let stats = export_skeleton(&skeleton, dir.path(), &ExportConfig::default()).unwrap();

    assert_eq!(stats.tables.len(), 2);
    assert!(dir.path().join("filaments.parquet").exists());
    assert!(!dir.path().join("critical_points.parquet").exists());
    assert!(dir.path().join(METADATA_FILE).exists());
}

#[test]
fn test_row_group_size() {
    let dir = tempdir().unwrap();
    let skeleton = load(SectionSet::all());
    let config = ExportConfig {
        row_group_size: 1,
        ..ExportConfig::default()
    };
    let stats = export_skeleton(&skeleton, dir.path(), &config).unwrap();
    assert_eq!(stats.table(SAMPLING_POINTS_TABLE).unwrap().row_groups, 3);
}

#[test]
fn test_compression_presets() {
    assert_eq!(ExportConfig::default().compression, CompressionType::Zstd(9));
    assert_eq!(ExportConfig::fast().compression, CompressionType::Snappy);
    assert_eq!(
        ExportConfig::max_compression().compression,
        CompressionType::Zstd(22)
    );
    let balanced = ExportConfig::balanced();
    assert_eq!(balanced.compression, ExportConfig::default().compression);
    assert_eq!(balanced.row_group_size, ExportConfig::default().row_group_size);
}

#[test]
fn test_export_file_missing_input() {
    let dir = tempdir().unwrap();
    let err = export_file(
        dir.path().join("missing.NDskl.a"),
        dir.path().join("out"),
        ReaderConfig::default(),
        &ExportConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::ReaderError(_)));
}
