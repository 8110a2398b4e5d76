use std::collections::HashMap;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::dtype::{infer_column_type, TableKind};
use super::KEY_SECTION;
use crate::reader::section::{
    CRITICAL_POINTS_DATA_MARKER, CRITICAL_POINTS_MARKER, FILAMENTS_DATA_MARKER, FILAMENTS_MARKER,
};

/// Creates a non-nullable Field annotated with the section it is decoded from
fn field_with_section(name: &str, data_type: DataType, section: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_SECTION.to_string(), section.to_string());
    Field::new(name, data_type, false).with_metadata(metadata)
}

/// Schema of the critical point table.
///
/// Columns: `type`, `Pos0..Pos{ndims-1}`, `value`, `pairID`, `boundary`,
/// `nfil`, `firstIndex`.
///
/// # Example
///
/// ```
/// use ndskl::schema::create_critical_points_schema;
///
/// let schema = create_critical_points_schema(3);
/// assert_eq!(schema.fields().len(), 9);
/// ```
pub fn create_critical_points_schema(ndims: usize) -> Schema {
    let section = CRITICAL_POINTS_MARKER;
    let mut builder = SchemaBuilder::new();

    builder.push(field_with_section(columns::TYPE, DataType::Int16, section));
    for name in columns::position_columns(ndims) {
        builder.push(field_with_section(&name, DataType::Float32, section));
    }
    builder.push(field_with_section(columns::VALUE, DataType::Float64, section));
    builder.push(field_with_section(columns::PAIR_ID, DataType::Int64, section));
    builder.push(field_with_section(columns::BOUNDARY, DataType::Int16, section));
    // Not in the file: derived while decoding to slice destID/filID
    builder.push(field_with_section(columns::NFIL, DataType::Int64, section));
    builder.push(field_with_section(columns::FIRST_INDEX, DataType::Int64, section));

    builder.finish()
}

/// Schema of the flat filament reference arrays (`destID`, `filID`)
pub fn create_critical_point_links_schema() -> Schema {
    let section = CRITICAL_POINTS_MARKER;
    Schema::new(vec![
        field_with_section(columns::DEST_ID, DataType::Int64, section),
        field_with_section(columns::FIL_ID, DataType::Int64, section),
    ])
}

/// Schema of the filament table: `CP1`, `CP2`, `nSamp`, `firstIndex`
pub fn create_filaments_schema() -> Schema {
    let section = FILAMENTS_MARKER;
    Schema::new(vec![
        field_with_section(columns::CP1, DataType::Int64, section),
        field_with_section(columns::CP2, DataType::Int64, section),
        field_with_section(columns::NSAMP, DataType::Int64, section),
        field_with_section(columns::FIRST_INDEX, DataType::Int64, section),
    ])
}

/// Schema of the sampling points, one Float32 column per dimension
pub fn create_sampling_points_schema(ndims: usize) -> Schema {
    Schema::new(
        columns::position_columns(ndims)
            .iter()
            .map(|name| field_with_section(name, DataType::Float32, FILAMENTS_MARKER))
            .collect::<Vec<_>>(),
    )
}

/// Schema of a self-describing data table, typed by [`infer_column_type`]
pub fn create_data_table_schema<S: AsRef<str>>(table: TableKind, column_names: &[S]) -> Schema {
    let section = match table {
        TableKind::CriticalPointsData => CRITICAL_POINTS_DATA_MARKER,
        TableKind::FilamentsData => FILAMENTS_DATA_MARKER,
    };
    Schema::new(
        column_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                field_with_section(name, infer_column_type(table, name).data_type(), section)
            })
            .collect::<Vec<_>>(),
    )
}
