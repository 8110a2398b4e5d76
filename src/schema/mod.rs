//! # Arrow Schemas for Decoded Skeletons
//!
//! Column names, Arrow schemas, and the name-based typing rules used for the
//! tables produced by the [`reader`](crate::reader).
//!
//! | Table | Columns |
//! |-------|---------|
//! | critical points | `type` Int16, `Pos*` Float32, `value` Float64, `pairID` Int64, `boundary` Int16, `nfil` Int64, `firstIndex` Int64 |
//! | critical point links | `destID` Int64, `filID` Int64 |
//! | filaments | `CP1`, `CP2`, `nSamp`, `firstIndex` Int64 |
//! | sampling points | `Pos*` Float32 |
//! | data tables | declared names, typed by [`dtype::infer_column_type`] |

mod builders;
pub mod columns;
pub mod dtype;


pub use builders::{
    create_critical_point_links_schema, create_critical_points_schema,
    create_data_table_schema, create_filaments_schema, create_sampling_points_schema,
};
pub use dtype::{infer_column_type, ColumnType, TableKind};

/// Version of the exported table layout
pub const NDSKL_FORMAT_VERSION: &str = "1.0.0";

/// Field metadata key naming the section marker a column was decoded from
pub const KEY_SECTION: &str = "ndskl:section";
/// Parquet footer key for the layout version
pub const KEY_FORMAT_VERSION: &str = "ndskl:format_version";
/// Parquet footer key for the skeleton dimensionality
pub const KEY_NDIMS: &str = "ndskl:ndims";
