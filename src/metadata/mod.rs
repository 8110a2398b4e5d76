//! # Skeleton File Metadata
//!
//! Sizes and schema information collected by the metadata pass over an NDskl
//! file. A [`FileMetadata`] is built once per parse and is read-only
//! afterwards; every decoder sizes its buffers from it.

mod bbox;


use serde::{Deserialize, Serialize};

pub use bbox::BoundingBox;

/// Declared shape of one of the two self-describing data tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Governing row count (critical points, or total sampling points)
    pub row_count: usize,
    /// Column names in declaration order, verbatim
    pub column_names: Vec<String>,
}

impl TableLayout {
    /// Number of declared columns
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }
}

/// Metadata extracted from an NDskl file without materialising its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Spatial dimensionality (`Ndims`)
    pub ndims: usize,
    /// Optional bounding box declared after the header
    pub bbox: Option<BoundingBox>,
    /// Number of critical points
    pub critical_points_count: usize,
    /// Total filament references over all critical points
    pub critical_point_links_count: usize,
    /// Number of filaments
    pub filaments_count: usize,
    /// Total sampling points over all filaments
    pub sampling_points_count: usize,
    /// Layout of `[CRITICAL POINTS DATA]`
    pub critical_points_data: TableLayout,
    /// Layout of `[FILAMENTS DATA]`
    pub filaments_data: TableLayout,
}

impl FileMetadata {
    /// Names of the position columns, `Pos0` .. `Pos{ndims-1}`
    pub fn position_columns(&self) -> Vec<String> {
        crate::schema::columns::position_columns(self.ndims)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
