//! # ndskl - DisPerSE Skeleton Loader
//!
//! `ndskl` loads the ASCII skeleton files (`NDskl_ascii`) written by DisPerSE
//! into Apache Arrow tables: critical points with their filament references,
//! filaments with their sampling points, and the two self-describing
//! attribute tables.
//!
//! ## Key Features
//!
//! - **Two-phase loading**: a metadata pass sizes every section, then each
//!   selected section is decoded by its own pass into exact-size buffers.
//!
//! - **Section selection**: decode only what you need; unselected sections are
//!   never parsed.
//!
//! - **Strict consistency**: every declared count is checked against the
//!   reconstructed one, and errors carry the offending line number.
//!
//! - **Arrow output**: decoded tables are `RecordBatch`es ready for Parquet
//!   export or any Arrow-aware tool.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ndskl::prelude::*;
//!
//! let skeleton = ndskl::reader::load("skeleton.NDskl.a")?;
//! let cps = skeleton.critical_points().unwrap();
//! println!("{} critical points", cps.len());
//!
//! if let Some((dest, fil)) = cps.links(0) {
//!     println!("point 0 links to {:?} via filaments {:?}", dest, fil);
//! }
//! # Ok::<(), ndskl::reader::ReaderError>(())
//! ```
//!
//! ## File Layout
//!
//! ```text
//! ANDSKEL
//! <Ndims>
//! [BBOX [min...] [max...]]
//! [CRITICAL POINTS]
//! <count>, then per point: record, nfil, nfil reference lines
//! [FILAMENTS]
//! <count>, then per filament: CP1 CP2 nSamp, nSamp point lines
//! [CRITICAL POINTS DATA]
//! <ncols>, column names, row count, one row per critical point
//! [FILAMENTS DATA]
//! <ncols>, column names, row count, one row per sampling point
//! ```
//!
//! ## Architecture
//!
//! - [`reader`]: metadata pass, section decoders and the [`reader::NdsklReader`] entry point
//! - [`metadata`]: section sizes, bounding box and data table layouts
//! - [`schema`]: Arrow schemas, column names and column typing rules
//! - [`export`]: Parquet export of a decoded skeleton
//! - [`validator`]: integrity report over a decoded skeleton

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod export;
pub mod metadata;
pub mod reader;
pub mod schema;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::export::{export_skeleton, CompressionType, ExportConfig, ExportStats};
    pub use crate::metadata::{BoundingBox, FileMetadata, TableLayout};
    pub use crate::reader::{
        CriticalPoints, DataTable, Filaments, NdsklReader, ReaderConfig, ReaderError,
        SamplingPoints, Section, SectionSet, Skeleton,
    };
    pub use crate::schema::{columns, ColumnType, TableKind};
    pub use crate::validator::{validate_ndskl_file, ValidationReport};
}
