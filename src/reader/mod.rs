//! # NDskl Reader Module
//!
//! Loads DisPerSE `NDskl_ascii` skeleton files into Arrow tables.
//!
//! Loading is two-phase. A metadata pass walks the whole file once and
//! records every section size and the declared data table columns
//! ([`FileMetadata`]). Each selected section is then decoded by its own
//! forward pass from the start of the file into buffers allocated at exactly
//! the sizes the metadata pass reported. Every declared count is checked
//! against the reconstructed one along the way.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ndskl::reader::{NdsklReader, Section, SectionSet};
//!
//! // Metadata only
//! let metadata = ndskl::reader::scan("skeleton.NDskl.a")?;
//! println!("{} critical points", metadata.critical_points_count);
//!
//! // Filaments only
//! let reader = NdsklReader::open("skeleton.NDskl.a")?;
//! let filaments = reader.read_filaments()?;
//! println!("{:?}", filaments.sampling_points().shape());
//!
//! // Everything except the sampling point attributes
//! let sections = SectionSet::all().with(Section::FilamentsData, false);
//! let skeleton = reader.load_sections(sections)?;
//! assert!(skeleton.filaments_data().is_none());
//! # Ok::<(), ndskl::reader::ReaderError>(())
//! ```

mod config;
mod critical_points;
pub(crate) mod cursor;
mod error;
mod filaments;
mod scan;
pub mod section;
mod skeleton;
mod tabular;


pub use config::ReaderConfig;
pub use critical_points::CriticalPoints;
pub use error::ReaderError;
pub use filaments::{Filaments, SamplingPoints};
pub use scan::MAX_NDIMS;
pub use section::{Section, SectionSet};
pub use skeleton::Skeleton;
pub use tabular::DataTable;

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::info;

use crate::metadata::FileMetadata;
use crate::schema::TableKind;
use config::ReaderSource;

/// Scan an NDskl file and return its metadata without decoding any payload
pub fn scan<P: AsRef<Path>>(path: P) -> Result<FileMetadata, ReaderError> {
    Ok(NdsklReader::open(path)?.metadata)
}

/// Load every section of an NDskl file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Skeleton, ReaderError> {
    NdsklReader::open(path)?.load()
}

/// Load the selected sections of an NDskl file
pub fn load_sections<P: AsRef<Path>>(
    path: P,
    sections: SectionSet,
) -> Result<Skeleton, ReaderError> {
    NdsklReader::open_with_config(path, ReaderConfig::with_sections(sections))?.load()
}

/// Reader for NDskl files
///
/// Opening runs the metadata pass; each `read_*` call performs one further
/// pass over a fresh stream, so sections can be decoded independently and in
/// any order.
#[derive(Debug)]
pub struct NdsklReader {
    source: ReaderSource,
    config: ReaderConfig,
    metadata: FileMetadata,
}

impl NdsklReader {
    /// Open an NDskl file and scan its metadata
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open an NDskl file with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        info!("Scanning {}", path.display());
        Self::from_source(ReaderSource::FilePath(path), config)
    }

    /// Read NDskl text held in memory
    pub fn from_bytes(data: impl Into<Bytes>, config: ReaderConfig) -> Result<Self, ReaderError> {
        Self::from_source(ReaderSource::Memory(data.into()), config)
    }

    fn from_source(source: ReaderSource, config: ReaderConfig) -> Result<Self, ReaderError> {
        let metadata = scan::scan_metadata(open_stream(&source)?, &config)?;
        Ok(Self {
            source,
            config,
            metadata,
        })
    }

    /// Metadata collected when the reader was opened
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// The reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode `[CRITICAL POINTS]`
    pub fn read_critical_points(&self) -> Result<CriticalPoints, ReaderError> {
        critical_points::decode_critical_points(self.stream()?, &self.metadata, &self.config)
    }

    /// Decode `[FILAMENTS]`
    pub fn read_filaments(&self) -> Result<Filaments, ReaderError> {
        filaments::decode_filaments(self.stream()?, &self.metadata, &self.config)
    }

    /// Decode `[CRITICAL POINTS DATA]`
    pub fn read_critical_points_data(&self) -> Result<DataTable, ReaderError> {
        tabular::decode_data_table(
            self.stream()?,
            TableKind::CriticalPointsData,
            &self.metadata.critical_points_data,
            &self.config,
        )
    }

    /// Decode `[FILAMENTS DATA]`
    pub fn read_filaments_data(&self) -> Result<DataTable, ReaderError> {
        tabular::decode_data_table(
            self.stream()?,
            TableKind::FilamentsData,
            &self.metadata.filaments_data,
            &self.config,
        )
    }

    /// Decode the sections selected in the reader configuration
    pub fn load(&self) -> Result<Skeleton, ReaderError> {
        self.load_sections(self.config.sections)
    }

    /// Decode `sections`; the others are left as `None`
    pub fn load_sections(&self, sections: SectionSet) -> Result<Skeleton, ReaderError> {
        let critical_points = sections
            .critical_points
            .then(|| self.read_critical_points())
            .transpose()?;
        let filaments = sections
            .filaments
            .then(|| self.read_filaments())
            .transpose()?;
        let critical_points_data = sections
            .critical_points_data
            .then(|| self.read_critical_points_data())
            .transpose()?;
        let filaments_data = sections
            .filaments_data
            .then(|| self.read_filaments_data())
            .transpose()?;

        Ok(Skeleton {
            metadata: self.metadata.clone(),
            critical_points,
            filaments,
            critical_points_data,
            filaments_data,
        })
    }

    fn stream(&self) -> Result<Box<dyn BufRead + '_>, ReaderError> {
        open_stream(&self.source)
    }
}

/// Fresh stream positioned at the start of the source
fn open_stream(source: &ReaderSource) -> Result<Box<dyn BufRead + '_>, ReaderError> {
    let stream: Box<dyn BufRead + '_> = match source {
        ReaderSource::FilePath(path) => Box::new(BufReader::new(File::open(path)?)),
        ReaderSource::Memory(bytes) => Box::new(Cursor::new(&bytes[..])),
    };
    Ok(stream)
}
