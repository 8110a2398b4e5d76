/// Errors that can occur while exporting a skeleton
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library while assembling a table
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Metadata could not be serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The input file could not be loaded
    #[error("Reader error: {0}")]
    ReaderError(#[from] crate::reader::ReaderError),
}
