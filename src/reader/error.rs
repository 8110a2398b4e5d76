/// Errors that can occur while loading an NDskl file
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error while assembling decoded columns
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Malformed input: missing section marker, truncated record, or bad token
    #[error("Format error at line {line}: {message}")]
    FormatError {
        /// 1-based line number where the problem was detected (0 before the first line)
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// A declared count disagrees with the independently reconstructed one
    #[error("Inconsistent {context}: expected {expected}, found {found}")]
    ConsistencyError {
        /// Which count diverged
        context: String,
        /// Count derived from the metadata scan
        expected: usize,
        /// Count declared or reconstructed during decoding
        found: usize,
    },
}

impl ReaderError {
    /// True for [`ReaderError::FormatError`]
    pub fn is_format_error(&self) -> bool {
        matches!(self, ReaderError::FormatError { .. })
    }

    /// True for [`ReaderError::ConsistencyError`]
    pub fn is_consistency_error(&self) -> bool {
        matches!(self, ReaderError::ConsistencyError { .. })
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        ReaderError::FormatError {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn consistency(context: impl Into<String>, expected: usize, found: usize) -> Self {
        ReaderError::ConsistencyError {
            context: context.into(),
            expected,
            found,
        }
    }
}
