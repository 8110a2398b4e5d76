use bytes::Bytes;

use super::section::SectionSet;

/// Configuration for reading NDskl files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Lines starting with this character are skipped in the header and while
    /// searching for section markers
    pub comment_char: char,

    /// Sections decoded by [`NdsklReader::load`](super::NdsklReader::load)
    pub sections: SectionSet,

    /// Whether each data section repeats its row count after the column names.
    /// Files written without that line need this set to `false`.
    pub table_row_counts: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            comment_char: '#',
            sections: SectionSet::all(),
            table_row_counts: true,
        }
    }
}

impl ReaderConfig {
    /// Default configuration restricted to `sections`
    pub fn with_sections(sections: SectionSet) -> Self {
        Self {
            sections,
            ..Default::default()
        }
    }
}

/// Source of the NDskl text (stores path or bytes for re-reading)
#[derive(Debug, Clone)]
pub(super) enum ReaderSource {
    /// Reopened from disk for every pass
    FilePath(std::path::PathBuf),
    /// In-memory text, each pass gets a fresh cursor over the shared bytes
    Memory(Bytes),
}
