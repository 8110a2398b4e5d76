use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

/// Compression options for exported Parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression at the given level
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression
    Uncompressed,
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }

    fn to_parquet(self) -> Compression {
        match self {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

/// Configuration for Parquet export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of rows per group)
    pub row_group_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,

    /// Use BYTE_STREAM_SPLIT for floating-point columns
    pub use_byte_stream_split: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zstd(9),
            row_group_size: 100_000,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }
}

impl ExportConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            row_group_size: 500_000,
            ..Self::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast() -> Self {
        Self {
            compression: CompressionType::fast(),
            row_group_size: 50_000,
            use_byte_stream_split: false,
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Writer properties for one table.
    ///
    /// `float_columns` get dictionary encoding disabled and, when enabled,
    /// BYTE_STREAM_SPLIT.
    pub(super) fn to_writer_properties(
        &self,
        metadata: &[(String, String)],
        float_columns: &[String],
    ) -> WriterProperties {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(self.compression.to_parquet())
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        for col in float_columns {
            let path = ColumnPath::new(vec![col.clone()]);
            builder = builder.set_column_dictionary_enabled(path.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(path, Encoding::BYTE_STREAM_SPLIT);
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}
