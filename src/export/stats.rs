use std::fmt;

/// One exported Parquet file
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Table name, also the file stem
    pub name: &'static str,
    /// Rows written
    pub rows: usize,
    /// Number of Parquet row groups written
    pub row_groups: usize,
    /// File size in bytes
    pub file_size_bytes: u64,
}

/// Statistics from a completed export
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Per-table statistics, in write order
    pub tables: Vec<TableStats>,
}

impl ExportStats {
    /// Statistics of the table called `name`
    pub fn table(&self, name: &str) -> Option<&TableStats> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Bytes written over all Parquet files
    pub fn total_bytes(&self) -> u64 {
        self.tables.iter().map(|t| t.file_size_bytes).sum()
    }
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} tables ({} bytes)", self.tables.len(), self.total_bytes())?;
        for table in &self.tables {
            write!(
                f,
                "\n  {}: {} rows in {} row groups",
                table.name, table.rows, table.row_groups
            )?;
        }
        Ok(())
    }
}
