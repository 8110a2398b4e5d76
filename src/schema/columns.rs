//! Column names as constants for type safety

// [CRITICAL POINTS]
/// Critical point type code (index of the critical point, 0 = minimum)
pub const TYPE: &str = "type";
/// Prefix of the position columns (`Pos0`, `Pos1`, ...)
pub const POSITION_PREFIX: &str = "Pos";
/// Field value at the critical point
pub const VALUE: &str = "value";
/// Id of the persistence pair partner, kept raw
pub const PAIR_ID: &str = "pairID";
/// Non-zero when the critical point lies on the boundary
pub const BOUNDARY: &str = "boundary";
/// Number of filaments incident to the critical point
pub const NFIL: &str = "nfil";
/// Offset of the first row owned by a record in its flat array
pub const FIRST_INDEX: &str = "firstIndex";

// Filament references
/// Destination critical point id of a filament reference
pub const DEST_ID: &str = "destID";
/// Filament id of a filament reference
pub const FIL_ID: &str = "filID";

// [FILAMENTS]
/// Critical point at the start of the filament
pub const CP1: &str = "CP1";
/// Critical point at the end of the filament
pub const CP2: &str = "CP2";
/// Number of sampling points along the filament
pub const NSAMP: &str = "nSamp";

/// Position column names for `ndims` dimensions
pub fn position_columns(ndims: usize) -> Vec<String> {
    (0..ndims).map(position_column).collect()
}

/// Name of the position column for dimension `dim`
pub fn position_column(dim: usize) -> String {
    format!("{}{}", POSITION_PREFIX, dim)
}
