//! Name-based column typing for the self-describing data tables.
//!
//! Column types are a pure function of the table and the column name, looked
//! up in [`TYPE_RULES`]. The first matching rule wins; columns matched by no
//! rule are Float64.

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

/// Which self-describing table a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// `[CRITICAL POINTS DATA]`, one row per critical point
    CriticalPointsData,
    /// `[FILAMENTS DATA]`, one row per sampling point
    FilamentsData,
}

/// Storage type of a data table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 16-bit signed integer
    Int16,
    /// 64-bit signed integer
    Int64,
    /// 64-bit float
    Float64,
}

impl ColumnType {
    /// Arrow type used to store the column
    pub fn data_type(self) -> DataType {
        match self {
            ColumnType::Int16 => DataType::Int16,
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Float64 => DataType::Float64,
        }
    }

    /// Integer columns parse their tokens as integers
    pub fn is_integer(self) -> bool {
        !matches!(self, ColumnType::Float64)
    }
}

/// How a rule matches a column name
#[derive(Debug, Clone, Copy)]
pub enum NameMatch {
    /// Name contains the substring
    Contains(&'static str),
    /// Name is exactly the string
    Exact(&'static str),
}

impl NameMatch {
    fn matches(self, name: &str) -> bool {
        match self {
            NameMatch::Contains(needle) => name.contains(needle),
            NameMatch::Exact(expected) => name == expected,
        }
    }
}

/// One entry of the typing rule table
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    /// Table the rule applies to
    pub table: TableKind,
    /// Column name pattern
    pub pattern: NameMatch,
    /// Resulting type
    pub column_type: ColumnType,
}

/// Typing rules, checked in order
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        table: TableKind::CriticalPointsData,
        pattern: NameMatch::Contains("index"),
        column_type: ColumnType::Int64,
    },
    TypeRule {
        table: TableKind::CriticalPointsData,
        pattern: NameMatch::Contains("pair"),
        column_type: ColumnType::Int64,
    },
    TypeRule {
        table: TableKind::FilamentsData,
        pattern: NameMatch::Exact("type"),
        column_type: ColumnType::Int16,
    },
];

/// Type of column `name` in `table`
pub fn infer_column_type(table: TableKind, name: &str) -> ColumnType {
    TYPE_RULES
        .iter()
        .find(|rule| rule.table == table && rule.pattern.matches(name))
        .map(|rule| rule.column_type)
        .unwrap_or(ColumnType::Float64)
}
