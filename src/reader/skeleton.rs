use super::critical_points::CriticalPoints;
use super::filaments::Filaments;
use super::section::Section;
use super::tabular::DataTable;
use crate::metadata::FileMetadata;

/// Everything decoded from one NDskl file.
///
/// Sections that were not selected are `None`; their decode pass never ran.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(super) metadata: FileMetadata,
    pub(super) critical_points: Option<CriticalPoints>,
    pub(super) filaments: Option<Filaments>,
    pub(super) critical_points_data: Option<DataTable>,
    pub(super) filaments_data: Option<DataTable>,
}

impl Skeleton {
    /// Sizes and schema information from the metadata pass
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// `[CRITICAL POINTS]`, if selected
    pub fn critical_points(&self) -> Option<&CriticalPoints> {
        self.critical_points.as_ref()
    }

    /// `[FILAMENTS]`, if selected
    pub fn filaments(&self) -> Option<&Filaments> {
        self.filaments.as_ref()
    }

    /// `[CRITICAL POINTS DATA]`, if selected
    pub fn critical_points_data(&self) -> Option<&DataTable> {
        self.critical_points_data.as_ref()
    }

    /// `[FILAMENTS DATA]`, if selected
    pub fn filaments_data(&self) -> Option<&DataTable> {
        self.filaments_data.as_ref()
    }

    /// Whether `section` was decoded
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::CriticalPoints => self.critical_points.is_some(),
            Section::Filaments => self.filaments.is_some(),
            Section::CriticalPointsData => self.critical_points_data.is_some(),
            Section::FilamentsData => self.filaments_data.is_some(),
        }
    }
}
