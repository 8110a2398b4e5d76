//! Section markers and section selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker opening the critical point records
pub const CRITICAL_POINTS_MARKER: &str = "[CRITICAL POINTS]";
/// Marker opening the filament records
pub const FILAMENTS_MARKER: &str = "[FILAMENTS]";
/// Marker opening the critical point attribute table
pub const CRITICAL_POINTS_DATA_MARKER: &str = "[CRITICAL POINTS DATA]";
/// Marker opening the filament sampling point attribute table
pub const FILAMENTS_DATA_MARKER: &str = "[FILAMENTS DATA]";
/// First token of the optional bounding box line
pub const BBOX_TOKEN: &str = "BBOX";

/// One of the four payload sections of an NDskl file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// `[CRITICAL POINTS]`: critical points with their filament references
    CriticalPoints,
    /// `[FILAMENTS]`: filaments with their sampling points
    Filaments,
    /// `[CRITICAL POINTS DATA]`: per critical point attribute table
    CriticalPointsData,
    /// `[FILAMENTS DATA]`: per sampling point attribute table
    FilamentsData,
}

impl Section {
    /// All sections in file order
    pub const ALL: [Section; 4] = [
        Section::CriticalPoints,
        Section::Filaments,
        Section::CriticalPointsData,
        Section::FilamentsData,
    ];

    /// The literal marker line that opens this section
    pub fn marker(self) -> &'static str {
        match self {
            Section::CriticalPoints => CRITICAL_POINTS_MARKER,
            Section::Filaments => FILAMENTS_MARKER,
            Section::CriticalPointsData => CRITICAL_POINTS_DATA_MARKER,
            Section::FilamentsData => FILAMENTS_DATA_MARKER,
        }
    }

    /// Snake-case name, also used as the export file stem
    pub fn name(self) -> &'static str {
        match self {
            Section::CriticalPoints => "critical_points",
            Section::Filaments => "filaments",
            Section::CriticalPointsData => "critical_points_data",
            Section::FilamentsData => "filaments_data",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts either the literal marker (`[FILAMENTS DATA]`) or the
    /// snake-case name (`filaments_data`, `filaments-data`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Section::ALL
            .into_iter()
            .find(|section| {
                section.marker() == s || section.name() == s.replace('-', "_").to_lowercase()
            })
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

/// Set of sections to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    /// Decode `[CRITICAL POINTS]`
    pub critical_points: bool,
    /// Decode `[FILAMENTS]`
    pub filaments: bool,
    /// Decode `[CRITICAL POINTS DATA]`
    pub critical_points_data: bool,
    /// Decode `[FILAMENTS DATA]`
    pub filaments_data: bool,
}

impl Default for SectionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl SectionSet {
    /// Every section
    pub fn all() -> Self {
        Self {
            critical_points: true,
            filaments: true,
            critical_points_data: true,
            filaments_data: true,
        }
    }

    /// No section (metadata only)
    pub fn none() -> Self {
        Self {
            critical_points: false,
            filaments: false,
            critical_points_data: false,
            filaments_data: false,
        }
    }

    /// Builder-style toggle of a single section
    pub fn with(mut self, section: Section, enabled: bool) -> Self {
        match section {
            Section::CriticalPoints => self.critical_points = enabled,
            Section::Filaments => self.filaments = enabled,
            Section::CriticalPointsData => self.critical_points_data = enabled,
            Section::FilamentsData => self.filaments_data = enabled,
        }
        self
    }

    /// Whether `section` is selected
    pub fn contains(&self, section: Section) -> bool {
        match section {
            Section::CriticalPoints => self.critical_points,
            Section::Filaments => self.filaments,
            Section::CriticalPointsData => self.critical_points_data,
            Section::FilamentsData => self.filaments_data,
        }
    }

    /// Selected sections in file order
    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<Section> for SectionSet {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SectionSet::none(), |set, section| set.with(section, true))
    }
}
