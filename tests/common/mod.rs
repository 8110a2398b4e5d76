//! Generator for well-formed NDskl text used by the integration tests

#![allow(dead_code)]

use std::fmt::Write;

/// Column names of a typical DisPerSE `[CRITICAL POINTS DATA]` section
pub const CP_DATA_COLUMNS: &[&str] = &[
    "persistence_ratio",
    "persistence_nsigmas",
    "persistence",
    "persistence_pair",
    "parent_index",
    "parent_log_index",
    "log_field_value",
    "field_value",
    "cell",
];

/// Column names of a typical DisPerSE `[FILAMENTS DATA]` section
pub const FILAMENT_DATA_COLUMNS: &[&str] = &[
    "field_value",
    "orientation",
    "cell",
    "log_field_value",
    "type",
    "robustness",
    "robustness_ratio",
];

/// Side length of the generated BBOX
pub const BOX_SIZE: f32 = 100.0;

/// Shape of a generated skeleton
#[derive(Debug, Clone)]
pub struct SkeletonShape {
    pub ndims: usize,
    /// `nfil` of each critical point
    pub links_per_point: Vec<usize>,
    /// `nSamp` of each filament
    pub samples_per_filament: Vec<usize>,
    pub with_bbox: bool,
}

impl SkeletonShape {
    pub fn total_links(&self) -> usize {
        self.links_per_point.iter().sum()
    }

    pub fn total_samples(&self) -> usize {
        self.samples_per_filament.iter().sum()
    }
}

/// Coordinate `dim` of sampling point `index`
pub fn sample_coordinate(index: usize, dim: usize, ndims: usize) -> f32 {
    ((index * ndims + dim) % 100) as f32 + 0.25
}

fn is_integer_cp_column(name: &str) -> bool {
    name.contains("index") || name.contains("pair")
}

/// Render `shape` as NDskl text, with the repeated row-count line in the data sections
pub fn generate_ndskl(shape: &SkeletonShape) -> String {
    let ndims = shape.ndims;
    let cp_count = shape.links_per_point.len();
    let filament_count = shape.samples_per_filament.len().max(1);
    let mut out = String::new();

    writeln!(out, "ANDSKEL").unwrap();
    writeln!(out, "{}", ndims).unwrap();
    writeln!(out, "# generated skeleton").unwrap();
    if shape.with_bbox {
        let min = vec!["0"; ndims].join(",");
        let max = vec![BOX_SIZE.to_string(); ndims].join(",");
        writeln!(out, "BBOX [{}] [{}]", min, max).unwrap();
    }

    writeln!(out, "[CRITICAL POINTS]").unwrap();
    writeln!(out, "{}", cp_count).unwrap();
    for (i, nfil) in shape.links_per_point.iter().enumerate() {
        let position: Vec<String> = (0..ndims).map(|d| format!("{}.5", i + d)).collect();
        writeln!(
            out,
            "{} {} {} {} {}",
            i % 4,
            position.join(" "),
            i as f64 * 0.5 - 1.0,
            (i + 1) % cp_count,
            i % 2
        )
        .unwrap();
        writeln!(out, " {}", nfil).unwrap();
        for link in 0..*nfil {
            writeln!(out, " {} {}", (i + link + 1) % cp_count, link % filament_count).unwrap();
        }
    }

    writeln!(out, "[FILAMENTS]").unwrap();
    writeln!(out, "{}", shape.samples_per_filament.len()).unwrap();
    let mut sample = 0usize;
    for (f, nsamp) in shape.samples_per_filament.iter().enumerate() {
        writeln!(out, "{} {} {}", f % cp_count.max(1), (f + 1) % cp_count.max(1), nsamp).unwrap();
        for _ in 0..*nsamp {
            let coords: Vec<String> = (0..ndims)
                .map(|d| sample_coordinate(sample, d, ndims).to_string())
                .collect();
            writeln!(out, " {}", coords.join(" ")).unwrap();
            sample += 1;
        }
    }

    writeln!(out, "[CRITICAL POINTS DATA]").unwrap();
    writeln!(out, "{}", CP_DATA_COLUMNS.len()).unwrap();
    for name in CP_DATA_COLUMNS {
        writeln!(out, "{}", name).unwrap();
    }
    writeln!(out, "{}", cp_count).unwrap();
    for i in 0..cp_count {
        let row: Vec<String> = CP_DATA_COLUMNS
            .iter()
            .map(|name| {
                if is_integer_cp_column(name) {
                    i.to_string()
                } else {
                    format!("{}.75", i)
                }
            })
            .collect();
        writeln!(out, "{}", row.join(" ")).unwrap();
    }

    writeln!(out, "[FILAMENTS DATA]").unwrap();
    writeln!(out, "{}", FILAMENT_DATA_COLUMNS.len()).unwrap();
    for name in FILAMENT_DATA_COLUMNS {
        writeln!(out, "{}", name).unwrap();
    }
    writeln!(out, "{}", shape.total_samples()).unwrap();
    for s in 0..shape.total_samples() {
        let row: Vec<String> = FILAMENT_DATA_COLUMNS
            .iter()
            .map(|name| {
                if *name == "type" {
                    (s % 3).to_string()
                } else {
                    format!("{:e}", s as f64 + 0.5)
                }
            })
            .collect();
        writeln!(out, "{}", row.join(" ")).unwrap();
    }

    out
}

/// Drop the last `count` lines of `text`
pub fn drop_last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let keep = lines.len().saturating_sub(count);
    let mut out = lines[..keep].join("\n");
    out.push('\n');
    out
}

/// The two-dimensional, three-point skeleton used across tests
pub fn planar_shape() -> SkeletonShape {
    SkeletonShape {
        ndims: 2,
        links_per_point: vec![2, 1, 1],
        samples_per_filament: vec![3, 2],
        with_bbox: true,
    }
}
