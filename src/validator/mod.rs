//! # NDskl Validation Module
//!
//! Integrity report for NDskl skeleton files, run on top of the
//! [`reader`](crate::reader).
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: the file exists and the metadata pass succeeds
//! 2. **Decoding**: every section decodes without a format or consistency error
//! 3. **Counts**: row counts, flat-array totals and `firstIndex` partitions
//!    agree with the metadata
//! 4. **References**: `destID`, `filID`, `CP1`, `CP2` lie in range and
//!    sampling points lie inside the BBOX (warnings only)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ndskl::validator::validate_ndskl_file;
//! use std::path::Path;
//!
//! match validate_ndskl_file(Path::new("skeleton.NDskl.a")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::reader::{NdsklReader, ReaderConfig, Skeleton};

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod counts;
mod references;
mod report;


/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The input path is missing or not a regular file
    #[error("Structure error: {0}")]
    StructureError(String),
}

/// Validate the NDskl file at `path` with the default reader configuration
pub fn validate_ndskl_file(path: &Path) -> Result<ValidationReport> {
    validate_ndskl_file_with_config(path, ReaderConfig::default())
}

/// Validate the NDskl file at `path`
///
/// Returns `Err` only when the path cannot be validated at all; parse errors
/// are recorded as failed checks.
pub fn validate_ndskl_file_with_config(
    path: &Path,
    config: ReaderConfig,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    if !path.is_file() {
        report.add_check(ValidationCheck::failed(
            "File exists",
            format!("Not a readable file: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError(format!(
            "{} is not a file",
            path.display()
        )));
    }
    report.add_check(ValidationCheck::ok("File exists"));

    let reader = match NdsklReader::open_with_config(path, config) {
        Ok(reader) => reader,
        Err(e) => {
            report.add_check(ValidationCheck::failed("Metadata scan", e.to_string()));
            return Ok(report);
        }
    };
    let metadata = reader.metadata();
    report.add_check(ValidationCheck::ok(format!(
        "Metadata scan: {}D, {} critical points, {} filaments",
        metadata.ndims, metadata.critical_points_count, metadata.filaments_count
    )));

    match reader.load() {
        Ok(skeleton) => {
            report.add_check(ValidationCheck::ok("Section decoding"));
            check_skeleton(&skeleton, &mut report);
        }
        Err(e) => report.add_check(ValidationCheck::failed("Section decoding", e.to_string())),
    }

    Ok(report)
}

/// Run the count and reference checks over an already decoded skeleton
pub fn validate_skeleton(skeleton: &Skeleton, name: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(name);
    check_skeleton(skeleton, &mut report);
    report
}

fn check_skeleton(skeleton: &Skeleton, report: &mut ValidationReport) {
    counts::check_counts(skeleton, report);
    references::check_references(skeleton, report);
    debug!(
        "{} checks: {} passed, {} warnings, {} failed",
        report.checks.len(),
        report.success_count(),
        report.warning_count(),
        report.failure_count()
    );
}
