use arrow::array::Int64Array;

use crate::metadata::TableLayout;
use crate::reader::{DataTable, Skeleton};

use super::{ValidationCheck, ValidationReport};

/// Row counts and flat-array totals against the metadata pass
pub(crate) fn check_counts(skeleton: &Skeleton, report: &mut ValidationReport) {
    let metadata = skeleton.metadata();

    if let Some(cps) = skeleton.critical_points() {
        report.add_check(ValidationCheck::require(
            "Critical point count",
            cps.len() == metadata.critical_points_count,
            || {
                format!(
                    "{} rows decoded, {} declared",
                    cps.len(),
                    metadata.critical_points_count
                )
            },
        ));
        let nfil_sum = sum(cps.nfil());
        report.add_check(ValidationCheck::require(
            "Filament reference total",
            nfil_sum == Some(metadata.critical_point_links_count as i64)
                && cps.dest_id().len() == metadata.critical_point_links_count,
            || {
                format!(
                    "nfil sums to {:?}, {} references decoded, {} expected",
                    nfil_sum,
                    cps.dest_id().len(),
                    metadata.critical_point_links_count
                )
            },
        ));
        report.add_check(check_partition(
            "Critical point firstIndex",
            cps.nfil(),
            cps.first_index(),
            metadata.critical_point_links_count,
        ));
    }

    if let Some(filaments) = skeleton.filaments() {
        report.add_check(ValidationCheck::require(
            "Filament count",
            filaments.len() == metadata.filaments_count,
            || {
                format!(
                    "{} rows decoded, {} declared",
                    filaments.len(),
                    metadata.filaments_count
                )
            },
        ));
        let nsamp_sum = sum(filaments.nsamp());
        let samples = filaments.sampling_points();
        report.add_check(ValidationCheck::require(
            "Sampling point total",
            nsamp_sum == Some(metadata.sampling_points_count as i64)
                && samples.len() == metadata.sampling_points_count,
            || {
                format!(
                    "nSamp sums to {:?}, {} points decoded, {} expected",
                    nsamp_sum,
                    samples.len(),
                    metadata.sampling_points_count
                )
            },
        ));
        report.add_check(check_partition(
            "Filament firstIndex",
            filaments.nsamp(),
            filaments.first_index(),
            metadata.sampling_points_count,
        ));
    }

    if let Some(table) = skeleton.critical_points_data() {
        report.add_check(check_table(
            "Critical point data table",
            table,
            &metadata.critical_points_data,
            metadata.critical_points_count,
        ));
    }

    if let Some(table) = skeleton.filaments_data() {
        report.add_check(check_table(
            "Filament data table",
            table,
            &metadata.filaments_data,
            metadata.sampling_points_count,
        ));
    }
}

fn sum(values: &Int64Array) -> Option<i64> {
    values
        .values()
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
}

/// `first_index` must start at zero and advance by `counts`, ending at `total`
pub(crate) fn check_partition(
    name: &str,
    counts: &Int64Array,
    first_index: &Int64Array,
    total: usize,
) -> ValidationCheck {
    let mut expected = 0i64;
    for (i, (count, first)) in counts.values().iter().zip(first_index.values()).enumerate() {
        if *first != expected {
            return ValidationCheck::failed(
                name,
                format!("row {} starts at {}, expected {}", i, first, expected),
            );
        }
        if *count < 0 {
            return ValidationCheck::failed(name, format!("row {} has negative count {}", i, count));
        }
        expected = match expected.checked_add(*count) {
            Some(next) => next,
            None => return ValidationCheck::failed(name, "running offset overflows"),
        };
    }
    ValidationCheck::require(name, expected == total as i64, || {
        format!("ranges cover {} entries, expected {}", expected, total)
    })
}

fn check_table(name: &str, table: &DataTable, layout: &TableLayout, governing: usize) -> ValidationCheck {
    if table.num_rows() != governing {
        return ValidationCheck::failed(
            name,
            format!("{} rows, expected {}", table.num_rows(), governing),
        );
    }
    let names = table.column_names();
    ValidationCheck::require(name, names == layout.column_names, || {
        format!("columns {:?}, declared {:?}", names, layout.column_names)
    })
}
