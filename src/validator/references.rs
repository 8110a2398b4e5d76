use arrow::array::{Array, Int64Array};

use crate::reader::Skeleton;
use crate::schema::columns;

use super::{ValidationCheck, ValidationReport};

/// Cross-section id ranges and BBOX containment.
///
/// These are warnings: the loader does not resolve references, so an
/// out-of-range id does not stop a file from loading.
pub(crate) fn check_references(skeleton: &Skeleton, report: &mut ValidationReport) {
    let metadata = skeleton.metadata();
    let cp_count = metadata.critical_points_count;
    let filament_count = metadata.filaments_count;

    if let Some(cps) = skeleton.critical_points() {
        report.add_check(check_range("destID references", cps.dest_id(), cp_count));
        report.add_check(check_range("filID references", cps.fil_id(), filament_count));
    }

    if let Some(filaments) = skeleton.filaments() {
        for name in [columns::CP1, columns::CP2] {
            let column = filaments
                .table()
                .column_by_name(name)
                .and_then(|c| c.as_any().downcast_ref::<Int64Array>());
            match column {
                Some(values) => report.add_check(check_range(
                    format!("{} references", name),
                    values,
                    cp_count,
                )),
                None => report.add_check(ValidationCheck::failed(
                    format!("{} references", name),
                    "column missing",
                )),
            }
        }

        if let Some(bbox) = &metadata.bbox {
            let samples = filaments.sampling_points();
            let outside = samples
                .values()
                .chunks_exact(samples.ndims())
                .filter(|point| !bbox.contains(point))
                .count();
            report.add_check(if outside == 0 {
                ValidationCheck::ok("Sampling points inside BBOX")
            } else {
                ValidationCheck::warning(
                    "Sampling points inside BBOX",
                    format!("{} of {} points lie outside", outside, samples.len()),
                )
            });
        }
    }
}

/// Every id must lie in `[0, bound)`
fn check_range(name: impl Into<String>, ids: &Int64Array, bound: usize) -> ValidationCheck {
    let bound = bound as i64;
    let bad = ids.values().iter().filter(|id| **id < 0 || **id >= bound).count();
    if bad == 0 {
        ValidationCheck::ok(name)
    } else {
        ValidationCheck::warning(
            name,
            format!("{} of {} ids outside [0, {})", bad, ids.len(), bound),
        )
    }
}
