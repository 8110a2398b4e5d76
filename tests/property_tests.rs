//! Property-based tests over generated well-formed skeletons

mod common;

use proptest::prelude::*;

use ndskl::reader::{NdsklReader, ReaderConfig, ReaderError};

use common::{drop_last_lines, generate_ndskl, sample_coordinate, SkeletonShape};

fn shape_strategy() -> impl Strategy<Value = SkeletonShape> {
    (
        1usize..=4,
        prop::collection::vec(0usize..4, 0..8),
        prop::collection::vec(0usize..5, 0..8),
        any::<bool>(),
    )
        .prop_map(|(ndims, links_per_point, samples_per_filament, with_bbox)| SkeletonShape {
            ndims,
            links_per_point,
            samples_per_filament,
            with_bbox,
        })
}

fn open(text: String) -> Result<NdsklReader, ReaderError> {
    NdsklReader::from_bytes(text, ReaderConfig::default())
}

/// `first_index` starts at zero and advances by `counts`
fn is_prefix_sum(counts: &[i64], first_index: &[i64]) -> bool {
    let mut expected = 0;
    counts.iter().zip(first_index).all(|(count, first)| {
        let ok = *first == expected;
        expected += count;
        ok
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Metadata totals match the generated shape
    #[test]
    fn test_scan_counts(shape in shape_strategy()) {
        let reader = open(generate_ndskl(&shape)).unwrap();
        let metadata = reader.metadata();

        prop_assert_eq!(metadata.ndims, shape.ndims);
        prop_assert_eq!(metadata.bbox.is_some(), shape.with_bbox);
        prop_assert_eq!(metadata.critical_points_count, shape.links_per_point.len());
        prop_assert_eq!(metadata.critical_point_links_count, shape.total_links());
        prop_assert_eq!(metadata.filaments_count, shape.samples_per_filament.len());
        prop_assert_eq!(metadata.sampling_points_count, shape.total_samples());
        prop_assert_eq!(metadata.critical_points_data.row_count, shape.links_per_point.len());
        prop_assert_eq!(metadata.filaments_data.row_count, shape.total_samples());
    }

    /// Decoded row counts, flat-array lengths and firstIndex partitions
    #[test]
    fn test_load_partitions(shape in shape_strategy()) {
        let skeleton = open(generate_ndskl(&shape)).unwrap().load().unwrap();

        let cps = skeleton.critical_points().unwrap();
        prop_assert_eq!(cps.len(), shape.links_per_point.len());
        prop_assert_eq!(cps.table().num_columns(), shape.ndims + 6);
        prop_assert_eq!(cps.dest_id().len(), shape.total_links());
        prop_assert_eq!(cps.fil_id().len(), shape.total_links());
        prop_assert!(is_prefix_sum(cps.nfil().values(), cps.first_index().values()));
        for (i, nfil) in shape.links_per_point.iter().enumerate() {
            let (dest, fil) = cps.links(i).unwrap();
            prop_assert_eq!(dest.len(), *nfil);
            prop_assert_eq!(fil.len(), *nfil);
        }

        let filaments = skeleton.filaments().unwrap();
        let samples = filaments.sampling_points();
        prop_assert_eq!(filaments.len(), shape.samples_per_filament.len());
        prop_assert_eq!(samples.shape(), (shape.total_samples(), shape.ndims));
        prop_assert!(is_prefix_sum(filaments.nsamp().values(), filaments.first_index().values()));
        for index in 0..samples.len() {
            let row = samples.row(index).unwrap();
            for (dim, value) in row.iter().enumerate() {
                prop_assert_eq!(*value, sample_coordinate(index, dim, shape.ndims));
            }
        }

        prop_assert_eq!(
            skeleton.critical_points_data().unwrap().num_rows(),
            shape.links_per_point.len()
        );
        prop_assert_eq!(skeleton.filaments_data().unwrap().num_rows(), shape.total_samples());
    }

    /// Dropping trailing lines never yields a partial result
    #[test]
    fn test_truncation_is_an_error(shape in shape_strategy(), cut in 1usize..6) {
        let text = drop_last_lines(&generate_ndskl(&shape), cut);
        let result = open(text).and_then(|reader| reader.load());
        let err = result.unwrap_err();
        prop_assert!(err.is_format_error() || err.is_consistency_error());
    }

    /// Two metadata passes over the same bytes agree
    #[test]
    fn test_scan_idempotent(shape in shape_strategy()) {
        let text = generate_ndskl(&shape);
        let first = open(text.clone()).unwrap().metadata().clone();
        let second = open(text).unwrap().metadata().clone();
        prop_assert_eq!(first, second);
    }

    /// Arbitrary text never panics the loader
    #[test]
    fn test_garbage_never_panics(text in "\\PC{0,200}") {
        let _ = open(text).and_then(|reader| reader.load());
    }
}
