#![no_main]

use libfuzzer_sys::fuzz_target;
use ndskl::reader::{NdsklReader, ReaderConfig};

fuzz_target!(|data: &[u8]| {
    // Malformed input must surface as an error, never a panic
    let reader = match NdsklReader::from_bytes(data.to_vec(), ReaderConfig::default()) {
        Ok(reader) => reader,
        Err(_) => return,
    };

    let _ = reader.read_critical_points();
    let _ = reader.read_filaments();
    let _ = reader.read_critical_points_data();
    let _ = reader.read_filaments_data();

    // Files without the row-count line take a different path through the data sections
    let config = ReaderConfig {
        table_row_counts: false,
        ..ReaderConfig::default()
    };
    if let Ok(reader) = NdsklReader::from_bytes(data.to_vec(), config) {
        let _ = reader.load();
    }
});
