use anyhow::Result;
use log::info;
use std::path::PathBuf;

use ndskl::validator::validate_ndskl_file_with_config;

use super::config::Config;

/// Validate NDskl file integrity
pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    info!("NDskl Validator");
    info!("File: {}", file.display());

    let reader_config = Config::load(config.as_deref())?.reader_config(&[])?;

    match validate_ndskl_file_with_config(&file, reader_config) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
