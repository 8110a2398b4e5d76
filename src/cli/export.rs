use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use ndskl::export::{export_skeleton, ExportConfig};
use ndskl::reader::{NdsklReader, Section};

use super::config::Config;
use super::ProfileArg;

/// Export an NDskl file to Parquet
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    sections: Vec<Section>,
    profile: ProfileArg,
    config: Option<PathBuf>,
    compression_level: Option<i32>,
    row_group_size: Option<usize>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let output = output.unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        let stem = name
            .trim_end_matches(".a")
            .trim_end_matches(".NDskl")
            .trim_end_matches(".ndskl");
        input.with_file_name(format!("{}_parquet", stem))
    });

    let file_config = Config::load(config.as_deref())?;
    let reader_config = file_config.reader_config(&sections)?;
    let export_config =
        file_config.export_config(ExportConfig::from(profile), compression_level, row_group_size);

    info!("NDskl Export");
    info!("============");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Compression: {:?}", export_config.compression);
    info!("Row group size: {}", export_config.row_group_size);

    let start = Instant::now();
    let skeleton = NdsklReader::open_with_config(&input, reader_config)
        .and_then(|reader| reader.load())
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let stats = export_skeleton(&skeleton, &output, &export_config)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    println!("{}", stats);
    info!("Finished in {:.2?}", start.elapsed());
    Ok(())
}
