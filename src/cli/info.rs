use anyhow::{Context, Result};
use std::path::PathBuf;

use ndskl::reader::NdsklReader;

use super::config::Config;

/// Display the metadata of an NDskl file
pub fn run(file: PathBuf, json: bool, config: Option<PathBuf>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader_config = Config::load(config.as_deref())?.reader_config(&[])?;
    let reader = NdsklReader::open_with_config(&file, reader_config)
        .with_context(|| format!("Failed to scan {}", file.display()))?;
    let metadata = reader.metadata();

    if json {
        println!("{}", metadata.to_json()?);
        return Ok(());
    }

    println!("NDskl File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("Geometry:");
    println!("  Dimensions: {}", metadata.ndims);
    match &metadata.bbox {
        Some(bbox) => {
            println!("  BBOX min:   {:?}", bbox.min);
            println!("  BBOX max:   {:?}", bbox.max);
        }
        None => println!("  BBOX:       <none>"),
    }
    println!();

    println!("Sections:");
    println!("  Critical points:      {}", metadata.critical_points_count);
    println!("  Filament references:  {}", metadata.critical_point_links_count);
    println!("  Filaments:            {}", metadata.filaments_count);
    println!("  Sampling points:      {}", metadata.sampling_points_count);
    println!();

    for (title, layout) in [
        ("Critical point data", &metadata.critical_points_data),
        ("Filament data", &metadata.filaments_data),
    ] {
        println!("{} ({} rows):", title, layout.row_count);
        for (i, name) in layout.column_names.iter().enumerate() {
            println!("  {:3}. {}", i + 1, name);
        }
        println!();
    }

    Ok(())
}
