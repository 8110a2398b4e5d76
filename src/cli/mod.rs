use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ndskl::export::ExportConfig;
use ndskl::reader::Section;

mod config;
mod export;
mod info;
mod validate;

/// ndskl - DisPerSE NDskl_ascii skeleton loader
#[derive(Parser)]
#[command(name = "ndskl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Export profile for trading write speed against file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Snappy, small row groups
    Fast,
    /// ZSTD level 9
    #[default]
    Balanced,
    /// ZSTD level 22, large row groups
    MaxCompression,
}

impl From<ProfileArg> for ExportConfig {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => ExportConfig::fast(),
            ProfileArg::Balanced => ExportConfig::balanced(),
            ProfileArg::MaxCompression => ExportConfig::max_compression(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the metadata of an NDskl file without decoding its payload
    Info {
        /// Input NDskl file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,

        /// Load reader settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Export an NDskl file to a directory of Parquet tables
    Export {
        /// Input NDskl file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (defaults to `<input stem>_parquet` next to the input)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Sections to decode, comma separated (default: all)
        #[arg(short = 's', long, value_delimiter = ',')]
        sections: Vec<Section>,

        /// Export profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Compression level for ZSTD (1-22)
        #[arg(short = 'c', long)]
        compression_level: Option<i32>,

        /// Row group size (rows per Parquet row group)
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,
    },

    /// Check the internal consistency of an NDskl file
    Validate {
        /// Input NDskl file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load reader settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, json, config } => info::run(file, json, config),
        Commands::Export {
            input,
            output,
            sections,
            profile,
            config,
            compression_level,
            row_group_size,
        } => export::run(
            input,
            output,
            sections,
            profile,
            config,
            compression_level,
            row_group_size,
        ),
        Commands::Validate { file, config } => validate::run(file, config),
    }
}
