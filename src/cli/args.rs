use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::KeySeparator;

#[derive(Parser)]
#[command(name = "koppen-grid")]
#[command(about = "Converter and lookup tool for the Köppen-Geiger climate classification grid")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file (TOML, JSON or YAML). Top-level input_path/output_path serve encode; \
                a [normalize] section serves normalize, whose input defaults to the encoded grid. \
                KOPPEN_* environment variables also apply (KOPPEN_NORMALIZE__OUTPUT_PATH for nested keys)"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode the ASCII grid table into a comma-keyed JSON mapping
    Encode {
        #[arg(short, long, help = "Input text table (lat lon code per line)")]
        input: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output JSON file [default: input path with .json extension]"
        )]
        output: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Read the table through a memory map")]
        mmap: bool,
    },

    /// Rewrite the separator inside every key of a grid mapping
    Normalize {
        #[arg(short, long, help = "Input JSON grid mapping")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output JSON file [default: rewrite input in place]")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = SeparatorArg::Comma)]
        from: SeparatorArg,

        #[arg(long, value_enum, default_value_t = SeparatorArg::Space)]
        to: SeparatorArg,
    },

    /// Look up the climate code for a coordinate
    Lookup {
        #[arg(short, long, help = "JSON grid mapping")]
        file: Option<PathBuf>,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, help = "Decimals in grid keys [default: 2]")]
        precision: Option<usize>,

        #[arg(long, help = "Nearest-cell search radius in degrees [default: 1.0]")]
        radius: Option<f64>,
    },

    /// Display information about a grid mapping
    Info {
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeparatorArg {
    Comma,
    Space,
}

impl From<SeparatorArg> for KeySeparator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Comma => KeySeparator::Comma,
            SeparatorArg::Space => KeySeparator::Space,
        }
    }
}
