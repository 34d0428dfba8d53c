use crate::analyzers::GridAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::GridConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{KeySeparator, LookupQuery};
use crate::processors::{ClimateLookup, GridEncoder, KeyNormalizer};
use crate::readers::MappingReader;
use crate::utils::filename::default_encoded_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::GridJsonWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over `--verbose`.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}

/// Execute the parsed command. Logging is installed by the caller.
pub fn run(cli: Cli) -> Result<()> {
    let config = GridConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            mmap,
        } => {
            let paths = config.encode_paths().with_overrides(input, output);
            let input = paths.input_path()?;
            let output = paths
                .output_path
                .clone()
                .unwrap_or_else(|| default_encoded_filename(input));

            println!("Encoding grid table...");
            println!("Input file: {}", input.display());
            println!("Output file: {}", output.display());

            let progress = ProgressReporter::new_spinner("Encoding grid table...", false);

            let encoder = GridEncoder::new().with_mmap(mmap);
            let report = encoder.encode_to_file(input, &output)?;

            progress.finish_with_message(&format!("Encoded {} cells", report.total_cells));

            println!("\n{}", report.summary());

            let file_info = GridJsonWriter::new().get_file_info(&output)?;
            println!("\n{}", file_info.summary());
        }

        Commands::Normalize {
            input,
            output,
            from,
            to,
        } => {
            let paths = config.normalize_paths().with_overrides(input, output);
            let input = paths.input_path()?;
            let output = paths.output_path.as_deref().unwrap_or(input);

            println!("Normalizing grid keys...");
            println!("Input file: {}", input.display());
            if output == input {
                println!("Output file: {} (in place)", output.display());
            } else {
                println!("Output file: {}", output.display());
            }

            let progress = ProgressReporter::new_spinner("Rewriting keys...", false);

            let normalizer =
                KeyNormalizer::with_separators(KeySeparator::from(from), KeySeparator::from(to));
            let report = normalizer.normalize_file(input, output)?;

            progress.finish_with_message(&format!("Rewrote {} keys", report.rewritten_keys));

            println!("\n{}", report.summary());
            if report.collisions > 0 {
                println!(
                    "⚠️  {} keys collided after rewriting; later entries were kept",
                    report.collisions
                );
            }
        }

        Commands::Lookup {
            file,
            lat,
            lon,
            precision,
            radius,
        } => {
            let config = config
                .with_key_precision(precision)?
                .with_search_radius(radius)?;
            let paths = config.grid_path().with_overrides(file, None);
            let file = paths.input_path()?;

            let mapping = MappingReader::read_mapping(file)?;
            let lookup = ClimateLookup::new(&mapping)
                .with_precision(config.key_precision)
                .with_search_radius(config.search_radius);

            let query = LookupQuery::new(lat, lon);
            match lookup.lookup(&query)? {
                Some(result) => {
                    info!(key = %result.matched_key, code = %result.code, "Lookup resolved");
                    println!("Climate zone: {}", result);
                }
                None => {
                    println!(
                        "Climate zone: Unknown (no cell within {}° of {})",
                        config.search_radius,
                        lookup.snapped_key(&query)
                    );
                }
            }
        }

        Commands::Info { file, sample } => {
            let paths = config.grid_path().with_overrides(file, None);
            let file = paths.input_path()?;

            println!("Analyzing grid file: {}", file.display());

            let writer = GridJsonWriter::new();
            let file_info = writer.get_file_info(file)?;

            let mapping = MappingReader::read_mapping(file)?;
            let summary = GridAnalyzer::new().analyze(&mapping);

            println!("\n{}", summary.display_summary());

            println!("File Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Cells (showing up to {} cells):", sample);
                for (i, (key, code)) in mapping.iter().take(sample).enumerate() {
                    println!("{}. {} => {}", i + 1, key, code);
                }
            }
        }
    }

    Ok(())
}
