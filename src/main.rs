use clap::Parser;
use koppen_grid::cli::{init_logging, run, Cli};
use koppen_grid::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    run(cli)
}
