//! kvars - Main Entry Point
//!
//! Runs the vars transformer as a KRM function. Reads a `ResourceList` (or a
//! plain document stream together with a config file) and writes the result.

mod logging;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use kvars_domain::VarsTransformerConfig;
use kvars_infrastructure::{InfrastructureError, load_config, run_function};

#[derive(Parser, Debug)]
#[command(
    name = "kvars",
    version,
    about = "Substitute $(NAME) variables with values read from other resources"
)]
struct Cli {
    /// Function config file. Required unless the input is a ResourceList with a functionConfig.
    function_config: Option<PathBuf>,

    /// Read input from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::setup_logging(cli.log_level) {
        eprintln!("failed to set up logging: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), InfrastructureError> {
    let config: Option<VarsTransformerConfig> =
        cli.function_config.as_deref().map(load_config).transpose()?;

    let input = match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(|source| InfrastructureError::ReadFile {
            path: path.clone(),
            source,
        })?,
        None => io::read_to_string(io::stdin())?,
    };

    let output = run_function(&input, config)?;

    match &cli.output {
        Some(path) => fs::write(path, output)?,
        None => io::stdout().lock().write_all(output.as_bytes())?,
    }
    Ok(())
}
