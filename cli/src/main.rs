use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fixpoint_core::passes::simplification_pipeline;
use fixpoint_core::{DriverOptions, FixedPointDriver, FixedPointError, JsonUnit};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "fixpoint")]
#[command(about = "Run a transformation pipeline to a fixed point over a JSON document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simplify a JSON document by iterating the stock pipeline to a fixed point
    Simplify {
        /// Input JSON file
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of iterations before giving up
        #[arg(long, default_value_t = fixpoint_core::DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Print the capabilities the stock pipeline requires from the host
    Capabilities,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing — logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Simplify {
            input,
            output,
            max_iterations,
            format,
        } => {
            let file = File::open(&input)
                .with_context(|| format!("Failed to open input file: {}", input.display()))?;
            let reader = BufReader::new(file);
            let doc: serde_json::Value = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse JSON from: {}", input.display()))?;

            let driver = FixedPointDriver::with_options(
                simplification_pipeline(),
                DriverOptions { max_iterations },
            );
            let mut unit = JsonUnit::new(doc, input.display().to_string());

            match driver.run(&mut unit) {
                Ok(()) => {}
                Err(err @ FixedPointError::IterationLimitExceeded { .. }) => {
                    // Divergence gets its own message: the partially
                    // simplified document is still written out.
                    eprintln!("Error: pipeline diverged: {err}");
                    write_json(unit.payload(), output.as_ref(), format)?;
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => {
                    return Err(anyhow::Error::from(err).context("Simplification failed"));
                }
            }

            write_json(unit.payload(), output.as_ref(), format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Capabilities => {
            let driver = FixedPointDriver::new(simplification_pipeline());
            for name in driver.required_capabilities().iter() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;

    Ok(())
}
