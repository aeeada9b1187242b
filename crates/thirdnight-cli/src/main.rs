//! thirdnight CLI - Housekeeping Roster Generator
//!
//! Turns the PMS "In House Guests" export into the printable housekeeping
//! roster, marking every room due for its third-night service.

mod config;
mod summary;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use thirdnight_core::Renderer;
use thirdnight_render::TextRenderer;
use thirdnight_report::ReportAssembler;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "thirdnight")]
#[command(author, version, about = "Housekeeping roster generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the roster workbook and print today's due list
    Generate {
        #[command(flatten)]
        args: RunArgs,

        /// Directory to write the roster into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Date printed on the roster and in its file name [default: --today, else the local date]
        #[arg(long, value_name = "YYYY-MM-DD")]
        stamp: Option<NaiveDate>,
    },

    /// Print today's due list only
    Due {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print the roster as plain text
    Preview {
        #[command(flatten)]
        args: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// PMS export (.xls or .xlsx)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Date to evaluate housekeeping for [default: local date]
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// TOML file overriding the room grid or export layout
    #[arg(long, value_name = "FILE", env = "THIRDNIGHT_CONFIG")]
    config: Option<PathBuf>,
}

impl RunArgs {
    fn today(&self) -> NaiveDateTime {
        self.today
            .map_or_else(|| Local::now().naive_local(), |d| d.and_time(NaiveTime::MIN))
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        fs::read(&self.file).with_context(|| format!("Failed to read {}", self.file.display()))
    }

    fn assembler(&self) -> Result<ReportAssembler> {
        let config = config::load_config(self.config.as_deref())?;
        Ok(ReportAssembler::new(config))
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An unexpected error occurred during processing: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Generate { args, output, stamp } => {
            let raw = args.read_input()?;
            let today = args.today();
            let stamp = stamp
                .or(args.today)
                .unwrap_or_else(|| Local::now().date_naive());

            let report = args.assembler()?.generated_on(stamp).generate_report(&raw, today)?;

            fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let path = output.join(&report.file_name);
            fs::write(&path, &report.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = report.bytes.len(), "roster written");

            summary::write_record_count(&mut out, &report.summary)?;
            summary::write_due_table(&mut out, &report.summary)?;
            writeln!(out)?;
            writeln!(out, "Roster written to {}", path.display())?;
        }
        Commands::Due { args } => {
            let raw = args.read_input()?;
            let (_, due) = args.assembler()?.summarize(&raw, args.today())?;

            summary::write_record_count(&mut out, &due)?;
            summary::write_due_table(&mut out, &due)?;
        }
        Commands::Preview { args } => {
            let raw = args.read_input()?;
            let today = args.today();
            let assembly = args
                .assembler()?
                .generated_on(today.date())
                .assemble(&raw, today)?;

            write!(out, "{}", TextRenderer::new().render(&assembly.roster)?)?;
        }
    }

    out.flush()?;
    Ok(())
}
