use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use engine::models::Season;
use engine::{ProcessedResults, process_results};
use importer::{CrewTimerSource, ImportContext, ResultSource};
use report::{Config, PrintMode, render};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lsm-results")]
#[command(about = "Regatta results ranked per category, from a CrewTimer export", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Season of the race markers, overrides LSM_SEASON
    #[arg(long, global = true)]
    season: Option<Season>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the results and print them
    Print {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = PrintMode::Screen)]
        mode: PrintMode,
    },
    /// Read and rank the results, only reporting problems
    Check { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("lsm_results={log_level},report={log_level},importer={log_level},engine={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let season = cli.season.unwrap_or(config.season);
    tracing::debug!("Using race markers of season {}", season);

    match cli.command {
        Commands::Print { file, mode } => {
            let processed = load(&file, season)?;
            let out: Box<dyn Write> = match mode.output_file(&file) {
                Some(path) => {
                    tracing::info!("Writing results to {}", path.display());
                    let output = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    Box::new(BufWriter::new(output))
                }
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let mut printer = mode.printer(out);
            render(printer.as_mut(), &processed.results).context("Failed to print results")?;
        }
        Commands::Check { file } => {
            let processed = load(&file, season)?;
            let records: usize = processed.results.values().map(Vec::len).sum();
            println!(
                "{}: {} results in {} categories, {} warnings",
                file.display(),
                records,
                processed.results.len(),
                processed.diagnostics.len()
            );

            let issues = processed
                .diagnostics
                .warnings
                .iter()
                .filter(|w| w.is_consistency_issue())
                .count();
            if issues > 0 {
                bail!("{} consistency issues in {}", issues, file.display());
            }
        }
    }

    Ok(())
}

fn load(file: &Path, season: Season) -> anyhow::Result<ProcessedResults> {
    let source = CrewTimerSource::new(file);
    let records = source
        .read_results(&ImportContext { season })
        .with_context(|| format!("Failed to import {} results from {}", source.name(), file.display()))?;

    match process_results(records) {
        Ok(processed) => Ok(processed),
        Err(e) if e.is_grammar_error() => {
            Err(e).with_context(|| format!("Malformed value in {}", file.display()))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to merge categories of {}", file.display())),
    }
}
