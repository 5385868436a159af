mod cli;
mod console;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, CompareArgs};
use colored::*;
use console::CliReporter;
use docsim::extract::DocumentFormat;
use docsim::similarity::PairScore;
use docsim::{AnalysisEngine, ExportFormat, IncomingFile, Session};
use dotenv::dotenv;
use std::fs;
use std::path::Path;
use std::process;
use tracing::{error, info, warn};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = docsim::logging::init_logger();

    let config = match docsim::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Compare(compare_args)) => {
            if let Err(err) = run_compare(&config, &compare_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_compare(config: &docsim::AppConfig, args: &CompareArgs) -> anyhow::Result<()> {
    let engine = AnalysisEngine::new(config.clone());
    let session = Session::new();
    let reporter = CliReporter::new();

    let files = load_files(&args.files)?;
    let outcome = session.add_documents(files)?;
    for (name, err) in &outcome.rejected {
        error!("Rejected '{}': {}", name, err);
    }
    if session.is_empty() {
        return Err(docsim::Error::NoFiles.into());
    }

    let report = session.compute_similarity(&engine, &reporter)?;

    println!();
    if args.json {
        println!("{}", serde_json::to_string_pretty(report.as_ref())?);
    } else {
        console::print_matrix(&report);
    }

    for failure in &report.failures {
        error!("'{}' not scored: {}", failure.file, failure.error);
    }

    let near_duplicates = count_near_duplicates(&report, 80);
    println!();
    info!(
        "{} documents, {} pairs at or above {}% similarity",
        format!("{}", report.files.len()).green(),
        format!("{}", near_duplicates).red(),
        80,
    );

    if let Some(path) = &args.spreadsheet {
        fs::write(path, session.export(ExportFormat::Spreadsheet)?)?;
        info!("Wrote spreadsheet report to {}", path.display());
    }
    if let Some(path) = &args.document {
        fs::write(path, session.export(ExportFormat::Document)?)?;
        info!("Wrote printable report to {}", path.display());
    }
    if let Some(path) = &args.csv {
        fs::write(path, session.export(ExportFormat::Csv)?)?;
        info!("Wrote CSV report to {}", path.display());
    }

    Ok(())
}

fn load_files(paths: &[std::path::PathBuf]) -> anyhow::Result<Vec<IncomingFile>> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                warn!("Skipping '{}': not a file path", path.display());
                continue;
            }
        };

        let mime = match format_for_path(path) {
            Some(format) => format.mime_type().to_string(),
            None => {
                warn!("Skipping '{}': unsupported file extension", path.display());
                continue;
            }
        };

        let bytes =
            fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
        files.push(IncomingFile { name, mime, bytes });
    }

    Ok(files)
}

fn format_for_path(path: &Path) -> Option<DocumentFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
}

fn count_near_duplicates(report: &docsim::SimilarityReport, threshold: u8) -> usize {
    let n = report.files.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if let PairScore::Percent(pct) = report.matrix.get(i, j) {
                if pct >= threshold {
                    count += 1;
                }
            }
        }
    }
    count
}
