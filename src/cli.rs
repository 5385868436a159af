use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docsim")]
#[command(about = "Pairwise document similarity detector", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a batch of documents and print the similarity matrix
    Compare(CompareArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Documents to compare (.pdf, .docx, .txt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Write the matrix as an XLSX workbook
    #[arg(long, value_name = "PATH")]
    pub spreadsheet: Option<PathBuf>,

    /// Write the matrix as a printable PDF
    #[arg(long, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Write the matrix as CSV
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
