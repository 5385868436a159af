use colored::*;
use docsim::similarity::PairScore;
use docsim::{ProgressReporter, SimilarityReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

const LABEL_WIDTH: usize = 28;

/// CLI progress reporter using indicatif progress bars.
///
/// - Extraction phase: progress bar (document count known upfront)
/// - Scoring phase: spinner (pairs finish too fast to be worth a bar)
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_extract_start(&self, total_documents: usize) {
        let pb = ProgressBar::new(total_documents as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Extracting [{bar:30.cyan/dim}] {pos}/{len} documents",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_extract_progress(&self, documents_done: usize, _total_documents: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(documents_done as u64);
        }
    }

    fn on_extract_complete(&self, failed_documents: usize, duration_secs: f64) {
        self.finish_bar();
        if failed_documents > 0 {
            eprintln!(
                "  \x1b[33m!\x1b[0m Extraction complete in {:.2}s ({} documents failed)",
                duration_secs, failed_documents
            );
        } else {
            eprintln!(
                "  \x1b[32m✓\x1b[0m Extraction complete in {:.2}s",
                duration_secs
            );
        }
    }

    fn on_score_start(&self, _total_pairs: usize) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message("Scoring pairs...");
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_score_complete(&self, total_pairs: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scored {} pairs in {:.2}s",
            total_pairs, duration_secs
        );
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the matrix as a console table. High-overlap cells are the ones
/// the user is hunting for, so they come out red.
pub fn print_matrix(report: &SimilarityReport) {
    let label_width = report
        .files
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);

    print!("{:label_width$}", "");
    for name in &report.files {
        print!("  {:>7}", truncate(name, 7));
    }
    println!();

    for (row, name) in report.files.iter().enumerate() {
        print!("{:label_width$}", truncate(name, label_width));
        for col in 0..report.files.len() {
            // Pad before colorizing so the escape codes don't skew the
            // column alignment.
            let score = report.matrix.get(row, col);
            let padded = match score {
                PairScore::Percent(pct) => format!("{:>7}", pct),
                PairScore::Unavailable => format!("{:>7}", "n/a"),
            };
            let cell = match score {
                PairScore::Percent(_) if row == col => padded.normal(),
                PairScore::Percent(pct) if pct >= 80 => padded.red(),
                PairScore::Percent(pct) if pct >= 50 => padded.yellow(),
                PairScore::Percent(_) => padded.green(),
                PairScore::Unavailable => padded.dimmed(),
            };
            print!("  {}", cell);
        }
        println!();
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        name.chars().take(max_chars.saturating_sub(1)).chain("…".chars()).collect()
    }
}
