use crate::batch::Document;
use crate::config::AppConfig;
use crate::error::Error;
use crate::matrix::SimilarityMatrix;
use crate::normalize::{self, ShingleSet};
use crate::progress::ProgressReporter;
use crate::similarity;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct AnalysisEngine {
    config: AppConfig,
}

/// Outcome of one full analysis run over a batch snapshot.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub files: Vec<String>,
    pub matrix: SimilarityMatrix,
    /// Per-document failures. A failed document stays in the matrix; all
    /// its off-diagonal cells read `unavailable`.
    pub failures: Vec<(String, Error)>,
    pub extract_duration: Duration,
    pub score_duration: Duration,
}

impl AnalysisEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full similarity pipeline over a batch snapshot:
    /// 1. Parallel per-document extraction + normalization to shingle sets
    /// 2. Parallel Jaccard scoring of every unordered pair
    /// 3. Symmetric matrix assembly in batch order
    pub fn analyze(
        &self,
        docs: &[Arc<Document>],
        reporter: &dyn ProgressReporter,
    ) -> Result<AnalysisOutcome, Error> {
        if docs.is_empty() {
            return Err(Error::NoFiles);
        }

        let files: Vec<String> = docs.iter().map(|doc| doc.name.clone()).collect();

        // Phase 1: extract + normalize
        info!("Extracting {} documents...", docs.len());
        reporter.on_extract_start(docs.len());
        let extract_start = Instant::now();
        let done = AtomicUsize::new(0);

        let prepared: Vec<Result<ShingleSet, Error>> = docs
            .par_iter()
            .map(|doc| {
                let result = self.prepare_document(doc);
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.on_extract_progress(finished, docs.len());
                result
            })
            .collect();

        let mut shingles: Vec<Option<ShingleSet>> = Vec::with_capacity(docs.len());
        let mut failures: Vec<(String, Error)> = Vec::new();
        for (doc, result) in docs.iter().zip(prepared) {
            match result {
                Ok(set) => shingles.push(Some(set)),
                Err(err) => {
                    tracing::error!("Error extracting '{}': {}", doc.name, err);
                    failures.push((doc.name.clone(), err));
                    shingles.push(None);
                }
            }
        }

        let extract_duration = extract_start.elapsed();
        reporter.on_extract_complete(failures.len(), extract_duration.as_secs_f64());
        debug!(
            "Extraction completed in {:.2}s: {} documents, {} failed",
            extract_duration.as_secs_f64(),
            docs.len(),
            failures.len(),
        );

        // Phase 2: score all pairs
        let pair_count = docs.len() * (docs.len() - 1) / 2;
        info!("Scoring {} document pairs...", pair_count);
        reporter.on_score_start(pair_count);
        let score_start = Instant::now();
        let scores = similarity::score_all_pairs(&shingles, self.config.rounding);
        let score_duration = score_start.elapsed();
        reporter.on_score_complete(pair_count, score_duration.as_secs_f64());
        debug!(
            "Scoring completed in {:.2}s: {} pairs",
            score_duration.as_secs_f64(),
            pair_count,
        );

        // Phase 3: assemble the matrix
        let matrix = SimilarityMatrix::from_pair_scores(docs.len(), &scores);

        Ok(AnalysisOutcome {
            files,
            matrix,
            failures,
            extract_duration,
            score_duration,
        })
    }

    fn prepare_document(&self, doc: &Document) -> Result<ShingleSet, Error> {
        if doc.bytes.len() as u64 > self.config.max_file_bytes {
            return Err(Error::ResourceExceeded {
                name: doc.name.clone(),
                bytes: doc.bytes.len() as u64,
                limit: self.config.max_file_bytes,
            });
        }

        let text = crate::extract::extract_text(&doc.name, doc.format, &doc.bytes)?;
        let tokens = normalize::tokenize(&text);
        Ok(normalize::shingle_set(&tokens, self.config.shingle_size))
    }
}
